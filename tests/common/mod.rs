//! Shared test utilities: a mock GitHub server and matching client config

use readme_disclaimer::Config;
use wiremock::{Mock, MockServer};

pub const TEST_ACCOUNT: &str = "octocat";
pub const TEST_TOKEN: &str = "test-token";

/// Start a mock server serving both the API and the raw-content host.
///
/// Keep the returned server alive until the test finishes; mocks with
/// `expect` are verified when it is dropped.
pub async fn start_api_mock(mocks: Vec<Mock>) -> (MockServer, Config) {
    let server = MockServer::start().await;

    for mock in mocks {
        server.register(mock).await;
    }

    let config = Config {
        token: TEST_TOKEN.to_string(),
        account: TEST_ACCOUNT.to_string(),
        api_base_url: server.uri(),
        raw_base_url: server.uri(),
        ..Config::default()
    };

    (server, config)
}

pub fn bearer() -> String {
    format!("Bearer {TEST_TOKEN}")
}

pub fn repo_json(name: &str, fork: bool) -> serde_json::Value {
    serde_json::json!({
        "id": 1,
        "name": name,
        "full_name": format!("{TEST_ACCOUNT}/{name}"),
        "fork": fork,
        "default_branch": "main",
        "private": false
    })
}
