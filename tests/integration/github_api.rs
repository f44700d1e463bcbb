//! HTTP-level tests for the GitHub client
//!
//! Each test registers the exact requests the client should issue and checks
//! how responses map onto `ReadmeHost` results.

use base64::engine::general_purpose;
use base64::Engine as _;
use readme_disclaimer::github::ContentsRequest;
use readme_disclaimer::{GitHubClient, GitHubError, ReadmeHost, Repository};
use reqwest::StatusCode;
use wiremock::{matchers, Mock, Request, ResponseTemplate};

use super::common::{bearer, repo_json, start_api_mock};

#[tokio::test]
async fn test_list_page_sends_auth_and_page() {
    let (_server, config) = start_api_mock(vec![Mock::given(matchers::method("GET"))
        .and(matchers::path("/users/octocat/repos"))
        .and(matchers::query_param("page", "2"))
        .and(matchers::header("authorization", bearer().as_str()))
        .and(matchers::header("accept", "application/vnd.github+json"))
        .and(matchers::header_exists("user-agent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![
            repo_json("hello", false),
            repo_json("forked", true),
        ]))
        .expect(1)])
    .await;

    let client = GitHubClient::new(&config).unwrap();
    let repos = client.list_repositories_page(2).await.unwrap();

    assert_eq!(
        repos,
        vec![
            Repository::new("hello", "main", false),
            Repository::new("forked", "main", true),
        ]
    );
}

#[tokio::test]
async fn test_list_page_error_status() {
    let (_server, config) = start_api_mock(vec![Mock::given(matchers::path(
        "/users/octocat/repos",
    ))
    .respond_with(
        ResponseTemplate::new(401).set_body_string(r#"{"message":"Bad credentials"}"#),
    )])
    .await;

    let client = GitHubClient::new(&config).unwrap();
    let err = client.list_repositories_page(1).await.unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    assert!(err.to_string().contains("Bad credentials"));
}

#[tokio::test]
async fn test_list_page_undecodable_body() {
    let (_server, config) = start_api_mock(vec![Mock::given(matchers::path(
        "/users/octocat/repos",
    ))
    .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))])
    .await;

    let client = GitHubClient::new(&config).unwrap();
    let err = client.list_repositories_page(1).await.unwrap_err();

    assert!(matches!(err, GitHubError::Decode(_)));
}

#[tokio::test]
async fn test_fetch_readme_is_unauthenticated() {
    let (_server, config) = start_api_mock(vec![Mock::given(matchers::method("GET"))
        .and(matchers::path("/octocat/hello/dev/README.md"))
        .respond_with(|req: &Request| {
            if req.headers.contains_key("authorization") {
                ResponseTemplate::new(400)
            } else {
                ResponseTemplate::new(200).set_body_string("# Hello")
            }
        })
        .expect(1)])
    .await;

    let client = GitHubClient::new(&config).unwrap();
    let readme = client.fetch_readme("hello", "dev").await.unwrap();

    assert_eq!(readme.as_deref(), Some("# Hello"));
}

#[tokio::test]
async fn test_fetch_readme_not_found_is_none() {
    let (_server, config) = start_api_mock(vec![Mock::given(matchers::path(
        "/octocat/empty/main/README.md",
    ))
    .respond_with(ResponseTemplate::new(404).set_body_string("404: Not Found"))])
    .await;

    let client = GitHubClient::new(&config).unwrap();

    assert_eq!(client.fetch_readme("empty", "main").await.unwrap(), None);
}

#[tokio::test]
async fn test_fetch_readme_server_error_is_err() {
    let (_server, config) = start_api_mock(vec![Mock::given(matchers::path(
        "/octocat/broken/main/README.md",
    ))
    .respond_with(ResponseTemplate::new(503))])
    .await;

    let client = GitHubClient::new(&config).unwrap();
    let err = client.fetch_readme("broken", "main").await.unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::SERVICE_UNAVAILABLE));
}

#[tokio::test]
async fn test_fetch_readme_rejects_invalid_utf8() {
    let (_server, config) = start_api_mock(vec![
        Mock::given(matchers::path("/octocat/bin/main/README.md"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"# \xff\xfe x".to_vec()))
            .expect(1),
        Mock::given(matchers::path("/octocat/text/main/README.md"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes("# 免责".as_bytes().to_vec()))
            .expect(1),
    ])
    .await;

    let client = GitHubClient::new(&config).unwrap();

    let err = client.fetch_readme("bin", "main").await.unwrap_err();
    assert!(matches!(err, GitHubError::InvalidUtf8(_)));
    assert_eq!(err.status(), None);

    let readme = client.fetch_readme("text", "main").await.unwrap();
    assert_eq!(readme.as_deref(), Some("# 免责"));
}

#[tokio::test]
async fn test_readme_sha() {
    let (_server, config) = start_api_mock(vec![Mock::given(matchers::method("GET"))
        .and(matchers::path("/repos/octocat/hello/contents/README.md"))
        .and(matchers::header("authorization", bearer().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "README.md",
            "path": "README.md",
            "sha": "3d21ec53a331a6f037a91c368710b99387d012c1",
            "size": 5,
            "type": "file"
        })))])
    .await;

    let client = GitHubClient::new(&config).unwrap();

    assert_eq!(
        client.readme_sha("hello").await.unwrap(),
        "3d21ec53a331a6f037a91c368710b99387d012c1"
    );
}

#[tokio::test]
async fn test_create_readme_sends_encoded_content_without_sha() {
    let (_server, config) = start_api_mock(vec![Mock::given(matchers::method("PUT"))
        .and(matchers::path("/repos/octocat/empty/contents/README.md"))
        .and(matchers::header("authorization", bearer().as_str()))
        .respond_with(|req: &Request| {
            let body: serde_json::Value = req.body_json().unwrap();
            if body.get("sha").is_some() {
                return ResponseTemplate::new(422);
            }
            let request: ContentsRequest = serde_json::from_value(body).unwrap();
            let decoded = general_purpose::STANDARD.decode(request.content).unwrap();
            if decoded == "免责 disclaimer".as_bytes() {
                ResponseTemplate::new(201)
            } else {
                ResponseTemplate::new(400)
            }
        })
        .expect(1)])
    .await;

    let client = GitHubClient::new(&config).unwrap();

    client
        .create_readme("empty", "免责 disclaimer")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_update_readme_conflict_keeps_body() {
    let (_server, config) = start_api_mock(vec![Mock::given(matchers::method("PUT"))
        .and(matchers::path("/repos/octocat/hello/contents/README.md"))
        .and(matchers::body_partial_json(serde_json::json!({ "sha": "stale" })))
        .respond_with(
            ResponseTemplate::new(409)
                .set_body_string(r#"{"message":"README.md does not match stale"}"#),
        )
        .expect(1)])
    .await;

    let client = GitHubClient::new(&config).unwrap();
    let err = client
        .update_readme("hello", "# Hello", "stale")
        .await
        .unwrap_err();

    match err {
        GitHubError::Status { status, body } => {
            assert_eq!(status, StatusCode::CONFLICT);
            assert!(body.contains("does not match"));
        }
        other => panic!("Expected status error, got {:?}", other),
    }
}
