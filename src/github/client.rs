use async_trait::async_trait;
use base64::engine::general_purpose;
use base64::Engine as _;
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::github::error::GitHubError;
use crate::github::host::ReadmeHost;
use crate::github::models::{ContentMetadata, ContentsRequest, Repository};

const USER_AGENT: &str = concat!("readme-disclaimer/", env!("CARGO_PKG_VERSION"));
const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";
const README_PATH: &str = "README.md";

/// GitHub REST client bound to one account.
///
/// A single `reqwest::Client` (and therefore one connection pool) is shared by
/// every request, including concurrent ones.
#[derive(Clone)]
pub struct GitHubClient {
    http: Client,
    api_base_url: String,
    raw_base_url: String,
    account: String,
    token: String,
    create_message: String,
    update_message: String,
}

impl GitHubClient {
    pub fn new(config: &Config) -> Result<Self, GitHubError> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            raw_base_url: config.raw_base_url.trim_end_matches('/').to_string(),
            account: config.account.clone(),
            token: config.token.clone(),
            create_message: config.create_message.clone(),
            update_message: config.update_message.clone(),
        })
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    fn contents_url(&self, repo: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base_url, self.account, repo, README_PATH
        )
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .bearer_auth(&self.token)
            .header(ACCEPT, GITHUB_MEDIA_TYPE)
    }

    /// Turn a non-success response into `GitHubError::Status`, keeping the body
    /// for diagnostics.
    async fn ensure_success(response: Response) -> Result<Response, GitHubError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(GitHubError::Status { status, body })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, GitHubError> {
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn put_contents(&self, repo: &str, request: &ContentsRequest) -> Result<(), GitHubError> {
        let response = self
            .authorized(self.http.put(self.contents_url(repo)))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if matches!(status, StatusCode::OK | StatusCode::CREATED) {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(GitHubError::Status { status, body })
    }
}

pub fn encode_content(content: &str) -> String {
    general_purpose::STANDARD.encode(content.as_bytes())
}

#[async_trait]
impl ReadmeHost for GitHubClient {
    async fn list_repositories_page(&self, page: u32) -> Result<Vec<Repository>, GitHubError> {
        let url = format!("{}/users/{}/repos", self.api_base_url, self.account);
        let response = self
            .authorized(self.http.get(url))
            .query(&[("page", page)])
            .send()
            .await?;
        let response = Self::ensure_success(response).await?;
        Self::decode(response).await
    }

    async fn fetch_readme(&self, repo: &str, branch: &str) -> Result<Option<String>, GitHubError> {
        let url = format!(
            "{}/{}/{}/{}/{}",
            self.raw_base_url, self.account, repo, branch, README_PATH
        );
        let response = self.http.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = Self::ensure_success(response).await?;
        // Body may be written back, so decoding must not be lossy
        let bytes = response.bytes().await?;
        Ok(Some(String::from_utf8(bytes.to_vec())?))
    }

    async fn readme_sha(&self, repo: &str) -> Result<String, GitHubError> {
        let response = self
            .authorized(self.http.get(self.contents_url(repo)))
            .send()
            .await?;
        let response = Self::ensure_success(response).await?;
        let metadata: ContentMetadata = Self::decode(response).await?;
        Ok(metadata.sha)
    }

    async fn create_readme(&self, repo: &str, content: &str) -> Result<(), GitHubError> {
        let request = ContentsRequest {
            message: self.create_message.clone(),
            content: encode_content(content),
            sha: None,
        };
        self.put_contents(repo, &request).await
    }

    async fn update_readme(
        &self,
        repo: &str,
        content: &str,
        sha: &str,
    ) -> Result<(), GitHubError> {
        let request = ContentsRequest {
            message: self.update_message.clone(),
            content: encode_content(content),
            sha: Some(sha.to_string()),
        };
        self.put_contents(repo, &request).await
    }
}
