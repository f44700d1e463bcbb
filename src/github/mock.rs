//! In-memory repository host for deterministic testing
//!
//! Implements the `ReadmeHost` trait over a fixed set of repositories and
//! README files, and records every call so tests can assert which requests a
//! run would have issued.
//!
//! # Example
//! ```no_run
//! use readme_disclaimer::github::mock::MockReadmeHost;
//! use readme_disclaimer::github::Repository;
//!
//! let host = MockReadmeHost::new()
//!     .with_repositories(vec![Repository::new("hello", "main", false)])
//!     .with_readme("hello", "# Hello");
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::StatusCode;

use crate::github::error::GitHubError;
use crate::github::host::ReadmeHost;
use crate::github::models::Repository;

/// A request observed by the mock host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    ListPage(u32),
    FetchReadme { repo: String, branch: String },
    ReadmeSha { repo: String },
    CreateReadme { repo: String, content: String },
    UpdateReadme { repo: String, content: String, sha: String },
}

impl MockCall {
    /// Repository the call targets (`None` for listing calls)
    pub fn repo(&self) -> Option<&str> {
        match self {
            MockCall::ListPage(_) => None,
            MockCall::FetchReadme { repo, .. }
            | MockCall::ReadmeSha { repo }
            | MockCall::CreateReadme { repo, .. }
            | MockCall::UpdateReadme { repo, .. } => Some(repo.as_str()),
        }
    }

    pub fn is_write(&self) -> bool {
        matches!(
            self,
            MockCall::CreateReadme { .. } | MockCall::UpdateReadme { .. }
        )
    }
}

#[derive(Clone, Default)]
pub struct MockReadmeHost {
    pages: Vec<Vec<Repository>>,
    readmes: HashMap<String, String>,
    failing_reads: HashSet<String>,
    failing_writes: HashSet<String>,
    failing_listing: bool,
    calls: Arc<Mutex<Vec<MockCall>>>,
}

impl MockReadmeHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `repos` as a single listing page
    pub fn with_repositories(self, repos: Vec<Repository>) -> Self {
        self.with_pages(vec![repos])
    }

    /// Serve each entry as one listing page, in order
    pub fn with_pages(mut self, pages: Vec<Vec<Repository>>) -> Self {
        self.pages = pages;
        self
    }

    pub fn with_readme(mut self, repo: &str, content: &str) -> Self {
        self.readmes.insert(repo.to_string(), content.to_string());
        self
    }

    /// Make README reads for `repo` fail with a server error
    pub fn with_failing_read(mut self, repo: &str) -> Self {
        self.failing_reads.insert(repo.to_string());
        self
    }

    /// Make create/update calls for `repo` fail with a validation error
    pub fn with_failing_write(mut self, repo: &str) -> Self {
        self.failing_writes.insert(repo.to_string());
        self
    }

    /// Make every listing page fail
    pub fn with_failing_listing(mut self) -> Self {
        self.failing_listing = true;
        self
    }

    /// All calls observed so far, in the order they were issued
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().clone()
    }

    /// Calls that targeted `repo`
    pub fn calls_for(&self, repo: &str) -> Vec<MockCall> {
        self.calls
            .lock()
            .iter()
            .filter(|call| call.repo() == Some(repo))
            .cloned()
            .collect()
    }

    fn record(&self, call: MockCall) {
        self.calls.lock().push(call);
    }

    fn failure(status: StatusCode, body: &str) -> GitHubError {
        GitHubError::Status {
            status,
            body: body.to_string(),
        }
    }
}

#[async_trait]
impl ReadmeHost for MockReadmeHost {
    async fn list_repositories_page(&self, page: u32) -> Result<Vec<Repository>, GitHubError> {
        self.record(MockCall::ListPage(page));
        if self.failing_listing {
            return Err(Self::failure(
                StatusCode::UNAUTHORIZED,
                r#"{"message":"Bad credentials"}"#,
            ));
        }
        let index = page.saturating_sub(1) as usize;
        Ok(self.pages.get(index).cloned().unwrap_or_default())
    }

    async fn fetch_readme(&self, repo: &str, branch: &str) -> Result<Option<String>, GitHubError> {
        self.record(MockCall::FetchReadme {
            repo: repo.to_string(),
            branch: branch.to_string(),
        });
        if self.failing_reads.contains(repo) {
            return Err(Self::failure(StatusCode::INTERNAL_SERVER_ERROR, "mock read failure"));
        }
        Ok(self.readmes.get(repo).cloned())
    }

    async fn readme_sha(&self, repo: &str) -> Result<String, GitHubError> {
        self.record(MockCall::ReadmeSha {
            repo: repo.to_string(),
        });
        if self.readmes.contains_key(repo) {
            Ok(format!("sha-{repo}"))
        } else {
            Err(Self::failure(StatusCode::NOT_FOUND, r#"{"message":"Not Found"}"#))
        }
    }

    async fn create_readme(&self, repo: &str, content: &str) -> Result<(), GitHubError> {
        self.record(MockCall::CreateReadme {
            repo: repo.to_string(),
            content: content.to_string(),
        });
        if self.failing_writes.contains(repo) {
            return Err(Self::failure(
                StatusCode::UNPROCESSABLE_ENTITY,
                r#"{"message":"Invalid request"}"#,
            ));
        }
        Ok(())
    }

    async fn update_readme(
        &self,
        repo: &str,
        content: &str,
        sha: &str,
    ) -> Result<(), GitHubError> {
        self.record(MockCall::UpdateReadme {
            repo: repo.to_string(),
            content: content.to_string(),
            sha: sha.to_string(),
        });
        if self.failing_writes.contains(repo) {
            return Err(Self::failure(
                StatusCode::CONFLICT,
                r#"{"message":"README.md does not match"}"#,
            ));
        }
        Ok(())
    }
}
