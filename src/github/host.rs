use async_trait::async_trait;

use crate::github::error::GitHubError;
use crate::github::models::Repository;

/// Remote repository host holding the README files.
///
/// Implementations report failures as typed errors; deciding what a failure
/// means for the run is left to the caller.
#[async_trait]
pub trait ReadmeHost: Send + Sync {
    /// Fetch one page (1-based) of the account's repositories.
    /// An empty page marks the end of the listing.
    async fn list_repositories_page(&self, page: u32) -> Result<Vec<Repository>, GitHubError>;

    /// Raw README text on `branch`, or `None` when the file does not exist
    async fn fetch_readme(&self, repo: &str, branch: &str) -> Result<Option<String>, GitHubError>;

    /// Current version identifier of the README, needed to update it
    async fn readme_sha(&self, repo: &str) -> Result<String, GitHubError>;

    async fn create_readme(&self, repo: &str, content: &str) -> Result<(), GitHubError>;

    async fn update_readme(&self, repo: &str, content: &str, sha: &str)
        -> Result<(), GitHubError>;
}
