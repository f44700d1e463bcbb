use futures::future::join_all;
use tracing::{debug, error, info, warn};

use crate::github::{GitHubError, ReadmeHost, Repository};
use crate::patcher::summary::{RepoOutcome, RunSummary, WriteKind};
use crate::readme::patch_readme;

/// Patches the README of every non-fork repository on a host.
///
/// Failures are logged where they happen and never abort the run, except a
/// failed listing, which leaves nothing to process.
pub struct ReadmePatcher<H> {
    host: H,
    dry_run: bool,
}

impl<H: ReadmeHost> ReadmePatcher<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            dry_run: false,
        }
    }

    /// Compute patches without issuing any write calls
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// List every repository, page by page, until an empty page.
    /// Any failed page discards what was collected and yields nothing.
    pub async fn list_repositories(&self) -> Vec<Repository> {
        let mut repos = Vec::new();
        let mut page = 1;
        loop {
            match self.host.list_repositories_page(page).await {
                Ok(batch) if batch.is_empty() => break,
                Ok(batch) => {
                    info!(page, count = batch.len(), "Fetched repository page");
                    repos.extend(batch);
                    page += 1;
                }
                Err(err) => {
                    error!(page, error = %err, "Failed to list repositories");
                    return Vec::new();
                }
            }
        }
        info!(total = repos.len(), "Listed repositories");
        repos
    }

    /// README text, or `None` when it is missing or could not be read
    pub async fn fetch_readme(&self, repo: &Repository) -> Option<String> {
        match self
            .host
            .fetch_readme(&repo.name, &repo.default_branch)
            .await
        {
            Ok(Some(content)) => Some(content),
            Ok(None) => {
                info!(repo = %repo.name, "README.md does not exist");
                None
            }
            Err(err) => {
                warn!(repo = %repo.name, error = %err, "Failed to read README.md");
                None
            }
        }
    }

    /// Create or update the README. Returns whether the write succeeded.
    pub async fn write_readme(&self, repo: &Repository, kind: WriteKind, content: &str) -> bool {
        match self.try_write(repo, kind, content).await {
            Ok(()) => {
                info!(repo = %repo.name, action = kind.as_str(), "Wrote README.md");
                true
            }
            Err(err) => {
                let status = err.status().map(|s| s.as_u16()).unwrap_or_default();
                error!(
                    repo = %repo.name,
                    action = kind.as_str(),
                    status,
                    error = %err,
                    "Failed to write README.md"
                );
                false
            }
        }
    }

    async fn try_write(
        &self,
        repo: &Repository,
        kind: WriteKind,
        content: &str,
    ) -> Result<(), GitHubError> {
        match kind {
            WriteKind::Create => self.host.create_readme(&repo.name, content).await,
            WriteKind::Update => {
                let sha = self.host.readme_sha(&repo.name).await?;
                self.host.update_readme(&repo.name, content, &sha).await
            }
        }
    }

    pub async fn process_repository(&self, repo: &Repository) -> RepoOutcome {
        if repo.fork {
            debug!(repo = %repo.name, "Skipping fork");
            return RepoOutcome::SkippedFork;
        }

        let existing = self.fetch_readme(repo).await;
        let patched = patch_readme(existing.as_deref());

        let kind = match existing.as_deref() {
            None => WriteKind::Create,
            Some(current) if current != patched => WriteKind::Update,
            Some(_) => {
                info!(repo = %repo.name, "README.md already up to date");
                return RepoOutcome::Unchanged;
            }
        };

        if self.dry_run {
            info!(repo = %repo.name, action = kind.as_str(), "Dry run, not writing README.md");
            return RepoOutcome::Planned(kind);
        }

        if self.write_readme(repo, kind, &patched).await {
            RepoOutcome::Written(kind)
        } else {
            RepoOutcome::WriteFailed(kind)
        }
    }

    /// List repositories, process them all concurrently, and log one summary
    /// once every task has finished.
    pub async fn run(&self) -> RunSummary {
        let repos = self.list_repositories().await;

        let outcomes = join_all(repos.iter().map(|repo| async move {
            let outcome = self.process_repository(repo).await;
            (repo.name.clone(), outcome)
        }))
        .await;

        let summary = RunSummary::from_outcomes(outcomes);
        summary.log();
        summary
    }
}
