use tracing::info;

/// Which contents call a README write needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteKind {
    Create,
    Update,
}

impl WriteKind {
    pub fn as_str(self) -> &'static str {
        match self {
            WriteKind::Create => "create",
            WriteKind::Update => "update",
        }
    }
}

/// Result of processing one repository
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoOutcome {
    SkippedFork,
    /// README already carries the disclaimer
    Unchanged,
    Written(WriteKind),
    WriteFailed(WriteKind),
    /// Change computed but not written (dry run)
    Planned(WriteKind),
}

impl RepoOutcome {
    /// Whether the README content had to change
    pub fn needs_change(self) -> bool {
        matches!(
            self,
            RepoOutcome::Written(_) | RepoOutcome::WriteFailed(_) | RepoOutcome::Planned(_)
        )
    }

    pub fn is_modified(self) -> bool {
        matches!(self, RepoOutcome::Written(_))
    }
}

/// Per-run totals, aggregated once every repository task has finished
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    /// Repositories whose README needed a change
    pub to_modify: Vec<String>,
    /// Repositories whose README was written successfully
    pub modified: Vec<String>,
    pub skipped_forks: Vec<String>,
    pub unchanged: Vec<String>,
    pub failed: Vec<String>,
}

impl RunSummary {
    pub fn from_outcomes<I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = (String, RepoOutcome)>,
    {
        let mut summary = RunSummary::default();
        for (name, outcome) in outcomes {
            summary.total += 1;
            if outcome.needs_change() {
                summary.to_modify.push(name.clone());
            }
            match outcome {
                RepoOutcome::SkippedFork => summary.skipped_forks.push(name),
                RepoOutcome::Unchanged => summary.unchanged.push(name),
                RepoOutcome::Written(_) => summary.modified.push(name),
                RepoOutcome::WriteFailed(_) => summary.failed.push(name),
                RepoOutcome::Planned(_) => {}
            }
        }
        summary
    }

    pub fn log(&self) {
        info!(
            total = self.total,
            to_modify = self.to_modify.len(),
            modified = self.modified.len(),
            unchanged = self.unchanged.len(),
            skipped_forks = self.skipped_forks.len(),
            failed = self.failed.len(),
            "Run finished"
        );
        if !self.modified.is_empty() {
            info!(repos = %self.modified.join(", "), "Modified repositories");
        }
        if !self.failed.is_empty() {
            info!(repos = %self.failed.join(", "), "Repositories that could not be written");
        }
    }
}
