pub mod config;
pub mod github;
pub mod patcher;
pub mod readme;
pub mod util;

pub use config::{Config, ConfigError, ConfigOverrides};
pub use github::{GitHubClient, GitHubError, ReadmeHost, Repository};
pub use patcher::{ReadmePatcher, RepoOutcome, RunSummary, WriteKind};
pub use readme::{patch_readme, strip_disclaimers};
