//! GitHub REST access: repository listing, raw README reads and contents writes

pub mod client;
pub mod error;
pub mod host;
pub mod mock;
pub mod models;

pub use client::GitHubClient;
pub use error::GitHubError;
pub use host::ReadmeHost;
pub use models::{ContentMetadata, ContentsRequest, Repository};
