use serde::{Deserialize, Serialize};

fn default_branch_name() -> String {
    "main".to_string()
}

/// A repository as returned by the account listing endpoint.
///
/// Only the fields the patcher needs are decoded; everything else in the
/// payload is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Repository {
    pub name: String,
    #[serde(default = "default_branch_name")]
    pub default_branch: String,
    #[serde(default)]
    pub fork: bool,
}

impl Repository {
    pub fn new(name: impl Into<String>, default_branch: impl Into<String>, fork: bool) -> Self {
        Self {
            name: name.into(),
            default_branch: default_branch.into(),
            fork,
        }
    }
}

/// File metadata from the contents endpoint. The `sha` is the version
/// identifier required to update an existing file.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentMetadata {
    pub sha: String,
}

/// Body of a create/update contents request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentsRequest {
    pub message: String,
    /// Base64-encoded file content
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
}
