//! Repository fan-out: list, fetch, patch and write back every README

pub mod processor;
pub mod summary;

pub use processor::ReadmePatcher;
pub use summary::{RepoOutcome, RunSummary, WriteKind};
