//! Repository fetching.

pub mod git;

pub use git::{CloneWorkspace, GitFetchResult, GitFetcher};
