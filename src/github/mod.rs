//! GitHub collaborators: issue lookup and pull request body retrieval
//!
//! The checker only depends on the two traits here; `GitHubClient` is the
//! REST implementation used by the binary.

pub mod client;

pub use client::GitHubClient;

use crate::models::IssueLookup;
use async_trait::async_trait;

/// Errors returned by the GitHub collaborators
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("{owner}/{repo}#{number} does not exist")]
    NotFound {
        owner: String,
        repo: String,
        number: u64,
    },

    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("Unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },
}

impl LookupError {
    /// The item does not exist, as opposed to the lookup itself failing
    pub fn is_not_found(&self) -> bool {
        matches!(self, LookupError::NotFound { .. })
    }
}

/// Resolves issue numbers to issues or pull requests
#[async_trait]
pub trait IssueOracle: Send + Sync {
    async fn get_issue(&self, owner: &str, repo: &str, number: u64)
        -> Result<IssueLookup, LookupError>;
}

/// Fetches pull request descriptions
#[async_trait]
pub trait PullRequestSource: Send + Sync {
    /// Body of the pull request, `None` when it has no description
    async fn pull_request_body(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<Option<String>, LookupError>;
}
