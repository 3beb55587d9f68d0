//! Run context: repository coordinates and the triggering pull request
//!
//! Everything read from the Actions runner environment ends up in a
//! `RunContext` or `PullRequestEvent` value that is passed down explicitly.

use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_SERVER_URL: &str = "https://github.com";

/// Reasons a run cannot start checking at all
#[derive(Debug, thiserror::Error)]
pub enum PreconditionError {
    #[error("the event which triggers this workflow must be pull_request or pull_request_target (got '{0}')")]
    NotPullRequestEvent(String),

    #[error("Invalid repository '{0}', expected 'owner/repo'")]
    InvalidRepository(String),

    #[error("Failed to read event payload '{}': {}", .path.display(), .message)]
    EventPayload { path: PathBuf, message: String },

    #[error("the body of pull request #{0} is empty")]
    EmptyBody(u64),
}

/// Repository the check runs for, plus where GitHub lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    pub owner: String,
    pub repo: String,
    /// Web host prefix issue URLs start with, e.g. `https://github.com`
    pub server_url: String,
}

impl RunContext {
    /// Build from an `owner/repo` string as found in `GITHUB_REPOSITORY`
    pub fn new(repository: &str, server_url: &str) -> Result<Self, PreconditionError> {
        let (owner, repo) = parse_repository(repository)?;
        Ok(Self {
            owner,
            repo,
            server_url: server_url.trim_end_matches('/').to_string(),
        })
    }

    /// `owner/repo` display form
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

/// Split `owner/repo` into its parts
pub fn parse_repository(repository: &str) -> Result<(String, String), PreconditionError> {
    let invalid = || PreconditionError::InvalidRepository(repository.to_string());
    let (owner, repo) = repository.trim().split_once('/').ok_or_else(invalid)?;
    if owner.is_empty() || repo.is_empty() || repo.contains('/') {
        return Err(invalid());
    }
    Ok((owner.to_string(), repo.to_string()))
}

#[derive(Debug, Deserialize)]
struct EventPayload {
    #[serde(default)]
    pull_request: Option<PullRequestPayload>,
}

#[derive(Debug, Deserialize)]
struct PullRequestPayload {
    number: u64,
}

/// The pull request a workflow run was triggered for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestEvent {
    pub event_name: String,
    pub number: u64,
}

impl PullRequestEvent {
    /// Load from the webhook payload the runner writes to `GITHUB_EVENT_PATH`.
    ///
    /// Any event whose payload carries a `pull_request` object is accepted.
    pub fn load(event_name: &str, path: Option<&Path>) -> Result<Self, PreconditionError> {
        let not_pull = || PreconditionError::NotPullRequestEvent(event_name.to_string());
        let path = path.ok_or_else(not_pull)?;

        let raw = std::fs::read_to_string(path).map_err(|e| PreconditionError::EventPayload {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_payload(event_name, &raw).map_err(|e| match e {
            PreconditionError::EventPayload { message, .. } => PreconditionError::EventPayload {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })
    }

    /// Parse a webhook payload
    pub fn from_payload(event_name: &str, raw: &str) -> Result<Self, PreconditionError> {
        let payload: EventPayload =
            serde_json::from_str(raw).map_err(|e| PreconditionError::EventPayload {
                path: PathBuf::new(),
                message: e.to_string(),
            })?;

        let pull = payload
            .pull_request
            .ok_or_else(|| PreconditionError::NotPullRequestEvent(event_name.to_string()))?;

        Ok(Self {
            event_name: event_name.to_string(),
            number: pull.number,
        })
    }
}
