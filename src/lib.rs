// Pullcheck - Pull request description checker
// Requires a related-issue section that references a real issue and a motivation section with substance

pub mod cli;
pub mod context;
pub mod github;
pub mod models;
pub mod orchestrator;
pub mod parser;
pub mod validator;

pub use anyhow::{Context, Result};
pub use colored::Colorize;

// Re-export commonly used types
pub use context::{PreconditionError, PullRequestEvent, RunContext};
pub use github::{GitHubClient, IssueOracle, LookupError, PullRequestSource};
pub use models::{CheckConfig, DocumentNode, MissingSectionPolicy, Report, SectionLabels, SectionStatus};
pub use orchestrator::PullCheckOrchestrator;
