//! `check`: validate a local description before opening a pull request

use super::report;
use super::{RepoArgs, SectionArgs};
use crate::context::RunContext;
use crate::github::GitHubClient;
use crate::orchestrator::PullCheckOrchestrator;
use crate::Result;
use anyhow::Context;
use clap::Args;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Markdown file holding the description (`-` reads stdin)
    pub file: PathBuf,

    /// Token used to query the GitHub API (public repositories work without one)
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Also write the report as JSON to this file
    #[arg(long)]
    pub report: Option<PathBuf>,

    #[command(flatten)]
    pub repo: RepoArgs,

    #[command(flatten)]
    pub sections: SectionArgs,
}

/// Check a local file. Returns whether it passed.
pub async fn run(args: CheckArgs) -> Result<bool> {
    let body = read_body(&args.file)?;
    let ctx = RunContext::new(&args.repo.repository, &args.repo.server_url)?;
    let config = args.sections.config();
    let client = GitHubClient::new(&args.repo.api_url, args.token.as_deref())?;

    let orchestrator = PullCheckOrchestrator::new(&ctx, &config, &client)?;
    let result = orchestrator.check_body(&body).await?;

    report::print_report(&result, &config.labels);
    if let Some(path) = &args.report {
        let json = serde_json::to_string_pretty(&result)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
    }

    Ok(result.passed)
}

fn read_body(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut body = String::new();
        std::io::stdin()
            .read_to_string(&mut body)
            .context("Failed to read description from stdin")?;
        return Ok(body);
    }

    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read description {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_body_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pr.md");
        std::fs::write(&path, "## Motivation\n\nbecause").unwrap();
        assert_eq!(read_body(&path).unwrap(), "## Motivation\n\nbecause");
    }

    #[test]
    fn test_read_body_missing_file() {
        let err = read_body(Path::new("/nonexistent/pr.md")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/pr.md"));
    }
}
