//! `run`: check the pull request that triggered the workflow

use super::report;
use super::{RepoArgs, SectionArgs};
use crate::context::{PullRequestEvent, RunContext};
use crate::github::GitHubClient;
use crate::models::{CheckConfig, Report};
use crate::orchestrator::PullCheckOrchestrator;
use crate::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Token used to query the GitHub API
    #[arg(long, env = "INPUT_GITHUB_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Name of the triggering event
    #[arg(long, env = "GITHUB_EVENT_NAME", default_value = "")]
    pub event_name: String,

    /// Path of the webhook payload written by the runner
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    pub event_path: Option<PathBuf>,

    #[command(flatten)]
    pub repo: RepoArgs,

    #[command(flatten)]
    pub sections: SectionArgs,
}

/// Run the check and report to the workflow. Returns whether it passed.
pub async fn run(args: RunArgs) -> Result<bool> {
    let config = args.sections.config();
    let report = match execute(&args, &config).await {
        Ok(report) => report,
        Err(e) => {
            report::set_failed(&format!("{:#}", e));
            return Err(e);
        }
    };

    report::print_report(&report, &config.labels);
    report::set_output("pull_valid", &report.passed.to_string())?;
    if let Some(message) = &report.message {
        report::set_failed(message);
    }

    Ok(report.passed)
}

async fn execute(args: &RunArgs, config: &CheckConfig) -> Result<Report> {
    let event = PullRequestEvent::load(&args.event_name, args.event_path.as_deref())?;
    let ctx = RunContext::new(&args.repo.repository, &args.repo.server_url)?;
    let client = GitHubClient::new(&args.repo.api_url, Some(&args.token))?;

    println!(
        "{}",
        format!(
            "🔍 Checking pull request #{} of {} ({})",
            event.number,
            ctx.full_name(),
            event.event_name
        )
        .cyan()
    );
    if config.verbose {
        println!("{}", format!("   GitHub API: {}", client.api_url()).dimmed());
    }

    let orchestrator = PullCheckOrchestrator::new(&ctx, config, &client)?;
    report::start_group("Pull request description");
    let report = orchestrator.check_pull_request(&client, event.number).await;
    report::end_group();

    report
}
