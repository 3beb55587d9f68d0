pub mod check;
pub mod report;
pub mod run;

use crate::context::DEFAULT_SERVER_URL;
use crate::github::client::DEFAULT_API_URL;
use crate::models::{CheckConfig, MissingSectionPolicy, SectionLabels};
use clap::Args;

/// Where the repository lives
#[derive(Args, Debug)]
pub struct RepoArgs {
    /// Repository the pull request belongs to, as `owner/repo`
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: String,

    /// Web URL issue links start with
    #[arg(long, env = "GITHUB_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    pub server_url: String,

    /// REST API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,
}

/// Which sections to look for and how to judge them
#[derive(Args, Debug)]
pub struct SectionArgs {
    /// Heading whose section must reference an issue
    #[arg(long, env = "INPUT_TITLE_FOR_FIND_ISSUE")]
    pub issue_heading: String,

    /// Heading whose section must describe the motivation
    #[arg(long, env = "INPUT_TITLE_FOR_FIND_CONTENT")]
    pub content_heading: String,

    /// How to treat a section whose heading is absent
    #[arg(long, value_enum, env = "INPUT_MISSING_SECTION", default_value_t = MissingSectionPolicy::Pass)]
    pub missing_section: MissingSectionPolicy,

    /// Print every parsed node and the normalized motivation
    #[arg(short, long)]
    pub verbose: bool,
}

impl SectionArgs {
    pub fn config(&self) -> CheckConfig {
        CheckConfig {
            labels: SectionLabels::new(&self.issue_heading, &self.content_heading),
            policy: self.missing_section,
            verbose: self.verbose,
        }
    }
}
