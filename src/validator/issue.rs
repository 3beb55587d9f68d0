use crate::context::RunContext;
use crate::github::{IssueOracle, LookupError};
use crate::models::IssueReference;
use crate::Result;
use anyhow::Context;
use colored::Colorize;
use regex::Regex;

/// Checks that a section references at least one existing issue.
///
/// Candidates are produced lazily: `#123` shorthand first, then full issue
/// URLs on the configured host. Lookups run one at a time in order of
/// appearance and stop at the first genuine issue.
#[derive(Debug, Clone)]
pub struct IssueValidator {
    owner: String,
    repo: String,
    local_ref: Regex,
    url_ref: Regex,
}

impl IssueValidator {
    pub fn new(ctx: &RunContext) -> Result<Self> {
        let local_ref = Regex::new(r"#[0-9]+").context("Failed to compile issue shorthand regex")?;
        let url_pattern = format!(
            r"(?i){}/([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+)/issues/([0-9]+)",
            regex::escape(&ctx.server_url)
        );
        let url_ref = Regex::new(&url_pattern).context("Failed to compile issue URL regex")?;

        Ok(Self {
            owner: ctx.owner.clone(),
            repo: ctx.repo.clone(),
            local_ref,
            url_ref,
        })
    }

    /// Issue references in `body`: shorthand matches first, then URL matches
    pub fn candidates<'a>(&'a self, body: &'a str) -> impl Iterator<Item = IssueReference> + 'a {
        let local = self
            .local_ref
            .find_iter(body)
            .filter_map(|m| parse_number(&m.as_str()[1..]).map(IssueReference::local));

        let remote = self.url_ref.captures_iter(body).filter_map(|caps| {
            let number = parse_number(&caps[3])?;
            Some(IssueReference::remote(&caps[1], &caps[2], number))
        });

        local.chain(remote)
    }

    /// Whether `body` references an existing issue that is not a pull request.
    ///
    /// A candidate that does not exist is skipped. Any other lookup failure
    /// aborts the check.
    pub async fn is_valid(&self, oracle: &dyn IssueOracle, body: &str) -> Result<bool> {
        println!("issue content is: {}", body.bright_green());

        for reference in self.candidates(body) {
            let (owner, repo, number) = reference.resolve(&self.owner, &self.repo);
            let place = if reference.is_local() { "this repo" } else { "other repo" };
            println!(
                "start check issue {} in {} {}",
                number.to_string().red(),
                place,
                format!("{}/{}", owner, repo).bright_green()
            );

            match oracle.get_issue(owner, repo, number).await {
                Ok(lookup) if !lookup.is_pull_request => {
                    println!(
                        "issue {} in {} {} is valid, so return true",
                        lookup.number.to_string().red(),
                        place,
                        format!("{}/{}", owner, repo).bright_green()
                    );
                    return Ok(true);
                }
                Ok(_) => {
                    println!("   {} is a pull request, skipping", reference.to_string().yellow());
                }
                Err(e @ LookupError::NotFound { .. }) => {
                    println!("   {}", e.to_string().yellow());
                }
                Err(e) => {
                    return Err(e).with_context(|| format!("Failed to look up issue {}", reference));
                }
            }
        }

        println!("{}", "there is no valid issue, so return false".red());
        Ok(false)
    }
}

fn parse_number(digits: &str) -> Option<u64> {
    match digits.parse::<u64>() {
        Ok(number) => Some(number),
        Err(_) => {
            println!("{}", format!("⚠ Ignoring out-of-range issue number {}", digits).yellow());
            None
        }
    }
}
