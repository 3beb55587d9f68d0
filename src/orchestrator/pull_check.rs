use crate::context::{PreconditionError, RunContext};
use crate::github::{IssueOracle, PullRequestSource};
use crate::models::{CheckConfig, DocumentNode, Report, SectionStatus, ValidationOutcome};
use crate::parser::{DocumentSource, MarkdownParser, Section};
use crate::validator::{ContentValidator, IssueValidator};
use crate::Result;
use anyhow::Context;
use colored::Colorize;

/// Drives one check: fetch the description, parse it, validate the two
/// required sections and combine the results.
pub struct PullCheckOrchestrator<'a> {
    ctx: &'a RunContext,
    config: &'a CheckConfig,
    oracle: &'a dyn IssueOracle,
    parser: Box<dyn DocumentSource + 'a>,
    issues: IssueValidator,
    content: ContentValidator,
}

impl<'a> PullCheckOrchestrator<'a> {
    pub fn new(ctx: &'a RunContext, config: &'a CheckConfig, oracle: &'a dyn IssueOracle) -> Result<Self> {
        Ok(Self {
            ctx,
            config,
            oracle,
            parser: Box::new(MarkdownParser::new()),
            issues: IssueValidator::new(ctx)?,
            content: ContentValidator::new()?,
        })
    }

    /// Replace the Markdown parser with another document source
    pub fn with_parser(mut self, parser: impl DocumentSource + 'a) -> Self {
        self.parser = Box::new(parser);
        self
    }

    /// Fetch the body of pull request `number` and check it
    pub async fn check_pull_request(
        &self,
        pulls: &dyn PullRequestSource,
        number: u64,
    ) -> Result<Report> {
        let body = pulls
            .pull_request_body(&self.ctx.owner, &self.ctx.repo, number)
            .await
            .with_context(|| {
                format!("Failed to fetch pull request #{} of {}", number, self.ctx.full_name())
            })?;

        let body = match body {
            Some(body) if !body.is_empty() => body,
            _ => return Err(PreconditionError::EmptyBody(number).into()),
        };

        println!("pull content is: {}", body);
        self.check_body(&body).await
    }

    /// Parse and check a description
    pub async fn check_body(&self, body: &str) -> Result<Report> {
        let nodes = self.parser.parse(body);
        let outcome = self.scan(&nodes).await?;
        Ok(Report::new(outcome, self.config.policy, &self.config.labels))
    }

    /// Walk the nodes once, validating the section under each matching heading.
    ///
    /// A label that appears more than once is judged by its last section.
    pub async fn scan(&self, nodes: &[DocumentNode]) -> Result<ValidationOutcome> {
        let labels = &self.config.labels;
        let mut outcome = ValidationOutcome::default();
        let mut index = 0;

        while let Some(node) = nodes.get(index) {
            if self.config.verbose {
                let kind = match node.heading_level() {
                    Some(level) => format!("h{}", level),
                    None => node.kind().name().to_string(),
                };
                println!(
                    "{}",
                    format!("   [{}] {}: {:?}", index, kind, node.plain_text()).dimmed()
                );
            }

            if !node.is_heading() {
                index += 1;
                continue;
            }

            let title = node.plain_text();
            if title == labels.issue {
                let section = Section::after_heading(nodes, index);
                let valid = self.issues.is_valid(self.oracle, &section.body).await?;
                outcome.issue = SectionStatus::Found(valid);
                index = section.end;
            } else if title == labels.content {
                let section = Section::after_heading(nodes, index);
                println!("pull message is: {}", section.body.bright_green());
                if self.config.verbose {
                    println!("after replace: {}", self.content.normalize(&section.body).red());
                }
                outcome.content = SectionStatus::Found(self.content.is_valid(&section.body));
                index = section.end;
            } else {
                index += 1;
            }
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::LookupError;
    use crate::models::{IssueLookup, MissingSectionPolicy, NodeKind, SectionLabels};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Every number below 100 is an issue, everything else is missing
    #[derive(Default)]
    struct SmallNumbersOracle {
        calls: Mutex<usize>,
    }

    #[async_trait]
    impl IssueOracle for SmallNumbersOracle {
        async fn get_issue(
            &self,
            owner: &str,
            repo: &str,
            number: u64,
        ) -> Result<IssueLookup, LookupError> {
            *self.calls.lock().unwrap() += 1;
            if number < 100 {
                Ok(IssueLookup {
                    number,
                    is_pull_request: false,
                })
            } else {
                Err(LookupError::NotFound {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                    number,
                })
            }
        }
    }

    struct FixedBody(Option<&'static str>);

    #[async_trait]
    impl PullRequestSource for FixedBody {
        async fn pull_request_body(
            &self,
            _owner: &str,
            _repo: &str,
            _number: u64,
        ) -> Result<Option<String>, LookupError> {
            Ok(self.0.map(str::to_string))
        }
    }

    fn ctx() -> RunContext {
        RunContext::new("acme/widgets", "https://github.com").unwrap()
    }

    fn config(policy: MissingSectionPolicy) -> CheckConfig {
        let mut config = CheckConfig::new(SectionLabels::new("Related Issue", "Motivation"));
        config.policy = policy;
        config
    }

    #[tokio::test]
    async fn test_both_sections_valid() {
        let (ctx, config, oracle) = (ctx(), config(MissingSectionPolicy::Pass), SmallNumbersOracle::default());
        let orchestrator = PullCheckOrchestrator::new(&ctx, &config, &oracle).unwrap();
        let body = "## Related Issue\n\ncloses #12\n\n## Motivation\n\nThe cache never expired entries.\n";

        let report = orchestrator.check_body(body).await.unwrap();
        assert_eq!(report.outcome.issue, SectionStatus::Found(true));
        assert_eq!(report.outcome.content, SectionStatus::Found(true));
        assert!(report.passed);
        assert!(report.message.is_none());
    }

    #[tokio::test]
    async fn test_missing_sections_pass_by_default() {
        let (ctx, config, oracle) = (ctx(), config(MissingSectionPolicy::Pass), SmallNumbersOracle::default());
        let orchestrator = PullCheckOrchestrator::new(&ctx, &config, &oracle).unwrap();

        let report = orchestrator.check_body("## Summary\n\nsomething").await.unwrap();
        assert_eq!(report.outcome, ValidationOutcome::default());
        assert!(report.passed);
        assert_eq!(*oracle.calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_missing_sections_fail_under_fail_policy() {
        let (ctx, config, oracle) = (ctx(), config(MissingSectionPolicy::Fail), SmallNumbersOracle::default());
        let orchestrator = PullCheckOrchestrator::new(&ctx, &config, &oracle).unwrap();

        let report = orchestrator.check_body("## Summary\n\nsomething").await.unwrap();
        assert!(!report.passed);
        let message = report.message.unwrap();
        assert!(message.contains("Related Issue"));
        assert!(message.contains("Motivation"));
    }

    #[tokio::test]
    async fn test_invalid_issue_fails() {
        let (ctx, config, oracle) = (ctx(), config(MissingSectionPolicy::Pass), SmallNumbersOracle::default());
        let orchestrator = PullCheckOrchestrator::new(&ctx, &config, &oracle).unwrap();
        let body = "## Related Issue\n\n#500\n\n## Motivation\n\nReduce allocations in the hot path.";

        let report = orchestrator.check_body(body).await.unwrap();
        assert_eq!(report.outcome.issue, SectionStatus::Found(false));
        assert_eq!(report.outcome.content, SectionStatus::Found(true));
        assert!(!report.passed);
    }

    #[tokio::test]
    async fn test_thin_motivation_fails() {
        let (ctx, config, oracle) = (ctx(), config(MissingSectionPolicy::Pass), SmallNumbersOracle::default());
        let orchestrator = PullCheckOrchestrator::new(&ctx, &config, &oracle).unwrap();
        let body = "## Motivation\n\nfix.\n\n## Related Issue\n\n#1";

        let report = orchestrator.check_body(body).await.unwrap();
        assert_eq!(report.outcome.content, SectionStatus::Found(false));
        assert_eq!(report.outcome.issue, SectionStatus::Found(true));
        assert!(!report.passed);
    }

    #[tokio::test]
    async fn test_section_body_stops_at_next_heading() {
        let (ctx, config, oracle) = (ctx(), config(MissingSectionPolicy::Pass), SmallNumbersOracle::default());
        let orchestrator = PullCheckOrchestrator::new(&ctx, &config, &oracle).unwrap();
        // the #7 belongs to the Notes section, not to Related Issue
        let body = "## Related Issue\n\nnone yet\n\n## Notes\n\n#7";

        let report = orchestrator.check_body(body).await.unwrap();
        assert_eq!(report.outcome.issue, SectionStatus::Found(false));
        assert_eq!(*oracle.calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_last_match_wins() {
        let (ctx, config, oracle) = (ctx(), config(MissingSectionPolicy::Pass), SmallNumbersOracle::default());
        let orchestrator = PullCheckOrchestrator::new(&ctx, &config, &oracle).unwrap();
        let body = "## Motivation\n\nok\n\n## Motivation\n\nThe parser dropped trailing lines.";

        let report = orchestrator.check_body(body).await.unwrap();
        assert_eq!(report.outcome.content, SectionStatus::Found(true));
    }

    #[tokio::test]
    async fn test_heading_with_empty_section() {
        let (ctx, config, oracle) = (ctx(), config(MissingSectionPolicy::Pass), SmallNumbersOracle::default());
        let orchestrator = PullCheckOrchestrator::new(&ctx, &config, &oracle).unwrap();

        let report = orchestrator.check_body("Intro\n\n## Motivation").await.unwrap();
        assert_eq!(report.outcome.content, SectionStatus::Found(false));
        assert!(!report.passed);
    }

    #[tokio::test]
    async fn test_label_match_is_exact() {
        let (ctx, config, oracle) = (ctx(), config(MissingSectionPolicy::Pass), SmallNumbersOracle::default());
        let orchestrator = PullCheckOrchestrator::new(&ctx, &config, &oracle).unwrap();

        let report = orchestrator.check_body("## motivation\n\nok").await.unwrap();
        assert_eq!(report.outcome.content, SectionStatus::NotFound);
    }

    #[tokio::test]
    async fn test_paragraph_with_label_text_is_not_a_heading() {
        let (ctx, config, oracle) = (ctx(), config(MissingSectionPolicy::Pass), SmallNumbersOracle::default());
        let orchestrator = PullCheckOrchestrator::new(&ctx, &config, &oracle).unwrap();

        let report = orchestrator.check_body("Motivation\n\nok").await.unwrap();
        assert_eq!(report.outcome.content, SectionStatus::NotFound);
    }

    #[tokio::test]
    async fn test_empty_pull_request_body_is_precondition_error() {
        let (ctx, config, oracle) = (ctx(), config(MissingSectionPolicy::Pass), SmallNumbersOracle::default());
        let orchestrator = PullCheckOrchestrator::new(&ctx, &config, &oracle).unwrap();

        for body in [None, Some("")] {
            let err = orchestrator
                .check_pull_request(&FixedBody(body), 5)
                .await
                .unwrap_err();
            assert!(matches!(
                err.downcast_ref::<PreconditionError>(),
                Some(PreconditionError::EmptyBody(5))
            ));
        }
    }

    #[tokio::test]
    async fn test_whitespace_body_is_checked_not_rejected() {
        let (ctx, config, oracle) = (ctx(), config(MissingSectionPolicy::Pass), SmallNumbersOracle::default());
        let orchestrator = PullCheckOrchestrator::new(&ctx, &config, &oracle).unwrap();

        let report = orchestrator
            .check_pull_request(&FixedBody(Some("  \n")), 5)
            .await
            .unwrap();
        assert_eq!(report.outcome, ValidationOutcome::default());
        assert!(report.passed);
    }

    async fn motivation_status(body: &str) -> SectionStatus {
        let (ctx, config, oracle) = (ctx(), config(MissingSectionPolicy::Pass), SmallNumbersOracle::default());
        let orchestrator = PullCheckOrchestrator::new(&ctx, &config, &oracle).unwrap();
        orchestrator.check_body(body).await.unwrap().outcome.content
    }

    #[tokio::test]
    async fn test_template_comments_only_fail() {
        let body = "## Motivation\n\n<!-- -->\n\n<!-- -->\n\n<!-- -->\n";
        assert_eq!(motivation_status(body).await, SectionStatus::Found(false));

        let body = "## Motivation\n\n<!-- ok -->\n";
        assert_eq!(motivation_status(body).await, SectionStatus::Found(false));
    }

    #[tokio::test]
    async fn test_short_code_block_fails() {
        let body = "## Motivation\n\n```\nab\n```\n";
        assert_eq!(motivation_status(body).await, SectionStatus::Found(false));

        let body = "## Motivation\n\n```\nabc\n```\n";
        assert_eq!(motivation_status(body).await, SectionStatus::Found(true));
    }

    #[tokio::test]
    async fn test_hard_break_adds_no_length() {
        let body = "## Motivation\n\na\\\nb\n";
        assert_eq!(motivation_status(body).await, SectionStatus::Found(false));
    }

    #[tokio::test]
    async fn test_task_marker_counts_toward_length() {
        // "[x] ok" normalizes to "xok"
        let body = "## Motivation\n\n- [x] ok\n";
        assert_eq!(motivation_status(body).await, SectionStatus::Found(true));

        let body = "## Motivation\n\n- [ ] o\n";
        assert_eq!(motivation_status(body).await, SectionStatus::Found(false));
    }

    #[tokio::test]
    async fn test_check_pull_request_uses_fetched_body() {
        let (ctx, config, oracle) = (ctx(), config(MissingSectionPolicy::Pass), SmallNumbersOracle::default());
        let orchestrator = PullCheckOrchestrator::new(&ctx, &config, &oracle).unwrap();
        let source = FixedBody(Some("## Related Issue\n\n#300"));

        let report = orchestrator.check_pull_request(&source, 5).await.unwrap();
        assert_eq!(report.outcome.issue, SectionStatus::Found(false));
        assert!(!report.passed);
    }

    /// Treats lines starting with `> ` as headings and every other line as a paragraph
    struct QuoteHeadings;

    impl DocumentSource for QuoteHeadings {
        fn parse(&self, text: &str) -> Vec<DocumentNode> {
            text.lines()
                .map(|line| match line.strip_prefix("> ") {
                    Some(title) => DocumentNode::Heading {
                        level: 1,
                        text: title.to_string(),
                    },
                    None => DocumentNode::Paragraph {
                        text: line.to_string(),
                    },
                })
                .collect()
        }
    }

    #[tokio::test]
    async fn test_custom_document_source() {
        let (ctx, config, oracle) = (ctx(), config(MissingSectionPolicy::Fail), SmallNumbersOracle::default());
        let orchestrator = PullCheckOrchestrator::new(&ctx, &config, &oracle)
            .unwrap()
            .with_parser(QuoteHeadings);
        let body = "> Related Issue\n#4\n> Motivation\nwhy not";

        let nodes = QuoteHeadings.parse(body);
        assert_eq!(nodes[0].kind(), NodeKind::Heading);

        let report = orchestrator.check_body(body).await.unwrap();
        assert!(report.passed);
    }
}
