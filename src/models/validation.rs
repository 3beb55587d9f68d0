use serde::{Deserialize, Serialize};

/// Result of validating one required section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "valid", rename_all = "snake_case")]
pub enum SectionStatus {
    /// No heading with the configured label was found
    NotFound,
    /// The section was found and validated
    Found(bool),
}

impl SectionStatus {
    /// Whether this section counts as passing under the given policy
    pub fn passes(&self, policy: MissingSectionPolicy) -> bool {
        match self {
            SectionStatus::Found(valid) => *valid,
            SectionStatus::NotFound => policy == MissingSectionPolicy::Pass,
        }
    }

    /// Get display symbol for status
    pub fn symbol(&self) -> &'static str {
        match self {
            SectionStatus::Found(true) => "✅",
            SectionStatus::Found(false) => "❌",
            SectionStatus::NotFound => "➖",
        }
    }
}

/// How a section whose heading is absent from the description is treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MissingSectionPolicy {
    /// A missing section does not fail the check
    #[default]
    Pass,
    /// A missing section fails the check
    Fail,
}

/// The two heading labels a description must carry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionLabels {
    /// Heading whose section must reference a tracked issue
    pub issue: String,
    /// Heading whose section must explain the motivation of the change
    pub content: String,
}

impl SectionLabels {
    pub fn new(issue: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            issue: issue.into(),
            content: content.into(),
        }
    }

    /// Failure message naming both labels verbatim
    pub fn failure_message(&self) -> String {
        format!(
            "please add related issue number(url) under heading `{}` and describe the motive of this PR under heading `{}`",
            self.issue, self.content
        )
    }
}

/// Settings for one check run
#[derive(Debug, Clone)]
pub struct CheckConfig {
    pub labels: SectionLabels,
    pub policy: MissingSectionPolicy,
    /// Print every node and the normalized motivation
    pub verbose: bool,
}

impl CheckConfig {
    pub fn new(labels: SectionLabels) -> Self {
        Self {
            labels,
            policy: MissingSectionPolicy::default(),
            verbose: false,
        }
    }
}

/// Per-section outcome of one scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidationOutcome {
    pub issue: SectionStatus,
    pub content: SectionStatus,
}

impl Default for ValidationOutcome {
    fn default() -> Self {
        Self {
            issue: SectionStatus::NotFound,
            content: SectionStatus::NotFound,
        }
    }
}

impl ValidationOutcome {
    /// Combined result: both sections must pass
    pub fn passed(&self, policy: MissingSectionPolicy) -> bool {
        self.issue.passes(policy) && self.content.passes(policy)
    }
}

/// Final report of a check run
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub outcome: ValidationOutcome,
    pub policy: MissingSectionPolicy,
    pub passed: bool,
    /// Set when the check failed
    pub message: Option<String>,
}

impl Report {
    pub fn new(outcome: ValidationOutcome, policy: MissingSectionPolicy, labels: &SectionLabels) -> Self {
        let passed = outcome.passed(policy);
        Self {
            outcome,
            policy,
            passed,
            message: (!passed).then(|| labels.failure_message()),
        }
    }
}
