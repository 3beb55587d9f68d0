pub mod document;
pub mod issue;
pub mod validation;

pub use document::{DocumentNode, NodeKind};
pub use issue::{IssueLookup, IssueReference};
pub use validation::{
    CheckConfig, MissingSectionPolicy, Report, SectionLabels, SectionStatus, ValidationOutcome,
};
