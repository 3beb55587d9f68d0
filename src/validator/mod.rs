pub mod content;
pub mod issue;

pub use content::{ContentValidator, MIN_CONTENT_LEN};
pub use issue::IssueValidator;
