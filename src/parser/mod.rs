pub mod markdown;
pub mod section;

pub use markdown::{DocumentSource, MarkdownParser};
pub use section::{extract_from, Section};
