use crate::models::DocumentNode;

/// A section found under a matched heading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Index of the heading node
    pub heading_index: usize,
    /// Exclusive end of the section body (index of the next unconsumed node)
    pub end: usize,
    /// Plain text of the body nodes joined by single spaces
    pub body: String,
}

impl Section {
    /// Collect the section that follows the heading at `heading_index`
    pub fn after_heading(nodes: &[DocumentNode], heading_index: usize) -> Self {
        let (end, body) = extract_from(nodes, heading_index + 1);
        Self {
            heading_index,
            end,
            body,
        }
    }
}

/// Concatenate the plain text of every node from `start` up to the next heading.
///
/// Returns the exclusive end of the consumed span and the joined text. The
/// heading that stops the scan is neither consumed nor included. A `start`
/// at or past the end of `nodes` yields an empty body.
pub fn extract_from(nodes: &[DocumentNode], start: usize) -> (usize, String) {
    let mut body = String::new();
    let mut end = start;

    while let Some(node) = nodes.get(end) {
        if node.is_heading() {
            break;
        }
        if end > start {
            body.push(' ');
        }
        body.push_str(node.plain_text());
        end += 1;
    }

    (end, body)
}
