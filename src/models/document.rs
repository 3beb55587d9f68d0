/// Kind tag of a top-level document block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Heading,
    Paragraph,
    List,
    /// Code blocks, block quotes, HTML blocks, rules
    Other,
}

impl NodeKind {
    /// Get display name for the kind
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Heading => "heading",
            NodeKind::Paragraph => "paragraph",
            NodeKind::List => "list",
            NodeKind::Other => "other",
        }
    }
}

/// A top-level block of a parsed document together with its plain-text projection.
///
/// The projection concatenates every text-bearing leaf under the block
/// (text, inline code, raw HTML, image alt text) without separators, so
/// inline markup like `<img src=x>` survives verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentNode {
    Heading { level: u8, text: String },
    Paragraph { text: String },
    List { text: String },
    Other { text: String },
}

impl DocumentNode {
    pub fn kind(&self) -> NodeKind {
        match self {
            DocumentNode::Heading { .. } => NodeKind::Heading,
            DocumentNode::Paragraph { .. } => NodeKind::Paragraph,
            DocumentNode::List { .. } => NodeKind::List,
            DocumentNode::Other { .. } => NodeKind::Other,
        }
    }

    pub fn is_heading(&self) -> bool {
        matches!(self, DocumentNode::Heading { .. })
    }

    /// Plain-text projection of the node
    pub fn plain_text(&self) -> &str {
        match self {
            DocumentNode::Heading { text, .. }
            | DocumentNode::Paragraph { text }
            | DocumentNode::List { text }
            | DocumentNode::Other { text } => text,
        }
    }

    /// Heading level (1-6), `None` for non-heading nodes
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            DocumentNode::Heading { level, .. } => Some(*level),
            _ => None,
        }
    }
}
