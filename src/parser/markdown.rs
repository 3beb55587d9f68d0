use crate::models::DocumentNode;
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// Capability needed from a structured-text parser: an ordered sequence of
/// top-level nodes, each knowing its kind and plain-text projection.
pub trait DocumentSource {
    fn parse(&self, text: &str) -> Vec<DocumentNode>;
}

/// Markdown parser backed by pulldown-cmark.
///
/// Only top-level blocks become nodes. A list or block quote is one node
/// whose text concatenates everything nested inside it.
#[derive(Debug, Clone, Copy)]
pub struct MarkdownParser {
    options: Options,
}

impl MarkdownParser {
    /// Plain CommonMark parser. Extension syntax such as `[x]` task markers
    /// and `[^1]` footnote references stays literal text.
    pub fn new() -> Self {
        Self {
            options: Options::empty(),
        }
    }
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Block being accumulated while walking the event stream
enum OpenBlock {
    Heading(u8),
    Paragraph,
    List,
    Other,
}

impl OpenBlock {
    fn from_tag(tag: &Tag<'_>) -> Self {
        match tag {
            Tag::Heading { level, .. } => OpenBlock::Heading(*level as u8),
            Tag::Paragraph => OpenBlock::Paragraph,
            Tag::List(_) => OpenBlock::List,
            _ => OpenBlock::Other,
        }
    }

    fn finish(self, text: String) -> DocumentNode {
        match self {
            OpenBlock::Heading(level) => DocumentNode::Heading { level, text },
            OpenBlock::Paragraph => DocumentNode::Paragraph { text },
            OpenBlock::List => DocumentNode::List { text },
            OpenBlock::Other => DocumentNode::Other { text },
        }
    }
}

impl DocumentSource for MarkdownParser {
    fn parse(&self, text: &str) -> Vec<DocumentNode> {
        let mut nodes = Vec::new();
        let mut depth = 0usize;
        let mut open: Option<OpenBlock> = None;
        let mut buffer = String::new();

        for event in Parser::new_ext(text, self.options) {
            match event {
                Event::Start(tag) => {
                    if depth == 0 {
                        open = Some(OpenBlock::from_tag(&tag));
                        buffer.clear();
                    }
                    depth += 1;
                }
                Event::End(tag) => {
                    // block code and HTML values exclude their closing line ending
                    if matches!(tag, TagEnd::CodeBlock | TagEnd::HtmlBlock)
                        && buffer.ends_with('\n')
                    {
                        buffer.pop();
                    }
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        if let Some(block) = open.take() {
                            nodes.push(block.finish(std::mem::take(&mut buffer)));
                        }
                    }
                }
                Event::Text(value)
                | Event::Code(value)
                | Event::Html(value)
                | Event::InlineHtml(value) => buffer.push_str(&value),
                Event::SoftBreak => buffer.push('\n'),
                Event::Rule if depth == 0 => nodes.push(DocumentNode::Other {
                    text: String::new(),
                }),
                _ => {}
            }
        }

        nodes
    }
}
