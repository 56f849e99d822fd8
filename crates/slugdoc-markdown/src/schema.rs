//! Node kind to tag name mapping.

use std::collections::HashMap;

/// Kind of a markdown node, as seen by the transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Document,
    /// Heading with level 1-6
    Heading(u8),
    Paragraph,
    BulletList,
    OrderedList,
    Item,
    TaskMarker,
    CodeBlock,
    BlockQuote,
    /// GFM alert block quote (`> [!NOTE]`)
    Callout,
    Table,
    TableHead,
    TableBody,
    TableRow,
    TableHeaderCell,
    TableCell,
    Emphasis,
    Strong,
    Strikethrough,
    InlineCode,
    Link,
    Image,
    Rule,
    HardBreak,
    FootnoteDefinition,
    FootnoteReference,
}

impl NodeKind {
    /// Tag name used when the schema has no override.
    pub fn default_tag(self) -> &'static str {
        match self {
            Self::Document => "article",
            Self::Heading(level) => match level {
                1 => "h1",
                2 => "h2",
                3 => "h3",
                4 => "h4",
                5 => "h5",
                _ => "h6",
            },
            Self::Paragraph => "p",
            Self::BulletList => "ul",
            Self::OrderedList => "ol",
            Self::Item => "li",
            Self::TaskMarker => "input",
            Self::CodeBlock => "pre",
            Self::BlockQuote => "blockquote",
            Self::Callout => "callout",
            Self::Table => "table",
            Self::TableHead => "thead",
            Self::TableBody => "tbody",
            Self::TableRow => "tr",
            Self::TableHeaderCell => "th",
            Self::TableCell => "td",
            Self::Emphasis => "em",
            Self::Strong => "strong",
            Self::Strikethrough => "s",
            Self::InlineCode => "code",
            Self::Link => "a",
            Self::Image => "img",
            Self::Rule => "hr",
            Self::HardBreak => "br",
            Self::FootnoteDefinition => "section",
            Self::FootnoteReference => "sup",
        }
    }
}

/// Document schema: decides which tag each node kind becomes.
///
/// Starts from the built-in table ([`NodeKind::default_tag`]) and accepts
/// overrides, so custom blocks like callouts can be renamed for a renderer
/// (`callout` -> `aside`) or dropped in favour of their children.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    /// `None` means the node is unwrapped and its children spliced into the parent
    overrides: HashMap<NodeKind, Option<String>>,
}

impl Schema {
    /// Create a schema with the built-in table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a node kind to a different tag name.
    pub fn with_tag(mut self, kind: NodeKind, name: impl Into<String>) -> Self {
        self.overrides.insert(kind, Some(name.into()));
        self
    }

    /// Replace nodes of this kind by their children.
    pub fn unwrap(mut self, kind: NodeKind) -> Self {
        self.overrides.insert(kind, None);
        self
    }

    /// Tag name for a node kind, or `None` when the kind is unwrapped.
    pub fn tag_for(&self, kind: NodeKind) -> Option<&str> {
        match self.overrides.get(&kind) {
            Some(Some(name)) => Some(name.as_str()),
            Some(None) => None,
            None => Some(kind.default_tag()),
        }
    }
}
