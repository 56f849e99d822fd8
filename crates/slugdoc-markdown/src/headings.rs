//! Heading outline extraction.

use serde::Serialize;

use crate::tree::{Node, Tag};

/// Tags that make it into the outline. `h1` is the document title and is
/// rendered separately.
pub const OUTLINE_TAGS: [&str; 2] = ["h2", "h3"];

/// A top-level heading, projected for navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadingEntry {
    /// Heading tag name ("h2" or "h3")
    pub tag: String,

    /// Anchor ID, when the heading has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Plain heading text
    pub text: String,

    /// Inline children, for renderers that reproduce formatting
    pub children: Vec<Node>,
}

impl HeadingEntry {
    fn from_tag(tag: &Tag) -> Self {
        Self {
            tag: tag.name.clone(),
            id: tag.attribute("id").map(str::to_string),
            text: tag.text_content(),
            children: tag.children.clone(),
        }
    }

    /// Heading level parsed from the tag name (2 for "h2").
    pub fn level(&self) -> u8 {
        self.tag
            .strip_prefix('h')
            .and_then(|n| n.parse().ok())
            .unwrap_or(0)
    }
}

/// Collect the outline of a document tree.
///
/// Only immediate children of the root are considered, so headings inside
/// lists, quotes or callouts never show up.
pub fn extract_headings(tree: &Tag) -> Vec<HeadingEntry> {
    tree.children
        .iter()
        .filter_map(|node| match node {
            Node::Tag(tag) if OUTLINE_TAGS.contains(&tag.name.as_str()) => {
                Some(HeadingEntry::from_tag(tag))
            }
            Node::Tag(_) | Node::Text(_) => None,
        })
        .collect()
}
