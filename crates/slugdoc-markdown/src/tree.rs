//! Tag tree produced by the transform.

use serde::{Serialize, Serializer};

/// A node in the tag tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Node {
    /// An element with a tag name, attributes and children
    Tag(Tag),
    /// A run of plain text
    Text(String),
}

impl Node {
    pub fn as_tag(&self) -> Option<&Tag> {
        match self {
            Node::Tag(tag) => Some(tag),
            Node::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Tag(_) => None,
            Node::Text(text) => Some(text),
        }
    }

    /// Concatenated text of this node and all of its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Tag(tag) => {
                for child in &tag.children {
                    child.collect_text(out);
                }
            }
        }
    }
}

impl From<Tag> for Node {
    fn from(tag: Tag) -> Self {
        Node::Tag(tag)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

/// An element of the tag tree.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Tag {
    /// Tag name (e.g. "h2", "p", "callout")
    pub name: String,

    /// Attributes in source order
    #[serde(
        serialize_with = "serialize_attributes",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub attributes: Vec<(String, String)>,

    /// Child nodes in document order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Look up an attribute value by name.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Child nodes that are tags, skipping text.
    pub fn child_tags(&self) -> impl Iterator<Item = &Tag> {
        self.children.iter().filter_map(Node::as_tag)
    }

    /// Concatenated text of all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }

    /// Append a child, merging adjacent text runs.
    pub(crate) fn push(&mut self, node: Node) {
        if let Node::Text(text) = &node {
            if let Some(Node::Text(last)) = self.children.last_mut() {
                last.push_str(text);
                return;
            }
        }
        self.children.push(node);
    }
}

fn serialize_attributes<S>(attributes: &[(String, String)], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_map(attributes.iter().map(|(k, v)| (k, v)))
}
