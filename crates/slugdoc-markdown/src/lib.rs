//! Markdown transform with frontmatter and heading outline extraction.
//!
//! This crate parses markdown documents, splits out their YAML frontmatter,
//! turns the body into a tag tree through a configurable schema, and derives
//! a navigation outline from the tree's top-level headings.

pub mod frontmatter;
pub mod headings;
pub mod schema;
pub mod transform;
pub mod tree;

pub use frontmatter::Frontmatter;
pub use headings::{extract_headings, HeadingEntry, OUTLINE_TAGS};
pub use schema::{NodeKind, Schema};
pub use transform::{transform, transform_with, TransformError, Transformed};
pub use tree::{Node, Tag};
