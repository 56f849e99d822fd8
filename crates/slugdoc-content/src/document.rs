//! Opening documents: resolve, load, transform.

use std::path::PathBuf;

use serde::Serialize;
use slugdoc_markdown::{extract_headings, transform_with, Frontmatter, HeadingEntry, Tag, Transformed};

use crate::error::ContentError;
use crate::loader::load;
use crate::meta::DocumentMeta;
use crate::root::ContentRoot;
use crate::slug::Slug;

/// A document read and transformed for one request.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    /// Slug the document was opened with
    pub slug: Slug,

    /// File the slug resolved to
    pub path: PathBuf,

    /// Frontmatter mapping
    pub frontmatter: Frontmatter,

    /// Body tree, `None` when the body is empty
    pub tree: Option<Tag>,
}

impl Document {
    /// Typed view of the well-known frontmatter fields.
    pub fn meta(&self) -> DocumentMeta {
        DocumentMeta::from_frontmatter(&self.frontmatter)
    }

    /// Outline of top-level headings; empty when there is no tree.
    pub fn headings(&self) -> Vec<HeadingEntry> {
        self.tree.as_ref().map(extract_headings).unwrap_or_default()
    }

    /// The tree, or [`ContentError::EmptyDocument`] when there is nothing to render.
    pub fn require_tree(&self) -> Result<&Tag, ContentError> {
        self.tree.as_ref().ok_or_else(|| ContentError::EmptyDocument {
            path: self.path.clone(),
        })
    }
}

/// Resolve `slug` under `root`, read the file and transform it.
///
/// Every call reads the file again; nothing is cached.
pub fn open(root: &ContentRoot, slug: &Slug) -> Result<Document, ContentError> {
    let path = root.resolve(slug);
    let source = load(&path)?;

    let Transformed { frontmatter, tree } = transform_with(&source, root.schema());
    if tree.is_none() {
        tracing::debug!("{} has no body content", path.display());
    }

    Ok(Document {
        slug: slug.clone(),
        path,
        frontmatter,
        tree,
    })
}
