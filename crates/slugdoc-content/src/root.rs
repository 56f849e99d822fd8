//! Content roots: named directories of slug-addressed documents.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use slugdoc_markdown::Schema;

use crate::document::{open, Document};
use crate::enumerate::enumerate_slugs;
use crate::error::ContentError;
use crate::resolver::resolve;
use crate::slug::Slug;

/// Default limit on slug depth when walking a root.
pub const DEFAULT_MAX_DEPTH: usize = 16;

/// How slugs map to files under a root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolveMode {
    /// `<slug>.<ext>` only (blog-style)
    #[default]
    Flat,
    /// `<slug>/index.<ext>` first, then `<slug>.<ext>` (docs-style)
    IndexFirst,
}

/// A named base directory under which documents live.
#[derive(Debug, Clone)]
pub struct ContentRoot {
    name: String,
    dir: PathBuf,
    mode: ResolveMode,
    extension: String,
    max_depth: usize,
    schema: Schema,
}

impl ContentRoot {
    /// Create a flat root for `.md` files.
    pub fn new(name: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            dir: dir.into(),
            mode: ResolveMode::default(),
            extension: "md".to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            schema: Schema::default(),
        }
    }

    pub fn with_mode(mut self, mode: ResolveMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the document file extension (with or without the leading dot).
    pub fn with_extension(mut self, extension: impl AsRef<str>) -> Self {
        self.extension = extension.as_ref().trim_start_matches('.').to_string();
        self
    }

    /// Limit how many segments deep enumeration walks.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Use a custom schema when transforming documents from this root.
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = schema;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn mode(&self) -> ResolveMode {
        self.mode
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// File name of a directory's own document (`index.md`).
    pub fn index_file_name(&self) -> String {
        format!("index.{}", self.extension)
    }

    /// Map a slug to the file that should hold it.
    pub fn resolve(&self, slug: &Slug) -> PathBuf {
        resolve(self, slug)
    }

    /// Every slug addressable under this root.
    pub fn enumerate_slugs(&self) -> BTreeSet<Slug> {
        enumerate_slugs(self)
    }

    /// Resolve, load and transform the document for a slug.
    pub fn open(&self, slug: &Slug) -> Result<Document, ContentError> {
        open(self, slug)
    }
}
