//! A set of content roots addressed by name.

use crate::document::Document;
use crate::error::ContentError;
use crate::root::ContentRoot;
use crate::slug::Slug;

/// Content roots keyed by name, in the order they were added.
#[derive(Debug, Clone, Default)]
pub struct Library {
    roots: Vec<ContentRoot>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a root, replacing any root with the same name.
    pub fn insert(&mut self, root: ContentRoot) {
        match self.roots.iter_mut().find(|r| r.name() == root.name()) {
            Some(existing) => *existing = root,
            None => self.roots.push(root),
        }
    }

    pub fn with_root(mut self, root: ContentRoot) -> Self {
        self.insert(root);
        self
    }

    pub fn root(&self, name: &str) -> Result<&ContentRoot, ContentError> {
        self.roots
            .iter()
            .find(|r| r.name() == name)
            .ok_or_else(|| ContentError::UnknownRoot(name.to_string()))
    }

    pub fn roots(&self) -> impl Iterator<Item = &ContentRoot> {
        self.roots.iter()
    }

    /// Open a document from the named root.
    pub fn open(&self, root: &str, slug: &Slug) -> Result<Document, ContentError> {
        self.root(root)?.open(slug)
    }

    /// Slugs to generate routes for, with the landing slug first when asked.
    pub fn routes(&self, root: &str, include_landing: bool) -> Result<Vec<Slug>, ContentError> {
        let root = self.root(root)?;

        let mut routes = Vec::new();
        if include_landing {
            routes.push(Slug::landing());
        }
        routes.extend(root.enumerate_slugs());

        Ok(routes)
    }
}
