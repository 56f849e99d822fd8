//! Document metadata and author lookup.

use serde::{Deserialize, Serialize};
use slugdoc_markdown::Frontmatter;

/// The frontmatter fields page collaborators read.
///
/// Missing fields stay `None`; nothing is filled in with placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentMeta {
    pub title: Option<String>,
    pub author: Option<String>,
    pub published_at: Option<String>,
    pub feature_image: Option<String>,
    pub description: Option<String>,
}

impl DocumentMeta {
    pub fn from_frontmatter(frontmatter: &Frontmatter) -> Self {
        Self {
            title: frontmatter.text("title"),
            author: frontmatter.text("author"),
            published_at: frontmatter.text("published_at"),
            feature_image: frontmatter.text("feature_image"),
            description: frontmatter.text("description"),
        }
    }

    /// Look up this document's author in a directory.
    pub fn author_in<'d, D>(&self, directory: &'d D) -> Option<&'d Author>
    where
        D: AuthorDirectory + ?Sized,
    {
        directory.find(self.author.as_deref()?)
    }
}

/// An author as configured for the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,

    #[serde(default)]
    pub avatar_url: Option<String>,

    #[serde(default)]
    pub link: Option<String>,
}

/// Something that can find authors by name.
pub trait AuthorDirectory {
    fn find(&self, name: &str) -> Option<&Author>;
}

/// A flat list of authors matched by exact name.
#[derive(Debug, Clone, Default)]
pub struct AuthorList {
    authors: Vec<Author>,
}

impl AuthorList {
    pub fn new(authors: Vec<Author>) -> Self {
        Self { authors }
    }

    pub fn len(&self) -> usize {
        self.authors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
    }
}

impl AuthorDirectory for AuthorList {
    fn find(&self, name: &str) -> Option<&Author> {
        self.authors.iter().find(|author| author.name == name)
    }
}

impl From<Vec<Author>> for AuthorList {
    fn from(authors: Vec<Author>) -> Self {
        Self::new(authors)
    }
}
