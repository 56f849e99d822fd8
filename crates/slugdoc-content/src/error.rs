//! Error types for content resolution.

use std::path::PathBuf;

/// Errors that can occur when opening documents.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Document not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Document has no renderable content: {}", path.display())]
    EmptyDocument { path: PathBuf },

    #[error("Unknown content root: {0}")]
    UnknownRoot(String),

    #[error(transparent)]
    Slug(#[from] SlugError),
}

/// Errors that can occur when building a slug.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlugError {
    #[error("Invalid slug segment: '{segment}'")]
    InvalidSegment { segment: String },
}
