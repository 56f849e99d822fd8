//! Slug-addressed markdown content on disk.
//!
//! Maps slugs to files under named content roots, loads and transforms the
//! documents, and enumerates every slug a root can serve for route
//! generation.

pub mod document;
pub mod enumerate;
pub mod error;
pub mod library;
pub mod loader;
pub mod meta;
pub mod resolver;
pub mod root;
pub mod slug;

pub use document::{open, Document};
pub use enumerate::enumerate_slugs;
pub use error::{ContentError, SlugError};
pub use library::Library;
pub use loader::load;
pub use meta::{Author, AuthorDirectory, AuthorList, DocumentMeta};
pub use resolver::resolve;
pub use root::{ContentRoot, ResolveMode, DEFAULT_MAX_DEPTH};
pub use slug::Slug;
