//! Slugs: path-segment identifiers for documents.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::SlugError;

/// Ordered path segments identifying a document within a content root.
///
/// The empty slug is the root's landing page. Slugs order lexicographically
/// by segment, which keeps enumerated route lists stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Slug(Vec<String>);

impl Slug {
    /// The zero-segment slug addressing a root's own index document.
    pub fn landing() -> Self {
        Self::default()
    }

    /// Build a slug from segments, rejecting empty names and traversal tokens.
    pub fn new<I, S>(segments: I) -> Result<Self, SlugError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments = segments
            .into_iter()
            .map(|segment| {
                let segment = segment.into();
                if is_valid_segment(&segment) {
                    Ok(segment)
                } else {
                    Err(SlugError::InvalidSegment { segment })
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self(segments))
    }

    /// Parse a `/`-separated slug such as `guides/auth`.
    ///
    /// Leading and trailing slashes are ignored; an empty string is the
    /// landing slug.
    pub fn parse(path: &str) -> Result<Self, SlugError> {
        let trimmed = path.trim_matches('/');
        if trimmed.is_empty() {
            return Ok(Self::landing());
        }
        Self::new(trimmed.split('/'))
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_landing(&self) -> bool {
        self.0.is_empty()
    }
}

fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains(['/', '\\', '\0'])
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

impl FromStr for Slug {
    type Err = SlugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
