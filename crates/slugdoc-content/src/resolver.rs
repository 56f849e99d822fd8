//! Slug to file path resolution.

use std::path::PathBuf;

use crate::root::{ContentRoot, ResolveMode};
use crate::slug::Slug;

/// Map a slug to a file path under `root`.
///
/// In [`ResolveMode::IndexFirst`] the directory's `index` file wins when it
/// exists; otherwise, and always in [`ResolveMode::Flat`], the path is
/// `<segments>.<ext>`. The landing slug maps to the root's own index file.
/// Nothing is checked beyond the index probe: a missing file is reported
/// when the path is loaded.
pub fn resolve(root: &ContentRoot, slug: &Slug) -> PathBuf {
    let Some((last, parents)) = slug.segments().split_last() else {
        return root.dir().join(root.index_file_name());
    };

    let mut dir = root.dir().to_path_buf();
    dir.extend(parents);

    if root.mode() == ResolveMode::IndexFirst {
        let index = dir.join(last).join(root.index_file_name());
        if index.is_file() {
            tracing::debug!("Resolved '{}' to section index {}", slug, index.display());
            return index;
        }
    }

    let path = dir.join(format!("{}.{}", last, root.extension()));
    tracing::debug!("Resolved '{}' to {}", slug, path.display());
    path
}
