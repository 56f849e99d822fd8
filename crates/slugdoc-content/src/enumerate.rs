//! Slug discovery by walking a content root.

use std::collections::BTreeSet;
use std::path::{Component, Path};

use walkdir::{DirEntry, WalkDir};

use crate::root::{ContentRoot, ResolveMode};
use crate::slug::Slug;

/// Collect every slug addressable under `root`.
///
/// Walks in file-name order without following symlinked directories, skips
/// hidden entries, and stops descending at the root's depth limit. In
/// [`ResolveMode::IndexFirst`] a directory with an index file is a slug of its
/// own, and the root's index is left for the caller to add as the landing
/// slug. In [`ResolveMode::Flat`] every document file, index files included,
/// is listed under its own name so it resolves back to the same file.
pub fn enumerate_slugs(root: &ContentRoot) -> BTreeSet<Slug> {
    let mut slugs = BTreeSet::new();

    if !root.dir().is_dir() {
        tracing::warn!(
            "Content root '{}' not found: {}",
            root.name(),
            root.dir().display()
        );
        return slugs;
    }

    let index_name = root.index_file_name();
    let mut walker = WalkDir::new(root.dir())
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

    while let Some(entry) = walker.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable entry in '{}': {}", root.name(), e);
                continue;
            }
        };

        let Ok(relative) = entry.path().strip_prefix(root.dir()) else {
            continue;
        };

        if entry.file_type().is_dir() {
            if root.mode() == ResolveMode::IndexFirst && entry.path().join(&index_name).is_file() {
                insert(&mut slugs, root, relative, false);
            }
            if entry.depth() >= root.max_depth() {
                tracing::warn!(
                    "Not descending into {}: deeper than {} segments",
                    entry.path().display(),
                    root.max_depth()
                );
                walker.skip_current_dir();
            }
            continue;
        }

        if !is_document(&entry, root.extension()) {
            continue;
        }

        if root.mode() == ResolveMode::IndexFirst && entry.file_name() == index_name.as_str() {
            continue;
        }

        insert(&mut slugs, root, relative, true);
    }

    tracing::debug!("Found {} slugs in '{}'", slugs.len(), root.name());
    slugs
}

fn insert(slugs: &mut BTreeSet<Slug>, root: &ContentRoot, relative: &Path, strip_extension: bool) {
    match slug_from_path(relative, strip_extension) {
        Some(slug) => {
            slugs.insert(slug);
        }
        None => tracing::warn!(
            "Skipping {} in '{}': not a valid slug",
            relative.display(),
            root.name()
        ),
    }
}

fn slug_from_path(relative: &Path, strip_extension: bool) -> Option<Slug> {
    let mut segments = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(name) => segments.push(name.to_str()?.to_string()),
            _ => return None,
        }
    }

    if strip_extension {
        let stem = relative.file_stem()?.to_str()?;
        *segments.last_mut()? = stem.to_string();
    }

    Slug::new(segments).ok()
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

fn is_document(entry: &DirEntry, extension: &str) -> bool {
    // Symlinked files count when they point at a regular file
    let is_file = entry.file_type().is_file()
        || (entry.path_is_symlink() && entry.path().is_file());

    is_file && entry.path().extension().is_some_and(|e| e == extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    fn write(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "# Doc").unwrap();
    }

    fn docs_tree() -> TempDir {
        let temp = tempdir().unwrap();
        for file in [
            "index.md",
            "intro.md",
            "guides/index.md",
            "guides/auth.md",
            "guides/deploy/index.md",
            "guides/deploy/docker.md",
            "reference/api.md",
            "notes.txt",
            ".drafts/secret.md",
            ".hidden.md",
        ] {
            write(temp.path(), file);
        }
        temp
    }

    fn rendered(slugs: &BTreeSet<Slug>) -> Vec<String> {
        slugs.iter().map(Slug::to_string).collect()
    }

    #[test]
    fn index_first_lists_sections_and_files() {
        let temp = docs_tree();
        let root = ContentRoot::new("docs", temp.path()).with_mode(ResolveMode::IndexFirst);

        assert_eq!(
            rendered(&enumerate_slugs(&root)),
            vec![
                "guides",
                "guides/auth",
                "guides/deploy",
                "guides/deploy/docker",
                "intro",
                "reference/api",
            ]
        );
    }

    #[test]
    fn flat_lists_index_files_by_name() {
        let temp = docs_tree();
        let root = ContentRoot::new("blog", temp.path());

        assert_eq!(
            rendered(&enumerate_slugs(&root)),
            vec![
                "guides/auth",
                "guides/deploy/docker",
                "guides/deploy/index",
                "guides/index",
                "index",
                "intro",
                "reference/api",
            ]
        );
    }

    #[test]
    fn enumerated_slugs_resolve_to_existing_files() {
        let temp = docs_tree();

        for mode in [ResolveMode::Flat, ResolveMode::IndexFirst] {
            let root = ContentRoot::new("docs", temp.path()).with_mode(mode);
            for slug in enumerate_slugs(&root) {
                assert!(root.resolve(&slug).is_file(), "{slug} in {mode:?}");
            }
        }
    }

    #[test]
    fn enumeration_is_stable() {
        let temp = docs_tree();
        let root = ContentRoot::new("docs", temp.path()).with_mode(ResolveMode::IndexFirst);

        let first: Vec<_> = enumerate_slugs(&root).into_iter().collect();
        let second: Vec<_> = enumerate_slugs(&root).into_iter().collect();

        assert_eq!(first, second);
    }

    #[test]
    fn respects_depth_limit() {
        let temp = docs_tree();
        let root = ContentRoot::new("docs", temp.path())
            .with_mode(ResolveMode::IndexFirst)
            .with_max_depth(1);

        assert_eq!(
            rendered(&enumerate_slugs(&root)),
            vec!["guides", "intro"]
        );
    }

    #[test]
    fn missing_root_is_empty() {
        let root = ContentRoot::new("docs", "/nonexistent/docs");

        assert!(enumerate_slugs(&root).is_empty());
    }

    #[test]
    fn file_and_section_with_same_slug_collapse() {
        let temp = tempdir().unwrap();
        write(temp.path(), "setup.md");
        write(temp.path(), "setup/index.md");

        let root = ContentRoot::new("docs", temp.path()).with_mode(ResolveMode::IndexFirst);

        assert_eq!(rendered(&enumerate_slugs(&root)), vec!["setup"]);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directory_loop_is_not_followed() {
        let temp = tempdir().unwrap();
        write(temp.path(), "a/index.md");
        write(temp.path(), "a/x.md");
        std::os::unix::fs::symlink(temp.path().join("a"), temp.path().join("a/loop")).unwrap();

        let root = ContentRoot::new("docs", temp.path()).with_mode(ResolveMode::IndexFirst);

        assert_eq!(rendered(&enumerate_slugs(&root)), vec!["a", "a/x"]);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_file_is_a_document() {
        let shared = tempdir().unwrap();
        write(shared.path(), "changelog.md");
        let temp = tempdir().unwrap();
        write(temp.path(), "intro.md");
        std::os::unix::fs::symlink(
            shared.path().join("changelog.md"),
            temp.path().join("changelog.md"),
        )
        .unwrap();

        let root = ContentRoot::new("blog", temp.path());
        let slugs = enumerate_slugs(&root);

        assert_eq!(rendered(&slugs), vec!["changelog", "intro"]);
        for slug in &slugs {
            assert!(root.resolve(slug).is_file());
        }
    }
}
