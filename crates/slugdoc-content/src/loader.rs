//! Whole-file document loading.

use std::fs;
use std::path::Path;

use crate::error::ContentError;

/// Read the full text of a document.
///
/// Missing, unreadable and non-UTF-8 files all come back as
/// [`ContentError::NotFound`].
pub fn load(path: &Path) -> Result<String, ContentError> {
    fs::read_to_string(path).map_err(|e| {
        tracing::debug!("Failed to read {}: {}", path.display(), e);
        ContentError::NotFound {
            path: path.to_path_buf(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn reads_whole_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("hello.md");
        fs::write(&path, "---\ntitle: Hello\n---\nBody\n").unwrap();

        assert_eq!(load(&path).unwrap(), "---\ntitle: Hello\n---\nBody\n");
    }

    #[test]
    fn missing_file_is_not_found() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("missing.md");

        let err = load(&path).unwrap_err();

        assert!(matches!(err, ContentError::NotFound { path: p } if p == path));
    }

    #[test]
    fn directory_is_not_found() {
        let temp = tempdir().unwrap();

        assert!(matches!(
            load(temp.path()),
            Err(ContentError::NotFound { .. })
        ));
    }

    #[test]
    fn invalid_utf8_is_not_found() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("binary.md");
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        assert!(matches!(load(&path), Err(ContentError::NotFound { .. })));
    }
}
