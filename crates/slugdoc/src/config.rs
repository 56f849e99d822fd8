//! Configuration file (slugdoc.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use slugdoc_content::{Author, AuthorList, ContentRoot, Library, ResolveMode, DEFAULT_MAX_DEPTH};

/// Configuration file structure.
#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    #[serde(default = "default_roots")]
    pub roots: Vec<RootConfig>,

    #[serde(default)]
    pub authors: Vec<Author>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            roots: default_roots(),
            authors: Vec::new(),
        }
    }
}

/// One `[[roots]]` entry.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RootConfig {
    pub name: String,

    pub dir: PathBuf,

    #[serde(default)]
    pub mode: ResolveMode,

    #[serde(default = "default_extension")]
    pub extension: String,

    /// Prepend the landing slug when listing routes
    #[serde(default)]
    pub landing: bool,

    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_roots() -> Vec<RootConfig> {
    vec![
        RootConfig {
            name: "blog".to_string(),
            dir: PathBuf::from("content/blog"),
            mode: ResolveMode::Flat,
            extension: default_extension(),
            landing: false,
            max_depth: default_max_depth(),
        },
        RootConfig {
            name: "docs".to_string(),
            dir: PathBuf::from("content/docs"),
            mode: ResolveMode::IndexFirst,
            extension: default_extension(),
            landing: true,
            max_depth: default_max_depth(),
        },
    ]
}

fn default_extension() -> String {
    "md".to_string()
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl ConfigFile {
    /// Content roots as a library.
    pub fn library(&self) -> Library {
        self.roots.iter().fold(Library::new(), |library, root| {
            library.with_root(
                ContentRoot::new(&root.name, &root.dir)
                    .with_mode(root.mode)
                    .with_extension(&root.extension)
                    .with_max_depth(root.max_depth),
            )
        })
    }

    pub fn authors(&self) -> AuthorList {
        AuthorList::new(self.authors.clone())
    }

    pub fn root(&self, name: &str) -> Option<&RootConfig> {
        self.roots.iter().find(|r| r.name == name)
    }
}

/// Load configuration if the file exists.
/// Returns an error if the config file exists but is malformed.
///
/// Relative root directories are taken relative to the config file.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    let mut config = if path.exists() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = parse_config(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::debug!("Loaded config from {}", path.display());
        config
    } else {
        tracing::debug!("No config at {}, using defaults", path.display());
        ConfigFile::default()
    };

    let base = path.parent().unwrap_or(Path::new(""));
    for root in &mut config.roots {
        if root.dir.is_relative() {
            root.dir = base.join(&root.dir);
        }
    }

    Ok(config)
}

fn parse_config(content: &str) -> Result<ConfigFile> {
    Ok(toml::from_str(content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_roots_and_authors() {
        let config = parse_config(
            r#"
[[roots]]
name = "docs"
dir = "site/docs"
mode = "index-first"
landing = true

[[roots]]
name = "notes"
dir = "site/notes"
extension = "markdown"
max_depth = 4

[[authors]]
name = "Ada"
avatar_url = "https://example.com/ada.png"
"#,
        )
        .unwrap();

        assert_eq!(config.roots.len(), 2);

        let docs = config.root("docs").unwrap();
        assert_eq!(docs.mode, ResolveMode::IndexFirst);
        assert!(docs.landing);
        assert_eq!(docs.extension, "md");

        let notes = config.root("notes").unwrap();
        assert_eq!(notes.mode, ResolveMode::Flat);
        assert_eq!(notes.max_depth, 4);

        let library = config.library();
        assert_eq!(library.root("notes").unwrap().extension(), "markdown");
        assert_eq!(config.authors().len(), 1);
    }

    #[test]
    fn empty_file_uses_default_roots() {
        let config = parse_config("").unwrap();

        let names: Vec<_> = config.roots.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["blog", "docs"]);
        assert!(config.root("docs").unwrap().landing);
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!(parse_config("[[roots]]\nname = \"x\"\ndir = \"x\"\nmode = \"nested\"").is_err());
    }

    #[test]
    fn missing_file_uses_defaults() {
        let config = load_config(Path::new("/nonexistent/slugdoc.toml")).unwrap();

        assert_eq!(config.roots.len(), 2);
        assert!(config.authors.is_empty());
        assert_eq!(
            config.root("blog").unwrap().dir,
            PathBuf::from("/nonexistent/content/blog")
        );
    }
}
