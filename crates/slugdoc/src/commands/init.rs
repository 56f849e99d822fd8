//! Initialize a content layout next to the config file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing slugdoc...");

    let base = config_path.parent().unwrap_or(Path::new(""));

    write_file(config_path, DEFAULT_CONFIG, yes)?;
    write_file(&base.join("content/docs/index.md"), DEFAULT_DOCS_INDEX, yes)?;
    write_file(
        &base.join("content/docs/guides/index.md"),
        DEFAULT_GUIDES_INDEX,
        yes,
    )?;
    write_file(
        &base.join("content/docs/guides/writing.md"),
        DEFAULT_WRITING_GUIDE,
        yes,
    )?;
    write_file(
        &base.join("content/blog/hello-world.md"),
        DEFAULT_BLOG_POST,
        yes,
    )?;

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'slugdoc routes' to list the generated routes.");

    Ok(())
}

fn write_file(path: &Path, contents: &str, overwrite: bool) -> Result<()> {
    if path.exists() && !overwrite {
        tracing::warn!("{} already exists. Use --yes to overwrite.", path.display());
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Created {}", path.display());

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# Slugdoc configuration

[[roots]]
name = "blog"
dir = "content/blog"
# Posts are addressed by file name only
mode = "flat"

[[roots]]
name = "docs"
dir = "content/docs"
# Sections can have their own page at <section>/index.md
mode = "index-first"
# List the docs landing page (content/docs/index.md) as a route
landing = true

[[authors]]
name = "Your Name"
"#;

const DEFAULT_DOCS_INDEX: &str = r#"---
title: Documentation
---

Start with the [guides](/docs/guides).
"#;

const DEFAULT_GUIDES_INDEX: &str = r#"---
title: Guides
description: Task-oriented guides
---

## Available guides

- [Writing documents](/docs/guides/writing)
"#;

const DEFAULT_WRITING_GUIDE: &str = r#"---
title: Writing documents
author: Your Name
---

Each document starts with a frontmatter block.

## Frontmatter

```yaml
title: Page title
author: Your Name
published_at: 2024-01-01
```

## Callouts

> [!TIP]
> Block quotes starting with `[!TIP]`, `[!NOTE]` or `[!WARNING]` become callouts.

### Outline

Top-level `##` and `###` headings make up the page outline.
"#;

const DEFAULT_BLOG_POST: &str = r#"---
title: Hello, world
author: Your Name
published_at: 2024-01-01
description: The first post
---

## Introduction

Posts live directly under `content/blog`, addressed by their file name.
"#;
