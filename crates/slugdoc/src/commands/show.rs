//! Document inspection command.

use anyhow::{Context, Result};
use slugdoc_content::{AuthorDirectory, Document, Slug};

use crate::commands::outline::outline_lines;
use crate::config::ConfigFile;

/// Run the show command.
pub fn run(config: &ConfigFile, root: &str, slug: &str, json: bool) -> Result<()> {
    let doc = open_document(config, root, slug)?;
    let authors = config.authors();

    if json {
        let value = document_json(&doc, &authors);
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    for line in summary_lines(&doc, &authors) {
        println!("{}", line);
    }

    Ok(())
}

/// Resolve and transform a document named on the command line.
pub fn open_document(config: &ConfigFile, root: &str, slug: &str) -> Result<Document> {
    let slug = Slug::parse(slug).with_context(|| format!("Invalid slug '{}'", slug))?;

    let doc = config
        .library()
        .open(root, &slug)
        .with_context(|| format!("Failed to open '{}' in '{}'", slug, root))?;

    if doc.tree.is_none() {
        tracing::warn!("{} has nothing to render", doc.path.display());
    }

    Ok(doc)
}

fn document_json(doc: &Document, authors: &dyn AuthorDirectory) -> serde_json::Value {
    let meta = doc.meta();
    let author = meta.author_in(authors);

    serde_json::json!({
        "slug": doc.slug,
        "path": doc.path,
        "meta": meta,
        "author": author,
        "frontmatter": doc.frontmatter,
        "headings": doc.headings(),
        "tree": doc.tree,
    })
}

fn summary_lines(doc: &Document, authors: &dyn AuthorDirectory) -> Vec<String> {
    let meta = doc.meta();
    let mut lines = Vec::new();

    lines.push(format!("path:         {}", doc.path.display()));
    if let Some(title) = &meta.title {
        lines.push(format!("title:        {}", title));
    }
    if let Some(name) = &meta.author {
        match meta.author_in(authors).and_then(|a| a.link.as_deref()) {
            Some(link) => lines.push(format!("author:       {} <{}>", name, link)),
            None => lines.push(format!("author:       {}", name)),
        }
    }
    if let Some(published_at) = &meta.published_at {
        lines.push(format!("published_at: {}", published_at));
    }
    if let Some(description) = &meta.description {
        lines.push(format!("description:  {}", description));
    }
    if let Some(image) = &meta.feature_image {
        lines.push(format!("image:        {}", image));
    }

    let outline = outline_lines(&doc.headings());
    if !outline.is_empty() {
        lines.push(String::new());
        lines.extend(outline);
    }

    lines
}
