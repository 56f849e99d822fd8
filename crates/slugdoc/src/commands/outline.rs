//! Heading outline command.

use anyhow::Result;
use slugdoc_markdown::HeadingEntry;

use crate::commands::show::open_document;
use crate::config::ConfigFile;

/// Run the outline command.
pub fn run(config: &ConfigFile, root: &str, slug: &str) -> Result<()> {
    let doc = open_document(config, root, slug)?;

    for line in outline_lines(&doc.headings()) {
        println!("{}", line);
    }

    Ok(())
}

/// One line per heading, indented by level below h2.
pub fn outline_lines(headings: &[HeadingEntry]) -> Vec<String> {
    headings
        .iter()
        .map(|heading| {
            let indent = "  ".repeat(usize::from(heading.level().saturating_sub(2)));
            match &heading.id {
                Some(id) => format!("{}- {} (#{})", indent, heading.text, id),
                None => format!("{}- {}", indent, heading.text),
            }
        })
        .collect()
}
