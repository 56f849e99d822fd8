//! Markdown to tag tree transform.

use std::collections::HashSet;

use pulldown_cmark::{
    Alignment, BlockQuoteKind, CodeBlockKind, Event, Options, Parser, Tag as MdTag, TagEnd,
};

use crate::frontmatter::{parse_block, Frontmatter};
use crate::schema::{NodeKind, Schema};
use crate::tree::{Node, Tag};

/// Result of transforming one document.
///
/// Frontmatter and tree come out of the same parser pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Transformed {
    /// Parsed frontmatter (empty when the document has none)
    pub frontmatter: Frontmatter,

    /// Document tree, `None` when there is nothing to render
    pub tree: Option<Tag>,
}

impl Transformed {
    /// The tree, or [`TransformError::EmptyDocument`] when there is none.
    pub fn require_tree(&self) -> Result<&Tag, TransformError> {
        self.tree.as_ref().ok_or(TransformError::EmptyDocument)
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_none()
    }
}

/// Errors that can occur when transforming markdown.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransformError {
    #[error("Document has no renderable content")]
    EmptyDocument,
}

/// Transform markdown with the built-in schema.
pub fn transform(source: &str) -> Transformed {
    transform_with(source, &Schema::default())
}

/// Transform markdown, mapping node kinds to tags through `schema`.
pub fn transform_with(source: &str, schema: &Schema) -> Transformed {
    let parser = Parser::new_ext(strip_empty_frontmatter(source), parser_options());

    let mut builder = TreeBuilder::new(schema);
    for event in parser {
        builder.event(event);
    }

    builder.finish()
}

/// An empty `---`/`---` block at the top is not a metadata block to the
/// parser, which would read it as two rules.
fn strip_empty_frontmatter(source: &str) -> &str {
    let mut lines = source.split_inclusive('\n');
    match (lines.next(), lines.next()) {
        (Some(open), Some(close)) if open.trim_end() == "---" && close.trim_end() == "---" => {
            &source[open.len() + close.len()..]
        }
        _ => source,
    }
}

fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_HEADING_ATTRIBUTES
        | Options::ENABLE_YAML_STYLE_METADATA_BLOCKS
        | Options::ENABLE_GFM
}

/// An element being built. Unnamed frames splice their children into the parent.
struct Frame {
    kind: Option<NodeKind>,
    named: bool,
    tag: Tag,
}

#[derive(Default)]
struct TableState {
    alignments: Vec<Alignment>,
    in_head: bool,
    body_open: bool,
    cell: usize,
}

struct TreeBuilder<'s> {
    schema: &'s Schema,
    root: Frame,
    stack: Vec<Frame>,
    tables: Vec<TableState>,
    metadata: Option<String>,
    in_metadata: bool,
    heading_ids: HashSet<String>,
}

impl<'s> TreeBuilder<'s> {
    fn new(schema: &'s Schema) -> Self {
        let root = Self::frame(schema, Some(NodeKind::Document), Vec::new());
        Self {
            schema,
            root,
            stack: Vec::new(),
            tables: Vec::new(),
            metadata: None,
            in_metadata: false,
            heading_ids: HashSet::new(),
        }
    }

    fn frame(schema: &Schema, kind: Option<NodeKind>, attributes: Vec<(String, String)>) -> Frame {
        let name = kind.and_then(|k| schema.tag_for(k));
        Frame {
            kind,
            named: name.is_some(),
            tag: Tag {
                name: name.unwrap_or_default().to_string(),
                attributes,
                children: Vec::new(),
            },
        }
    }

    fn current(&mut self) -> &mut Tag {
        match self.stack.last_mut() {
            Some(frame) => &mut frame.tag,
            None => &mut self.root.tag,
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(end) => self.end(end),
            Event::Text(text) => {
                if self.in_metadata {
                    self.metadata.get_or_insert_with(String::new).push_str(&text);
                } else {
                    self.text(&text);
                }
            }
            Event::Code(code) => {
                self.open(NodeKind::InlineCode, Vec::new());
                self.text(&code);
                self.close();
            }
            // Raw HTML is carried as text, never interpreted
            Event::Html(html) | Event::InlineHtml(html) => self.text(&html),
            Event::SoftBreak => self.text(" "),
            Event::HardBreak => self.leaf(NodeKind::HardBreak, Vec::new()),
            Event::Rule => self.leaf(NodeKind::Rule, Vec::new()),
            Event::TaskListMarker(done) => {
                let mut attributes = attrs(&[("type", "checkbox")]);
                if done {
                    attributes.push(("checked".to_string(), String::new()));
                }
                attributes.push(("disabled".to_string(), String::new()));
                self.leaf(NodeKind::TaskMarker, attributes);
            }
            Event::FootnoteReference(label) => {
                let attributes = vec![
                    ("class".to_string(), "footnote-ref".to_string()),
                    ("href".to_string(), format!("#fn-{}", label)),
                ];
                self.open(NodeKind::FootnoteReference, attributes);
                self.text(&label);
                self.close();
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: MdTag<'_>) {
        match tag {
            MdTag::Paragraph => self.open(NodeKind::Paragraph, Vec::new()),

            MdTag::Heading {
                level,
                id,
                classes,
                attrs: extra,
            } => {
                let mut attributes = Vec::new();
                if let Some(id) = id {
                    attributes.push(("id".to_string(), id.to_string()));
                }
                if !classes.is_empty() {
                    let classes: Vec<&str> = classes.iter().map(|c| c.as_ref()).collect();
                    attributes.push(("class".to_string(), classes.join(" ")));
                }
                for (key, value) in extra {
                    let value = value.map(|v| v.to_string()).unwrap_or_default();
                    attributes.push((key.to_string(), value));
                }
                self.open(NodeKind::Heading(level as u8), attributes);
            }

            MdTag::BlockQuote(Some(kind)) => {
                self.open(NodeKind::Callout, attrs(&[("type", callout_type(kind))]));
            }
            MdTag::BlockQuote(None) => self.open(NodeKind::BlockQuote, Vec::new()),

            MdTag::CodeBlock(kind) => {
                let attributes = match &kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .map(|lang| attrs(&[("data-language", lang)]))
                        .unwrap_or_default(),
                    CodeBlockKind::Indented => Vec::new(),
                };
                self.open(NodeKind::CodeBlock, attributes);
            }

            MdTag::List(None) => self.open(NodeKind::BulletList, Vec::new()),
            MdTag::List(Some(start)) => {
                let attributes = if start == 1 {
                    Vec::new()
                } else {
                    vec![("start".to_string(), start.to_string())]
                };
                self.open(NodeKind::OrderedList, attributes);
            }
            MdTag::Item => self.open(NodeKind::Item, Vec::new()),

            MdTag::FootnoteDefinition(label) => {
                let attributes = vec![
                    ("class".to_string(), "footnote".to_string()),
                    ("id".to_string(), format!("fn-{}", label)),
                ];
                self.open(NodeKind::FootnoteDefinition, attributes);
            }

            MdTag::Table(alignments) => {
                self.tables.push(TableState {
                    alignments,
                    ..TableState::default()
                });
                self.open(NodeKind::Table, Vec::new());
            }
            MdTag::TableHead => {
                if let Some(state) = self.tables.last_mut() {
                    state.in_head = true;
                    state.cell = 0;
                }
                // Head cells arrive without a row of their own
                self.open(NodeKind::TableHead, Vec::new());
                self.open(NodeKind::TableRow, Vec::new());
            }
            MdTag::TableRow => {
                let open_body = match self.tables.last_mut() {
                    Some(state) => {
                        state.cell = 0;
                        !std::mem::replace(&mut state.body_open, true)
                    }
                    None => false,
                };
                if open_body {
                    self.open(NodeKind::TableBody, Vec::new());
                }
                self.open(NodeKind::TableRow, Vec::new());
            }
            MdTag::TableCell => {
                let (kind, alignment) = match self.tables.last_mut() {
                    Some(state) => {
                        let alignment = state.alignments.get(state.cell).copied();
                        state.cell += 1;
                        let kind = if state.in_head {
                            NodeKind::TableHeaderCell
                        } else {
                            NodeKind::TableCell
                        };
                        (kind, alignment)
                    }
                    None => (NodeKind::TableCell, None),
                };
                let attributes = match alignment.and_then(alignment_name) {
                    Some(align) => attrs(&[("align", align)]),
                    None => Vec::new(),
                };
                self.open(kind, attributes);
            }

            MdTag::Emphasis => self.open(NodeKind::Emphasis, Vec::new()),
            MdTag::Strong => self.open(NodeKind::Strong, Vec::new()),
            MdTag::Strikethrough => self.open(NodeKind::Strikethrough, Vec::new()),

            MdTag::Link {
                dest_url, title, ..
            } => {
                let mut attributes = attrs(&[("href", &*dest_url)]);
                if !title.is_empty() {
                    attributes.push(("title".to_string(), title.to_string()));
                }
                self.open(NodeKind::Link, attributes);
            }
            MdTag::Image {
                dest_url, title, ..
            } => {
                let mut attributes = attrs(&[("src", &*dest_url)]);
                if !title.is_empty() {
                    attributes.push(("title".to_string(), title.to_string()));
                }
                self.open(NodeKind::Image, attributes);
            }

            MdTag::MetadataBlock(_) => self.in_metadata = true,

            // HTML blocks and anything the schema has no kind for
            _ => self.open_transparent(),
        }
    }

    fn end(&mut self, end: TagEnd) {
        match end {
            TagEnd::MetadataBlock(_) => self.in_metadata = false,
            TagEnd::TableHead => {
                if let Some(state) = self.tables.last_mut() {
                    state.in_head = false;
                }
                self.close();
                self.close();
            }
            TagEnd::Table => {
                if let Some(state) = self.tables.pop() {
                    if state.body_open {
                        self.close();
                    }
                }
                self.close();
            }
            _ => self.close(),
        }
    }

    fn open(&mut self, kind: NodeKind, attributes: Vec<(String, String)>) {
        let frame = Self::frame(self.schema, Some(kind), attributes);
        self.stack.push(frame);
    }

    fn open_transparent(&mut self) {
        let frame = Self::frame(self.schema, None, Vec::new());
        self.stack.push(frame);
    }

    fn leaf(&mut self, kind: NodeKind, attributes: Vec<(String, String)>) {
        self.open(kind, attributes);
        self.close();
    }

    fn text(&mut self, text: &str) {
        self.current().push(Node::Text(text.to_string()));
    }

    fn close(&mut self) {
        let Some(mut frame) = self.stack.pop() else {
            return;
        };

        if frame.named {
            match frame.kind {
                Some(NodeKind::Heading(_)) => self.assign_heading_id(&mut frame.tag),
                Some(NodeKind::Image) => {
                    // Alt text arrives as children; images carry it as an attribute
                    let alt = frame.tag.text_content();
                    frame.tag.children.clear();
                    let at = frame.tag.attributes.len().min(1);
                    frame.tag.attributes.insert(at, ("alt".to_string(), alt));
                }
                _ => {}
            }
        }

        let parent = self.current();
        if frame.named {
            parent.push(Node::Tag(frame.tag));
        } else {
            for child in frame.tag.children {
                parent.push(child);
            }
        }
    }

    /// Give a heading a unique `id`, derived from its text unless set explicitly.
    fn assign_heading_id(&mut self, tag: &mut Tag) {
        let base = match tag.attribute("id") {
            Some(id) => id.to_string(),
            None => slugify(&tag.text_content()),
        };
        if base.is_empty() {
            return;
        }

        let mut id = base.clone();
        let mut suffix = 0;
        while self.heading_ids.contains(&id) {
            suffix += 1;
            id = format!("{}-{}", base, suffix);
        }
        self.heading_ids.insert(id.clone());

        match tag.attributes.iter_mut().find(|(k, _)| k == "id") {
            Some(slot) => slot.1 = id,
            None => tag.attributes.insert(0, ("id".to_string(), id)),
        }
    }

    fn finish(mut self) -> Transformed {
        while !self.stack.is_empty() {
            self.close();
        }

        let frontmatter = self
            .metadata
            .as_deref()
            .map(parse_block)
            .unwrap_or_default();

        let tree = if self.root.named && !self.root.tag.children.is_empty() {
            Some(self.root.tag)
        } else {
            None
        };

        Transformed { frontmatter, tree }
    }
}

fn attrs(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn callout_type(kind: BlockQuoteKind) -> &'static str {
    match kind {
        BlockQuoteKind::Note => "note",
        BlockQuoteKind::Tip => "tip",
        BlockQuoteKind::Important => "important",
        BlockQuoteKind::Warning => "warning",
        BlockQuoteKind::Caution => "caution",
    }
}

fn alignment_name(alignment: Alignment) -> Option<&'static str> {
    match alignment {
        Alignment::None => None,
        Alignment::Left => Some("left"),
        Alignment::Center => Some("center"),
        Alignment::Right => Some("right"),
    }
}

/// Anchor id for heading text: lowercase alphanumeric runs joined by single dashes.
fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut separated = false;

    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            if separated && !slug.is_empty() {
                slug.push('-');
            }
            separated = false;
            slug.push(c);
        } else if c.is_whitespace() || c == '-' || c == '_' {
            separated = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn children(source: &str) -> Vec<Node> {
        transform(source).tree.unwrap().children
    }

    #[test]
    fn splits_frontmatter_from_body() {
        let doc = transform("---\ntitle: Hello\n---\n## Intro\ntext");

        assert_eq!(doc.frontmatter.get_str("title"), Some("Hello"));
        assert_eq!(doc.frontmatter.len(), 1);

        let tree = doc.tree.unwrap();
        assert_eq!(tree.name, "article");
        assert_eq!(
            tree.children,
            vec![
                Tag::new("h2")
                    .with_attribute("id", "intro")
                    .with_child("Intro")
                    .into(),
                Tag::new("p").with_child("text").into(),
            ]
        );
    }

    #[test]
    fn frontmatter_only_is_empty_document() {
        let doc = transform("---\ntitle: T\n---\n");

        assert_eq!(doc.frontmatter.get_str("title"), Some("T"));
        assert!(doc.is_empty());
        assert_eq!(doc.require_tree(), Err(TransformError::EmptyDocument));
    }

    #[test]
    fn empty_source_is_empty_document() {
        let doc = transform("");

        assert!(doc.frontmatter.is_empty());
        assert!(doc.tree.is_none());
    }

    #[test]
    fn parses_without_frontmatter() {
        let nodes = children("# Title\n\nSome *em* and **strong**.");

        assert!(transform("# Title").frontmatter.is_empty());
        assert_eq!(
            nodes[1],
            Tag::new("p")
                .with_child("Some ")
                .with_child(Tag::new("em").with_child("em"))
                .with_child(" and ")
                .with_child(Tag::new("strong").with_child("strong"))
                .with_child(".")
                .into()
        );
    }

    #[test]
    fn recovers_malformed_frontmatter() {
        let doc = transform("---\ntitle: Hi\ntags: [a\n---\nBody");

        assert_eq!(doc.frontmatter.get_str("title"), Some("Hi"));
        assert!(!doc.frontmatter.contains_key("tags"));
        assert!(doc.tree.is_some());
    }

    #[test]
    fn transforms_callouts() {
        let nodes = children("> [!WARNING]\n> Careful here");

        let callout = nodes[0].as_tag().unwrap();
        assert_eq!(callout.name, "callout");
        assert_eq!(callout.attribute("type"), Some("warning"));
        assert_eq!(callout.text_content().trim(), "Careful here");
    }

    #[test]
    fn plain_blockquote_stays_blockquote() {
        let nodes = children("> quoted");

        assert_eq!(nodes[0].as_tag().unwrap().name, "blockquote");
    }

    #[test]
    fn transforms_fenced_code() {
        let nodes = children("```rust\nfn main() {}\n```");

        assert_eq!(
            nodes[0],
            Tag::new("pre")
                .with_attribute("data-language", "rust")
                .with_child("fn main() {}\n")
                .into()
        );
    }

    #[test]
    fn images_carry_alt_as_attribute() {
        let nodes = children("![A cat](/cat.png \"Cat\")");

        let p = nodes[0].as_tag().unwrap();
        assert_eq!(
            p.children,
            vec![Tag::new("img")
                .with_attribute("src", "/cat.png")
                .with_attribute("alt", "A cat")
                .with_attribute("title", "Cat")
                .into()]
        );
    }

    #[test]
    fn ordered_list_keeps_start() {
        let nodes = children("3. three\n4. four");

        let list = nodes[0].as_tag().unwrap();
        assert_eq!(list.name, "ol");
        assert_eq!(list.attribute("start"), Some("3"));
        let items: Vec<_> = list.child_tags().map(|li| li.text_content()).collect();
        assert_eq!(items, vec!["three", "four"]);
    }

    #[test]
    fn transforms_tables_with_head_and_body() {
        let nodes = children("| A | B |\n|:--|--:|\n| 1 | 2 |\n");

        let table = nodes[0].as_tag().unwrap();
        let sections: Vec<_> = table.child_tags().map(|t| t.name.as_str()).collect();
        assert_eq!(sections, vec!["thead", "tbody"]);

        let head_row = table.child_tags().next().unwrap().child_tags().next().unwrap();
        let head: Vec<_> = head_row.child_tags().collect();
        assert_eq!(head[0].name, "th");
        assert_eq!(head[0].attribute("align"), Some("left"));
        assert_eq!(head[1].attribute("align"), Some("right"));

        let body_row = table.child_tags().nth(1).unwrap().child_tags().next().unwrap();
        let cells: Vec<_> = body_row
            .child_tags()
            .map(|td| (td.name.as_str(), td.text_content().trim().to_string()))
            .collect();
        assert_eq!(
            cells,
            vec![("td", "1".to_string()), ("td", "2".to_string())]
        );
    }

    #[test]
    fn task_markers_become_checkboxes() {
        let nodes = children("- [x] done\n- [ ] todo");

        let list = nodes[0].as_tag().unwrap();
        let first = list.child_tags().next().unwrap();
        let marker = first.child_tags().next().unwrap();
        assert_eq!(marker.name, "input");
        assert_eq!(marker.attribute("type"), Some("checkbox"));
        assert_eq!(marker.attribute("checked"), Some(""));

        let second = list.child_tags().nth(1).unwrap();
        assert_eq!(second.child_tags().next().unwrap().attribute("checked"), None);
    }

    #[test]
    fn soft_breaks_become_spaces() {
        let nodes = children("one\ntwo");

        assert_eq!(nodes[0], Tag::new("p").with_child("one two").into());
    }

    #[test]
    fn heading_ids_are_unique_and_explicit_ids_win() {
        let nodes = children("## Setup\n\n## Setup\n\n## Intro {#start}");

        let ids: Vec<_> = nodes
            .iter()
            .filter_map(Node::as_tag)
            .map(|h| h.attribute("id").unwrap_or_default().to_string())
            .collect();
        assert_eq!(ids, vec!["setup", "setup-1", "start"]);
    }

    #[test]
    fn schema_overrides_tags() {
        let schema = Schema::new()
            .with_tag(NodeKind::Callout, "aside")
            .unwrap(NodeKind::Emphasis);

        let doc = transform_with("> [!TIP]\n> Use *this*", &schema);
        let tree = doc.tree.unwrap();

        let aside = tree.child_tags().next().unwrap();
        assert_eq!(aside.name, "aside");
        assert_eq!(aside.attribute("type"), Some("tip"));
        let p = aside.child_tags().next().unwrap();
        assert_eq!(p.children, vec![Node::from("Use this")]);
    }

    #[test]
    fn unwrapped_document_is_empty() {
        let schema = Schema::new().unwrap(NodeKind::Document);

        let doc = transform_with("---\ntitle: T\n---\n# Body", &schema);

        assert_eq!(doc.frontmatter.get_str("title"), Some("T"));
        assert!(doc.tree.is_none());
    }

    #[test]
    fn heading_anchor_text() {
        assert_eq!(slugify("Getting Started"), "getting-started");
        assert_eq!(slugify("What's new in v1.2?"), "whats-new-in-v12");
        assert_eq!(slugify("  deploy__docker -- compose "), "deploy-docker-compose");
        assert_eq!(slugify("Über Café"), "über-café");
        assert_eq!(slugify("???"), "");
    }

    fn heading_ids(source: &str) -> Vec<String> {
        children(source)
            .iter()
            .filter_map(Node::as_tag)
            .map(|h| h.attribute("id").unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn suffixed_ids_do_not_collide_with_later_headings() {
        assert_eq!(
            heading_ids("## Setup\n\n## Setup\n\n## Setup 1"),
            vec!["setup", "setup-1", "setup-1-1"]
        );
        assert_eq!(
            heading_ids("## Setup 1\n\n## Setup\n\n## Setup"),
            vec!["setup-1", "setup", "setup-2"]
        );
    }

    #[test]
    fn empty_frontmatter_block_is_not_rendered() {
        let doc = transform("---\n---\n# Title");

        assert!(doc.frontmatter.is_empty());
        assert_eq!(
            doc.tree.unwrap().children,
            vec![Node::from(
                Tag::new("h1").with_attribute("id", "title").with_child("Title")
            )]
        );
        assert!(transform("---\n---\n").is_empty());
    }

    #[test]
    fn malformed_frontmatter_keeps_literal_title() {
        let doc = transform("---\ntitle: Release: v2\nauthor: Ada\n---\nBody");

        assert_eq!(doc.frontmatter.get_str("title"), Some("Release: v2"));
        assert_eq!(doc.frontmatter.get_str("author"), Some("Ada"));
    }
}
