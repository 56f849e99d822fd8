//! Frontmatter mapping and parsing.

use serde::Serialize;
use serde_yaml::{Mapping, Value};

/// Metadata extracted from the YAML block at the top of a document.
///
/// Keys keep their insertion order. Nothing is interpreted here: well-known
/// keys like `title` or `published_at` are read by callers through [`get_str`]
/// or [`text`], everything else is carried along untouched.
///
/// [`get_str`]: Frontmatter::get_str
/// [`text`]: Frontmatter::text
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Frontmatter {
    fields: Mapping,
}

impl Frontmatter {
    /// Create an empty frontmatter mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a YAML mapping, dropping entries whose key is not a string.
    pub fn from_mapping(mapping: Mapping) -> Self {
        let fields = mapping
            .into_iter()
            .filter(|(key, _)| key.is_string())
            .collect();
        Self { fields }
    }

    /// Raw value for a key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Value for a key when it is a YAML string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Value for a key rendered as text.
    ///
    /// Strings, numbers and booleans are rendered; nulls, sequences and
    /// mappings are treated as absent.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields
            .iter()
            .filter_map(|(key, value)| key.as_str().map(|k| (k, value)))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Set a value, replacing any previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.fields.insert(Value::String(key.into()), value);
    }
}

/// Parse the body of a frontmatter block.
///
/// A block that is not valid YAML is recovered line by line as `key: value`
/// pairs; lines whose value does not parse as a scalar are left out.
pub(crate) fn parse_block(yaml: &str) -> Frontmatter {
    if yaml.trim().is_empty() {
        return Frontmatter::default();
    }

    match serde_yaml::from_str::<Value>(yaml) {
        Ok(Value::Mapping(mapping)) => Frontmatter::from_mapping(mapping),
        Ok(Value::Null) => Frontmatter::default(),
        Ok(_) => {
            tracing::warn!("Frontmatter is not a key-value mapping, ignoring it");
            Frontmatter::default()
        }
        Err(e) => {
            tracing::warn!("Malformed frontmatter, recovering line by line: {}", e);
            recover_lines(yaml)
        }
    }
}

fn recover_lines(yaml: &str) -> Frontmatter {
    let mut frontmatter = Frontmatter::default();

    for line in yaml.lines() {
        // Continuation lines belong to a structure we could not parse
        if line.starts_with(char::is_whitespace) || line.trim_start().starts_with('#') {
            continue;
        }

        let Some((key, raw)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        let raw = raw.trim();
        if key.is_empty() || raw.is_empty() {
            continue;
        }

        // Anything that is not a plain scalar is kept as the literal text
        match serde_yaml::from_str::<Value>(raw) {
            Ok(value @ (Value::String(_) | Value::Number(_) | Value::Bool(_))) => {
                frontmatter.insert(key, value);
            }
            Ok(Value::Null) => {}
            _ => frontmatter.insert(key, Value::String(raw.to_string())),
        }
    }

    frontmatter
}
