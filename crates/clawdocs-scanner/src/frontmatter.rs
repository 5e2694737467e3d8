//! YAML frontmatter splitter for markdown documents.

use serde_json::{Map, Value};

/// Metadata parsed from a document's leading `---` block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frontmatter(Map<String, Value>);

impl Frontmatter {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Scalar field as a string. Empty strings, null, arrays and maps are absent.
    pub fn get_str(&self, key: &str) -> Option<String> {
        self.0.get(key).and_then(scalar_to_string)
    }

    /// Nested mapping field.
    pub fn get_map(&self, key: &str) -> Option<&Map<String, Value>> {
        self.0.get(key).and_then(Value::as_object)
    }
}

/// Split a document into `(frontmatter, body)`.
///
/// Never fails: a missing, unterminated, or unparsable block yields empty
/// frontmatter and the whole input as body.
pub fn split(content: &str) -> (Frontmatter, String) {
    let Some((yaml, body)) = delimit(content) else {
        return (Frontmatter::default(), content.to_string());
    };

    match parse_mapping(yaml) {
        Some(map) => (Frontmatter(map), body.to_string()),
        None => (Frontmatter::default(), content.to_string()),
    }
}

/// Locate the `---` fenced block. Returns `(yaml, body)`.
fn delimit(content: &str) -> Option<(&str, &str)> {
    let text = content.trim_start_matches('\u{feff}');
    let rest = text.strip_prefix("---")?;

    // The opening fence must be alone on its line.
    let (fence_tail, after_open) = rest.split_once('\n')?;
    if !fence_tail.trim().is_empty() {
        return None;
    }

    let mut offset = 0;
    for line in after_open.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Some((&after_open[..offset], &after_open[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

fn parse_mapping(yaml: &str) -> Option<Map<String, Value>> {
    if yaml.trim().is_empty() {
        return Some(Map::new());
    }

    match serde_yaml::from_str::<Value>(yaml) {
        Ok(Value::Object(map)) => Some(map),
        Ok(Value::Null) => Some(Map::new()),
        Ok(_) => {
            tracing::debug!("Frontmatter is not a mapping, ignoring it");
            None
        }
        Err(e) => {
            tracing::debug!("Ignoring malformed frontmatter: {e}");
            None
        }
    }
}

/// Render a scalar JSON value as a non-empty string.
pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
