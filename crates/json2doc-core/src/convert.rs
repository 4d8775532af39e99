//! JSON tree → typed document conversion.
//!
//! [`convert`] walks a decoded JSON tree depth-first and builds the matching
//! [`Value`] tree:
//!
//! | JSON      | Document value                      |
//! |-----------|-------------------------------------|
//! | `null`    | `Null`                              |
//! | string    | `String`, verbatim                  |
//! | number    | `Integer`, `Double` or `String` (see [`classify`]) |
//! | boolean   | `Boolean`                           |
//! | array     | `Array`, same length and order      |
//! | object    | `Map`, same key set                 |
//!
//! Any other kind aborts the whole conversion with
//! [`ConvertError::UnsupportedType`]. No partial tree is ever returned.

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::error::{ConvertError, Result};
use crate::node::{describe, JsonNode, NodeKind};
use crate::number::classify;
use crate::types::{Document, Value};

/// Convert a single JSON node (and everything below it) into a typed value.
pub fn convert<N: JsonNode>(node: &N) -> Result<Value> {
    let mut path = Vec::new();
    convert_at(node, &mut path)
}

/// Build a document from a top-level JSON object.
///
/// Fails with [`ConvertError::NotAnObject`] if `node` is not an object.
pub fn to_document<N: JsonNode>(node: &N) -> Result<Document> {
    match node.kind() {
        NodeKind::Object(entries) => document_from_entries(entries),
        _ => Err(ConvertError::NotAnObject {
            kind: describe(node),
        }),
    }
}

impl Document {
    /// Build a document from an already-decoded JSON object.
    pub fn from_json(map: &serde_json::Map<String, serde_json::Value>) -> Result<Document> {
        document_from_entries(map.iter().map(|(k, v)| (k.as_str(), v)))
    }
}

fn document_from_entries<'a, N, I>(entries: I) -> Result<Document>
where
    N: JsonNode + 'a,
    I: IntoIterator<Item = (&'a str, &'a N)>,
{
    let mut doc = Document::new();
    let mut path = Vec::new();
    for (key, value) in entries {
        path.push(Segment::Key(key));
        let converted = convert_at(value, &mut path)?;
        path.pop();
        doc.fields.insert(key.to_string(), converted);
    }
    tracing::trace!(fields = doc.len(), "assembled document");
    Ok(doc)
}

/// One step from the root to the node being converted.
enum Segment<'a> {
    Key(&'a str),
    Index(usize),
}

fn convert_at<'a, N: JsonNode>(node: &'a N, path: &mut Vec<Segment<'a>>) -> Result<Value> {
    match node.kind() {
        NodeKind::Null => Ok(Value::Null),
        NodeKind::String(s) => Ok(Value::String(s.to_string())),
        NodeKind::Number(text) => Ok(classify(&text)),
        NodeKind::Bool(b) => Ok(Value::Boolean(b)),
        NodeKind::Array(items) => {
            let mut values = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                path.push(Segment::Index(i));
                values.push(convert_at(item, path)?);
                path.pop();
            }
            Ok(Value::Array(values))
        }
        NodeKind::Object(entries) => {
            let mut fields = BTreeMap::new();
            for (key, value) in entries {
                path.push(Segment::Key(key));
                let converted = convert_at(value, path)?;
                path.pop();
                fields.insert(key.to_string(), converted);
            }
            Ok(Value::Map(fields))
        }
        NodeKind::Unsupported(kind) => Err(ConvertError::UnsupportedType {
            kind,
            path: render_path(path),
        }),
    }
}

/// `$`, then `.key` for identifier keys, `["key"]` for any other key, `[i]`
/// for array indices.
fn render_path(path: &[Segment<'_>]) -> String {
    let mut out = String::from("$");
    for segment in path {
        // Writing to a String cannot fail.
        let _ = match segment {
            Segment::Key(key) if is_identifier(key) => write!(out, ".{key}"),
            Segment::Key(key) => write!(out, "[{}]", quote_key(key)),
            Segment::Index(i) => write!(out, "[{i}]"),
        };
    }
    out
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn quote_key(key: &str) -> String {
    serde_json::to_string(key).unwrap_or_else(|_| format!("{key:?}"))
}
