//! Read-only view over decoded JSON trees.
//!
//! The converter does not care which decoder produced its input, only that
//! every node can say what kind it is. [`Json`] from the crate's own reader
//! hands numbers over exactly as written. `serde_json::Value` is accepted too,
//! but its numbers are already converted, so they arrive as serde_json's
//! rendering of the parsed value.

use std::borrow::Cow;

use crate::reader::Json;

/// One node of a decoded JSON tree, as seen by the converter.
pub enum NodeKind<'a, N> {
    Null,
    String(&'a str),
    /// Original decimal text of the number token.
    Number(Cow<'a, str>),
    Bool(bool),
    Array(&'a [N]),
    Object(Vec<(&'a str, &'a N)>),
    /// Anything the source produced that is none of the above. The string
    /// describes the kind for error messages.
    Unsupported(String),
}

/// A decoded JSON value that can be inspected by kind.
pub trait JsonNode: Sized {
    fn kind(&self) -> NodeKind<'_, Self>;
}

impl JsonNode for serde_json::Value {
    fn kind(&self) -> NodeKind<'_, Self> {
        use serde_json::Value;

        match self {
            Value::Null => NodeKind::Null,
            Value::Bool(b) => NodeKind::Bool(*b),
            Value::Number(n) => NodeKind::Number(Cow::Owned(n.to_string())),
            Value::String(s) => NodeKind::String(s.as_str()),
            Value::Array(items) => NodeKind::Array(items.as_slice()),
            Value::Object(map) => {
                NodeKind::Object(map.iter().map(|(k, v)| (k.as_str(), v)).collect())
            }
        }
    }
}

impl JsonNode for Json {
    fn kind(&self) -> NodeKind<'_, Self> {
        match self {
            Json::Null => NodeKind::Null,
            Json::Bool(b) => NodeKind::Bool(*b),
            Json::Number(text) => NodeKind::Number(Cow::Borrowed(text.as_str())),
            Json::String(s) => NodeKind::String(s.as_str()),
            Json::Array(items) => NodeKind::Array(items.as_slice()),
            Json::Object(entries) => {
                NodeKind::Object(entries.iter().map(|(k, v)| (k.as_str(), v)).collect())
            }
        }
    }
}

/// Human-readable kind of a node, for diagnostics.
pub fn describe<N: JsonNode>(node: &N) -> String {
    match node.kind() {
        NodeKind::Null => "null".to_string(),
        NodeKind::String(_) => "string".to_string(),
        NodeKind::Number(_) => "number".to_string(),
        NodeKind::Bool(_) => "boolean".to_string(),
        NodeKind::Array(_) => "array".to_string(),
        NodeKind::Object(_) => "object".to_string(),
        NodeKind::Unsupported(kind) => kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reader_numbers_are_borrowed_verbatim() {
        let value = Json::Number("1E400".to_string());
        match value.kind() {
            NodeKind::Number(Cow::Borrowed(text)) => assert_eq!(text, "1E400"),
            _ => panic!("expected borrowed number text"),
        }
    }

    #[test]
    fn serde_numbers_use_serde_rendering() {
        let value: serde_json::Value = serde_json::from_str("[1.50, 9007199254740993]").unwrap();
        let serde_json::Value::Array(items) = value else {
            panic!("expected array");
        };
        let texts: Vec<String> = items
            .iter()
            .map(|item| match item.kind() {
                NodeKind::Number(text) => text.into_owned(),
                _ => panic!("expected number"),
            })
            .collect();
        assert_eq!(texts, vec!["1.5", "9007199254740993"]);
    }

    #[test]
    fn describe_serde_kinds() {
        assert_eq!(describe(&serde_json::json!(null)), "null");
        assert_eq!(describe(&serde_json::json!({"a": 1})), "object");
        assert_eq!(describe(&serde_json::json!([1])), "array");
        assert_eq!(describe(&Json::Bool(false)), "boolean");
    }
}
