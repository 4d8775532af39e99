//! Canonical JSON rendering of documents.
//!
//! Follows the proto3 JSON mapping used by the Firestore REST API: every value
//! is a single-key object naming its type, int64 values are written as decimal
//! strings, and empty repeated/map fields are omitted.
//!
//! ```text
//! {"fields":{"a":{"integerValue":"1"},"b":{"arrayValue":{"values":[{"nullValue":null}]}}}}
//! ```

use std::collections::BTreeMap;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::error::{ConvertError, Result};
use crate::types::{Document, Value};

/// Render a document as one line of canonical JSON.
pub fn render(doc: &Document) -> Result<String> {
    serde_json::to_string(doc).map_err(ConvertError::Serialize)
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serialize_fields(&self.fields, serializer)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Value::Null => map.serialize_entry("nullValue", &())?,
            Value::String(s) => map.serialize_entry("stringValue", s)?,
            Value::Integer(n) => map.serialize_entry("integerValue", &n.to_string())?,
            Value::Double(f) => map.serialize_entry("doubleValue", &Double(*f))?,
            Value::Boolean(b) => map.serialize_entry("booleanValue", b)?,
            Value::Array(values) => map.serialize_entry("arrayValue", &ArrayValue(values))?,
            Value::Map(fields) => map.serialize_entry("mapValue", &MapValue(fields))?,
        }
        map.end()
    }
}

/// `{"fields": {...}}`, or `{}` when there are no fields.
fn serialize_fields<S: Serializer>(
    fields: &BTreeMap<String, Value>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    if fields.is_empty() {
        return serializer.serialize_map(Some(0))?.end();
    }
    let mut map = serializer.serialize_map(Some(1))?;
    map.serialize_entry("fields", fields)?;
    map.end()
}

struct ArrayValue<'a>(&'a [Value]);

impl Serialize for ArrayValue<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if self.0.is_empty() {
            return serializer.serialize_map(Some(0))?.end();
        }
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("values", self.0)?;
        map.end()
    }
}

struct MapValue<'a>(&'a BTreeMap<String, Value>);

impl Serialize for MapValue<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serialize_fields(self.0, serializer)
    }
}

/// JSON has no NaN or infinities; proto3 spells them as strings.
struct Double(f64);

impl Serialize for Double {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let f = self.0;
        if f.is_nan() {
            serializer.serialize_str("NaN")
        } else if f.is_infinite() {
            serializer.serialize_str(if f > 0.0 { "Infinity" } else { "-Infinity" })
        } else {
            serializer.serialize_f64(f)
        }
    }
}
