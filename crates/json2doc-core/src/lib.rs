//! # json2doc-core
//!
//! Converts JSON objects into typed document values (the Firestore
//! `Document`/`Value` model) and renders them in canonical proto3 JSON form.
//!
//! JSON has one number type and an untyped object. Documents distinguish
//! integers from doubles and hold maps of typed values, so the conversion
//! decides each number's type from its original text: an exact `i64` first,
//! then a finite `f64`, then the text itself as a string.
//!
//! ## Quick start
//!
//! ```rust
//! use json2doc_core::convert_json;
//!
//! let out = convert_json(r#"{"n":1,"x":1.5}"#).unwrap();
//! assert_eq!(
//!     out,
//!     r#"{"fields":{"n":{"integerValue":"1"},"x":{"doubleValue":1.5}}}"#
//! );
//! ```
//!
//! ## Modules
//!
//! - [`number`] — number text → `Integer` / `Double` / `String`
//! - [`convert`] — JSON tree → typed [`Value`] tree, document assembly
//! - [`node`] — the [`JsonNode`] view the converter reads from
//! - [`reader`] — JSON text → [`Json`] tree, numbers kept as written
//! - [`wire`] — canonical JSON rendering
//! - [`types`] — [`Value`] and [`Document`]
//! - [`error`] — error types

pub mod convert;
pub mod error;
pub mod node;
pub mod number;
pub mod reader;
pub mod types;
pub mod wire;

pub use convert::{convert, to_document};
pub use error::{ConvertError, Result};
pub use node::{JsonNode, NodeKind};
pub use number::classify;
pub use reader::{Json, MAX_DEPTH};
pub use types::{Document, Value};
pub use wire::render;

/// Decode a JSON object and convert it into a [`Document`].
///
/// Fails with [`ConvertError::Decode`] if the input is not valid JSON, has
/// trailing data, nests deeper than [`MAX_DEPTH`], or is not an object at the
/// top level. Numbers reach the classifier exactly as written in `json`.
pub fn parse_document(json: &str) -> Result<Document> {
    let root = reader::parse_object(json)?;
    to_document(&root)
}

/// Decode, convert and render in one call: JSON object text in, canonical
/// document text out (no trailing newline).
pub fn convert_json(json: &str) -> Result<String> {
    let doc = parse_document(json)?;
    render(&doc)
}
