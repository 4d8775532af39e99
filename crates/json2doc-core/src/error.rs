//! Error types for JSON → document conversion.

use thiserror::Error;

/// Errors that can occur while decoding, converting or rendering a document.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// The input was not valid JSON, nested too deeply, or its top-level
    /// value was not an object. `line` and `column` are 1-based.
    #[error("JSON decode error at line {line}, column {column}: {message}")]
    Decode {
        line: usize,
        column: usize,
        message: String,
    },

    /// A pre-decoded node handed to `to_document` was not an object.
    #[error("top-level value must be an object, found {kind}")]
    NotAnObject { kind: String },

    /// A node of a kind outside null/string/number/boolean/array/object.
    /// `path` locates the node inside the input (`$` is the root).
    #[error("cannot convert value of type {kind} at {path}")]
    UnsupportedType { kind: String, path: String },

    /// The typed document could not be rendered to text.
    #[error("serialization error: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Convenience alias used throughout json2doc-core.
pub type Result<T> = std::result::Result<T, ConvertError>;
