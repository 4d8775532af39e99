//! Integer vs double disambiguation for JSON number tokens.
//!
//! The decoder hands numbers over as their original text (`1`, `1.50`, `2e3`).
//! [`classify`] tries, in order:
//!
//! 1. an exact base-10 `i64` → [`Value::Integer`]
//! 2. a finite `f64` → [`Value::Double`]
//! 3. otherwise the text itself → [`Value::String`]
//!
//! Step 3 keeps the conversion total: a number that fits neither type (for
//! example `1e400`, which would overflow to infinity) is carried through
//! losslessly instead of failing the document.

use crate::types::Value;

/// Classify a number token by its original decimal text. Never fails.
///
/// ```
/// use json2doc_core::{classify, Value};
///
/// assert_eq!(classify("42"), Value::Integer(42));
/// assert_eq!(classify("1.5"), Value::Double(1.5));
/// assert_eq!(classify("1e400"), Value::String("1e400".into()));
/// ```
pub fn classify(text: &str) -> Value {
    if let Ok(n) = text.parse::<i64>() {
        return Value::Integer(n);
    }

    // Rust's float parser saturates to infinity instead of reporting overflow.
    match text.parse::<f64>() {
        Ok(f) if f.is_finite() => Value::Double(f),
        _ => {
            tracing::debug!(number = text, "number fits neither i64 nor f64, keeping text");
            Value::String(text.to_string())
        }
    }
}
