//! JSON reader that keeps number tokens as their original text.
//!
//! serde_json either converts numbers on the way in or, with
//! `arbitrary_precision`, rewrites exponents (`1E400` becomes `1e+400`). The
//! classifier needs the exact lexeme, so input is read by this small
//! recursive-descent reader instead. String literals are still unescaped and
//! validated by serde_json.
//!
//! Nesting is capped at [`MAX_DEPTH`] so that very deep input fails with a
//! decode error instead of exhausting the stack.

use crate::error::{ConvertError, Result};
use crate::node::describe;

/// Deepest array/object nesting accepted by [`parse_object`].
pub const MAX_DEPTH: usize = 10_000;

/// A decoded JSON value. Numbers hold their source text verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum Json {
    Null,
    Bool(bool),
    Number(String),
    String(String),
    Array(Vec<Json>),
    /// Entries in source order. A repeated key is kept; the converter lets
    /// the last one win.
    Object(Vec<(String, Json)>),
}

/// Read one JSON value spanning the whole input.
pub fn parse(input: &str) -> Result<Json> {
    let mut reader = Reader::new(input);
    let value = reader.read_value()?;
    reader.finish()?;
    Ok(value)
}

/// Read one JSON value spanning the whole input and require it to be an object.
pub fn parse_object(input: &str) -> Result<Json> {
    let mut reader = Reader::new(input);
    reader.skip_whitespace();
    let start = reader.pos;
    let value = reader.read_value()?;
    reader.finish()?;
    match value {
        Json::Object(_) => Ok(value),
        other => Err(reader.error_at(
            start,
            format!("expected an object at the top level, found {}", describe(&other)),
        )),
    }
}

struct Reader<'a> {
    input: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Reader<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek() {
            self.pos += 1;
        }
    }

    fn finish(&mut self) -> Result<()> {
        self.skip_whitespace();
        if self.pos < self.input.len() {
            return Err(self.error("trailing characters after the JSON value"));
        }
        Ok(())
    }

    fn read_value(&mut self) -> Result<Json> {
        self.skip_whitespace();
        match self.peek() {
            None => Err(self.error("unexpected end of input")),
            Some(b'{') => self.read_object(),
            Some(b'[') => self.read_array(),
            Some(b'"') => self.read_string().map(Json::String),
            Some(b'-' | b'0'..=b'9') => self.read_number().map(Json::Number),
            Some(b't') => self.read_literal("true", Json::Bool(true)),
            Some(b'f') => self.read_literal("false", Json::Bool(false)),
            Some(b'n') => self.read_literal("null", Json::Null),
            Some(_) => Err(self.unexpected_char()),
        }
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(self.error(format!("nesting exceeds {MAX_DEPTH} levels")));
        }
        Ok(())
    }

    fn read_array(&mut self) -> Result<Json> {
        self.enter()?;
        self.pos += 1;

        let mut items = Vec::new();
        self.skip_whitespace();
        if self.peek() == Some(b']') {
            self.pos += 1;
            self.depth -= 1;
            return Ok(Json::Array(items));
        }

        loop {
            items.push(self.read_value()?);
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b']') => {
                    self.pos += 1;
                    break;
                }
                None => return Err(self.error("unexpected end of input in array")),
                Some(_) => return Err(self.error("expected ',' or ']' after array element")),
            }
        }

        self.depth -= 1;
        Ok(Json::Array(items))
    }

    fn read_object(&mut self) -> Result<Json> {
        self.enter()?;
        self.pos += 1;

        let mut entries = Vec::new();
        self.skip_whitespace();
        if self.peek() == Some(b'}') {
            self.pos += 1;
            self.depth -= 1;
            return Ok(Json::Object(entries));
        }

        loop {
            self.skip_whitespace();
            if self.peek() != Some(b'"') {
                return Err(self.error("expected a string key"));
            }
            let key = self.read_string()?;

            self.skip_whitespace();
            if self.peek() != Some(b':') {
                return Err(self.error("expected ':' after object key"));
            }
            self.pos += 1;

            let value = self.read_value()?;
            entries.push((key, value));

            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b'}') => {
                    self.pos += 1;
                    break;
                }
                None => return Err(self.error("unexpected end of input in object")),
                Some(_) => return Err(self.error("expected ',' or '}' after object value")),
            }
        }

        self.depth -= 1;
        Ok(Json::Object(entries))
    }

    /// Find the closing quote, then let serde_json unescape and validate the
    /// literal (escapes, surrogate pairs, control characters).
    fn read_string(&mut self) -> Result<String> {
        let start = self.pos;
        let bytes = self.input.as_bytes();
        let mut end = start + 1;
        loop {
            match bytes.get(end) {
                None => return Err(self.error_at(start, "unterminated string")),
                Some(b'"') => break,
                Some(b'\\') => end += 2,
                Some(_) => end += 1,
            }
        }
        end += 1;

        let literal = &self.input[start..end];
        let text = serde_json::from_str::<String>(literal)
            .map_err(|e| self.error_at(start, format!("invalid string: {e}")))?;
        self.pos = end;
        Ok(text)
    }

    /// `-? (0 | [1-9][0-9]*) (. [0-9]+)? ([eE] [+-]? [0-9]+)?`, returned verbatim.
    fn read_number(&mut self) -> Result<String> {
        let start = self.pos;

        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        match self.peek() {
            Some(b'0') => self.pos += 1,
            Some(b'1'..=b'9') => self.skip_digits(),
            _ => return Err(self.error_at(start, "invalid number")),
        }

        if self.peek() == Some(b'.') {
            self.pos += 1;
            if !matches!(self.peek(), Some(b'0'..=b'9')) {
                return Err(self.error_at(start, "invalid number: expected digit after '.'"));
            }
            self.skip_digits();
        }

        if let Some(b'e' | b'E') = self.peek() {
            self.pos += 1;
            if let Some(b'+' | b'-') = self.peek() {
                self.pos += 1;
            }
            if !matches!(self.peek(), Some(b'0'..=b'9')) {
                return Err(self.error_at(start, "invalid number: expected digit in exponent"));
            }
            self.skip_digits();
        }

        Ok(self.input[start..self.pos].to_string())
    }

    fn skip_digits(&mut self) {
        while let Some(b'0'..=b'9') = self.peek() {
            self.pos += 1;
        }
    }

    fn read_literal(&mut self, literal: &str, value: Json) -> Result<Json> {
        if self.input[self.pos..].starts_with(literal) {
            self.pos += literal.len();
            Ok(value)
        } else {
            Err(self.unexpected_char())
        }
    }

    fn unexpected_char(&self) -> ConvertError {
        match self.input[self.pos..].chars().next() {
            Some(c) => self.error(format!("unexpected character {c:?}")),
            None => self.error("unexpected end of input"),
        }
    }

    fn error(&self, message: impl Into<String>) -> ConvertError {
        self.error_at(self.pos, message)
    }

    fn error_at(&self, pos: usize, message: impl Into<String>) -> ConvertError {
        let mut pos = pos.min(self.input.len());
        while !self.input.is_char_boundary(pos) {
            pos -= 1;
        }
        let before = &self.input[..pos];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = before[line_start..].chars().count() + 1;
        ConvertError::Decode {
            line,
            column,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(input: &str) -> Vec<String> {
        match parse(input).unwrap() {
            Json::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Json::Number(text) => text,
                    other => panic!("expected number, got {other:?}"),
                })
                .collect(),
            other => panic!("expected array, got {other:?}"),
        }
    }

    fn decode_error(input: &str) -> (usize, usize, String) {
        match parse(input) {
            Err(ConvertError::Decode {
                line,
                column,
                message,
            }) => (line, column, message),
            other => panic!("expected decode error for {input:?}, got {other:?}"),
        }
    }

    #[test]
    fn numbers_keep_their_lexeme() {
        assert_eq!(
            numbers("[1.50, 2e3, 2E3, 1e+400, -0, 9007199254740993, 1E-2]"),
            vec!["1.50", "2e3", "2E3", "1e+400", "-0", "9007199254740993", "1E-2"]
        );
    }

    #[test]
    fn strings_are_unescaped() {
        assert_eq!(
            parse(r#""a\nb \"q\" \u00e9 \ud83d\ude00""#).unwrap(),
            Json::String("a\nb \"q\" \u{e9} \u{1f600}".to_string())
        );
        assert_eq!(parse("\"caf\u{e9}\"").unwrap(), Json::String("caf\u{e9}".to_string()));
    }

    #[test]
    fn object_entries_in_source_order() {
        let value = parse(r#" { "b" : 1 , "a" : [true, null], "b": {} } "#).unwrap();
        assert_eq!(
            value,
            Json::Object(vec![
                ("b".to_string(), Json::Number("1".to_string())),
                ("a".to_string(), Json::Array(vec![Json::Bool(true), Json::Null])),
                ("b".to_string(), Json::Object(vec![])),
            ])
        );
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        for input in ["01", "1.", ".5", "1e", "1e+", "-", "+1", "0x10", "NaN", "Infinity"] {
            decode_error(input);
        }
    }

    #[test]
    fn malformed_structure_is_rejected() {
        for input in ["", "[1,]", "[1 2]", "{\"a\" 1}", "{a: 1}", "{\"a\":1,}", "[", "tru", "\"x", "\"\\q\"", "\"a\u{1}b\""] {
            decode_error(input);
        }
    }

    #[test]
    fn error_position_is_line_and_column() {
        let (line, column, message) = decode_error("{\n  \"a\": 1,\n  \"b\": ?\n}");
        assert_eq!((line, column), (3, 8));
        assert_eq!(message, "unexpected character '?'");
    }

    #[test]
    fn trailing_characters_are_rejected() {
        let (_, column, message) = decode_error("{} {}");
        assert_eq!(column, 4);
        assert!(message.starts_with("trailing characters"));
    }

    #[test]
    fn top_level_must_be_an_object() {
        assert!(matches!(parse_object(" {}"), Ok(Json::Object(_))));
        match parse_object("  [1]") {
            Err(ConvertError::Decode { column, message, .. }) => {
                assert_eq!(column, 3);
                assert_eq!(message, "expected an object at the top level, found array");
            }
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn nesting_limit_is_a_decode_error() {
        let too_deep = format!("{}{}", "[".repeat(MAX_DEPTH + 1), "]".repeat(MAX_DEPTH + 1));
        let result = std::thread::Builder::new()
            .stack_size(64 * 1024 * 1024)
            .spawn(move || parse(&too_deep).map(|_| ()).map_err(|e| e.to_string()))
            .unwrap()
            .join()
            .unwrap();
        let message = result.unwrap_err();
        assert!(message.contains("nesting exceeds 10000 levels"), "{message}");
    }
}
