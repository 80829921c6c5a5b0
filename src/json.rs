//! Null-safe JSON field access for response assertions.

use crate::{Error, Result};
use serde_json::Value;

/// Parses a response body, treating blank input as an empty object.
///
/// # Errors
///
/// Returns [`Error::InvalidJson`] when the text is not valid JSON.
pub fn parse(body: &str) -> Result<Value> {
    let text = if body.trim().is_empty() { "{}" } else { body };
    serde_json::from_str(text).map_err(|e| Error::InvalidJson {
        raw: body.to_string(),
        reason: e.to_string(),
    })
}

/// A string field, `None` when missing or null.
pub fn get_str<'a>(node: &'a Value, field: &str) -> Option<&'a str> {
    node.get(field).and_then(Value::as_str)
}

/// An integer field, `None` when missing, null, or not an integer.
pub fn get_i64(node: &Value, field: &str) -> Option<i64> {
    node.get(field).and_then(Value::as_i64)
}

/// An unsigned integer field, `None` when missing, null, or negative.
pub fn get_u64(node: &Value, field: &str) -> Option<u64> {
    node.get(field).and_then(Value::as_u64)
}

/// `true` when the field exists and is not null.
pub fn has(node: &Value, field: &str) -> bool {
    node.get(field).is_some_and(|value| !value.is_null())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_body_parses_as_empty_object() {
        assert_eq!(parse("").unwrap(), serde_json::json!({}));
        assert_eq!(parse("  \n").unwrap(), serde_json::json!({}));
    }

    #[test]
    fn invalid_json_surfaces_at_parse_point() {
        let err = parse("<!DOCTYPE html>").unwrap_err();
        assert!(matches!(err, Error::InvalidJson { .. }));
        assert_eq!(err.raw_response(), Some("<!DOCTYPE html>"));
    }

    #[test]
    fn getters_are_null_safe() {
        let node = serde_json::json!({"name": "doggie", "id": 7, "tag": null});
        assert_eq!(get_str(&node, "name"), Some("doggie"));
        assert_eq!(get_i64(&node, "id"), Some(7));
        assert_eq!(get_str(&node, "tag"), None);
        assert_eq!(get_i64(&node, "missing"), None);
        assert!(has(&node, "name"));
        assert!(!has(&node, "tag"));
        assert!(!has(&node, "missing"));
    }
}
