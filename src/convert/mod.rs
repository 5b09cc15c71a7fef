//! Normalization of provider payloads into canonical records.
//!
//! Providers disagree on shape and field names. This module maps whatever
//! arrived onto [`TokenRecord`](crate::TokenRecord) and
//! [`CollectionSummary`](crate::CollectionSummary), filling defaults for
//! anything missing. Missing fields are never an error.

mod collection;
mod image;
mod tokens;

pub use collection::summary_from_value;
pub use image::resolve_image_url;
pub use tokens::{TokenPayload, normalize_tokens};

use serde_json::Value;

/// First of `keys` present on `value` as a non-empty string or a number,
/// rendered as text.
pub(crate) fn text_field(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| scalar_text(value.get(*key)?))
}

/// A string (non-empty) or number as text.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_field_takes_first_present_key() {
        let v = json!({"b": "two", "c": 3});
        assert_eq!(text_field(&v, &["a", "b", "c"]), Some("two".into()));
        assert_eq!(text_field(&v, &["c", "b"]), Some("3".into()));
        assert_eq!(text_field(&v, &["a"]), None);
    }

    #[test]
    fn empty_string_is_absent() {
        let v = json!({"a": "", "b": "x"});
        assert_eq!(text_field(&v, &["a", "b"]), Some("x".into()));
    }

    #[test]
    fn non_scalars_are_absent() {
        let v = json!({"a": null, "b": [1], "c": {"d": 1}, "e": true});
        assert_eq!(text_field(&v, &["a", "b", "c", "e"]), None);
    }
}
