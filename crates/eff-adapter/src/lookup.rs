//! Defaulting accessors over loosely-typed JSON
//!
//! Legacy bundles are untrusted: any level may be missing or hold the wrong
//! type. These helpers never fail; absent or mistyped structure reads as
//! empty, and fallback chains pick the first truthy candidate.

use once_cell::sync::Lazy;
use serde_json::{Map, Value};

static EMPTY: Lazy<Map<String, Value>> = Lazy::new(Map::new);

/// Rendering of an absent slot inside human-readable strings
pub const ABSENT: &str = "null";

/// Truthiness of a JSON value
///
/// `null`, `false`, zero, and empty strings, arrays and objects are falsy.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Nested mapping at `key`, or an empty mapping
#[must_use]
pub fn section<'a>(map: &'a Map<String, Value>, key: &str) -> &'a Map<String, Value> {
    match map.get(key) {
        Some(Value::Object(inner)) => inner,
        _ => &*EMPTY,
    }
}

/// First candidate that is present and truthy
///
/// Candidates are tried in order; this is the whole precedence rule for a
/// fallback chain.
pub fn first_truthy<'a, I>(candidates: I) -> Option<&'a Value>
where
    I: IntoIterator<Item = Option<&'a Value>>,
{
    candidates.into_iter().flatten().find(|v| is_truthy(v))
}

/// Resolve a fallback chain to display text, or `default`
pub fn resolve_text<'a, I>(candidates: I, default: &str) -> String
where
    I: IntoIterator<Item = Option<&'a Value>>,
{
    first_truthy(candidates).map_or_else(|| default.to_string(), render_text)
}

/// Display text for a value: strings as-is, everything else as JSON
#[must_use]
pub fn render_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Display text for an optional slot; absent and `null` render as [`ABSENT`]
#[must_use]
pub fn render_slot(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => ABSENT.to_string(),
        Some(v) => render_text(v),
    }
}

/// Non-empty array at `key`
#[must_use]
pub fn non_empty_list<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a [Value]> {
    match map.get(key) {
        Some(Value::Array(items)) if !items.is_empty() => Some(items),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test fixture must be an object"),
        }
    }

    #[test]
    fn truthiness() {
        for falsy in [json!(null), json!(false), json!(0), json!(0.0), json!(""), json!([]), json!({})] {
            assert!(!is_truthy(&falsy), "{falsy} should be falsy");
        }
        for truthy in [json!(true), json!(-1), json!(0.5), json!(" "), json!([0]), json!({"a": null})] {
            assert!(is_truthy(&truthy), "{truthy} should be truthy");
        }
    }

    #[test]
    fn section_defaults_to_empty() {
        let map = obj(json!({"narrative": {"a": 1}, "scenarios": ["not", "a", "map"]}));
        assert_eq!(section(&map, "narrative").len(), 1);
        assert!(section(&map, "scenarios").is_empty());
        assert!(section(&map, "missing").is_empty());
    }

    #[test]
    fn first_truthy_skips_falsy_and_absent() {
        let a = json!("");
        let b = json!("winner");
        let c = json!("later");
        let found = first_truthy([None, Some(&a), Some(&b), Some(&c)]);
        assert_eq!(found, Some(&b));
        assert_eq!(first_truthy([None, Some(&a)]), None);
    }

    #[test]
    fn resolve_text_uses_default() {
        assert_eq!(resolve_text([None, Some(&json!(null))], "—"), "—");
        assert_eq!(resolve_text([Some(&json!(42))], "—"), "42");
    }

    #[test]
    fn slots_render_sentinel() {
        assert_eq!(render_slot(None), "null");
        assert_eq!(render_slot(Some(&json!(null))), "null");
        assert_eq!(render_slot(Some(&json!("High"))), "High");
        assert_eq!(render_slot(Some(&json!(true))), "true");
    }

    #[test]
    fn non_empty_list_requires_array() {
        let map = obj(json!({"a": [], "b": ["x"], "c": "x"}));
        assert!(non_empty_list(&map, "a").is_none());
        assert_eq!(non_empty_list(&map, "b").map(<[Value]>::len), Some(1));
        assert!(non_empty_list(&map, "c").is_none());
    }
}
