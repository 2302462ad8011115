//! Scenario list to map conversion
//!
//! Legacy bundles carry scenarios as an ordered list of records; the
//! canonical schema keys them by lower-cased name. Later records with the
//! same name replace earlier ones.

use eff_schema::{Scenario, MISSING};
use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::lookup::{is_truthy, render_text};

/// Convert a scenario list into a name-keyed map
///
/// Absent or non-array input yields an empty map. Non-object entries and
/// entries without a usable name are dropped.
#[must_use]
pub fn scenarios_to_map(list: Option<&Value>) -> IndexMap<String, Scenario> {
    let mut out = IndexMap::new();
    let Some(Value::Array(records)) = list else {
        return out;
    };

    for (index, record) in records.iter().enumerate() {
        let Value::Object(record) = record else {
            tracing::trace!(index, "skipping non-object scenario entry");
            continue;
        };
        let Some(name) = scenario_name(record) else {
            tracing::trace!(index, "skipping scenario without a name");
            continue;
        };
        // a repeated name keeps its first position but takes the later record
        out.insert(name, normalize(record));
    }

    out
}

/// Lower-cased, trimmed scenario name; `None` when empty or not a string
fn scenario_name(record: &Map<String, Value>) -> Option<String> {
    let name = record.get("scenario")?.as_str()?.trim().to_lowercase();
    (!name.is_empty()).then_some(name)
}

fn normalize(record: &Map<String, Value>) -> Scenario {
    let earnings_direction = match record.get("earnings_direction") {
        None | Some(Value::Null) => MISSING.to_string(),
        Some(v) => render_text(v),
    };
    let confidence = record
        .get("confidence")
        .filter(|v| is_truthy(v))
        .map_or_else(|| MISSING.to_string(), render_text);
    let primary_drivers = match record.get("primary_drivers") {
        Some(Value::Array(items)) => items.iter().map(render_text).collect(),
        _ => Vec::new(),
    };
    let explanation = record
        .get("description")
        .filter(|v| is_truthy(v))
        .map(render_text)
        .unwrap_or_default();

    Scenario {
        earnings_direction,
        confidence,
        primary_drivers,
        explanation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn absent_or_wrong_type_is_empty() {
        assert!(scenarios_to_map(None).is_empty());
        assert!(scenarios_to_map(Some(&json!({"scenario": "base"}))).is_empty());
        assert!(scenarios_to_map(Some(&json!("base"))).is_empty());
    }

    #[test]
    fn names_are_trimmed_and_lowercased() {
        let list = json!([{"scenario": "  Upside ", "earnings_direction": "Up"}]);
        let map = scenarios_to_map(Some(&list));
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["upside"]);
    }

    #[test]
    fn later_duplicate_wins() {
        let list = json!([
            {"scenario": "Base", "earnings_direction": "Up"},
            {"scenario": "Downside", "earnings_direction": "Down"},
            {"scenario": "BASE", "earnings_direction": "Down"}
        ]);
        let map = scenarios_to_map(Some(&list));
        assert_eq!(map.len(), 2);
        assert_eq!(map["base"].earnings_direction, "Down");
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["base", "downside"]);
    }

    #[test]
    fn unusable_entries_are_dropped() {
        let list = json!([
            "base",
            42,
            {"scenario": "   "},
            {"scenario": null},
            {"scenario": 7},
            {"earnings_direction": "Up"},
            {"scenario": "base"}
        ]);
        let map = scenarios_to_map(Some(&list));
        assert_eq!(map.len(), 1);
        assert!(map.contains_key("base"));
    }

    #[test]
    fn defaults_fill_missing_fields() {
        let map = scenarios_to_map(Some(&json!([{"scenario": "base"}])));
        assert_eq!(map["base"], Scenario::default());
    }

    #[test]
    fn fields_are_normalized() {
        let list = json!([{
            "scenario": "Upside",
            "earnings_direction": "Up",
            "confidence": "",
            "primary_drivers": ["Preorders", 3],
            "description": "Wholesale contract renews."
        }]);
        let map = scenarios_to_map(Some(&list));
        assert_eq!(
            map["upside"],
            Scenario {
                earnings_direction: "Up".into(),
                confidence: "—".into(),
                primary_drivers: vec!["Preorders".into(), "3".into()],
                explanation: "Wholesale contract renews.".into(),
            }
        );
    }

    #[test]
    fn present_direction_is_kept_even_when_blank() {
        let map = scenarios_to_map(Some(&json!([
            {"scenario": "base", "earnings_direction": ""},
            {"scenario": "upside", "earnings_direction": null}
        ])));
        assert_eq!(map["base"].earnings_direction, "");
        assert_eq!(map["upside"].earnings_direction, "—");
    }
}
