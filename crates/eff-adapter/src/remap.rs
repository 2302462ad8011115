//! Field remapping for legacy bundles
//!
//! Every canonical top-level field is resolved from an ordered fallback
//! chain over the bundle's sections. Each chain is written out in one place
//! so its precedence can be read and tested on its own.

use eff_schema::{DEFAULT_WINDOW_WEEKS, MISSING, UNKNOWN_CONFIDENCE, UNKNOWN_POSTURE};
use serde_json::{Map, Value};

use crate::lookup::{is_truthy, non_empty_list, render_slot, render_text, resolve_text, section};

/// Labels and diagnostics keys rendered into `rules_fired`, in order
pub const RULE_SLOTS: [(&str, &str); 4] = [
    ("demand_certainty", "demand_certainty"),
    ("capacity_reality", "capacity_reality"),
    ("earnings_posture", "earnings_posture_rule_result"),
    ("confidence", "confidence_level_rule_result"),
];

/// Borrowed view over the sections of a legacy bundle
///
/// Missing or non-object sections read as empty mappings.
#[derive(Debug, Clone, Copy)]
pub struct LegacyBundle<'a> {
    /// Whole bundle
    pub root: &'a Map<String, Value>,
    /// `demand` section
    pub demand: &'a Map<String, Value>,
    /// `capacity` section
    pub capacity: &'a Map<String, Value>,
    /// `risk` section
    pub risk: &'a Map<String, Value>,
    /// `narrative` section
    pub narrative: &'a Map<String, Value>,
    /// `scenarios` section (the mapping, not the list inside it)
    pub scenarios: &'a Map<String, Value>,
    /// `narrative.diagnostics`
    pub diagnostics: &'a Map<String, Value>,
}

impl<'a> LegacyBundle<'a> {
    /// View the sections of `root`
    #[must_use]
    pub fn new(root: &'a Map<String, Value>) -> Self {
        let narrative = section(root, "narrative");
        Self {
            root,
            demand: section(root, "demand"),
            capacity: section(root, "capacity"),
            risk: section(root, "risk"),
            narrative,
            scenarios: section(root, "scenarios"),
            diagnostics: section(narrative, "diagnostics"),
        }
    }

    /// Top level, then scenarios, narrative and demand sections
    #[must_use]
    pub fn business_id(&self) -> String {
        resolve_text(
            [
                self.root.get("business_id"),
                self.scenarios.get("business_id"),
                self.narrative.get("business_id"),
                self.demand.get("business_id"),
            ],
            MISSING,
        )
    }

    /// Scenarios posture, then the diagnostics posture rule result
    #[must_use]
    pub fn posture(&self) -> String {
        resolve_text(
            [
                self.scenarios.get("posture"),
                self.diagnostics.get("earnings_posture_rule_result"),
            ],
            UNKNOWN_POSTURE,
        )
    }

    /// Narrative confidence, then the diagnostics confidence rule result
    #[must_use]
    pub fn confidence(&self) -> String {
        resolve_text(
            [
                self.narrative.get("confidence_level"),
                self.diagnostics.get("confidence_level_rule_result"),
            ],
            UNKNOWN_CONFIDENCE,
        )
    }

    /// `window_weeks` as a non-negative integer, else the default
    #[must_use]
    pub fn window_weeks(&self) -> u32 {
        self.root
            .get("window_weeks")
            .and_then(Value::as_u64)
            .and_then(|weeks| u32::try_from(weeks).ok())
            .unwrap_or(DEFAULT_WINDOW_WEEKS)
    }

    /// `"{posture}."` plus `" Capacity reality: {value}."` when known
    #[must_use]
    pub fn headline(&self, posture: &str) -> String {
        match self.diagnostics.get("capacity_reality").filter(|v| is_truthy(v)) {
            Some(reality) => format!("{posture}. Capacity reality: {}.", render_text(reality)),
            None => format!("{posture}."),
        }
    }

    /// Base-case summary, then the future earnings profile
    #[must_use]
    pub fn summary(&self) -> String {
        resolve_text(
            [
                self.narrative.get("base_case_summary"),
                self.narrative.get("future_earnings_profile"),
            ],
            "",
        )
    }

    /// Joined upside and downside lines, upside first, each only if present
    #[must_use]
    pub fn drivers(&self) -> Vec<String> {
        [
            ("Upside conditions", "upside_conditions"),
            ("Downside risks", "downside_risks"),
        ]
        .into_iter()
        .filter_map(|(label, key)| {
            let items = non_empty_list(self.narrative, key)?;
            let joined = items.iter().map(render_text).collect::<Vec<_>>().join("; ");
            Some(format!("{label}: {joined}"))
        })
        .collect()
    }

    /// The four `label: value` rule lines
    #[must_use]
    pub fn rules_fired(&self) -> Vec<String> {
        RULE_SLOTS
            .iter()
            .map(|(label, key)| format!("{label}: {}", render_slot(self.diagnostics.get(*key))))
            .collect()
    }

    /// Signal section passed through, or empty for a non-object
    #[must_use]
    pub fn signal(&self, category: &str) -> Map<String, Value> {
        section(self.root, category).clone()
    }

    /// Structured features, when present as a non-empty mapping
    #[must_use]
    pub fn structured_features(&self) -> Option<&'a Map<String, Value>> {
        match self.root.get("features") {
            Some(Value::Object(features)) if !features.is_empty() => Some(features),
            _ => None,
        }
    }

    /// `key_factors` of demand, capacity and risk, in that order
    #[must_use]
    pub fn key_factors(&self) -> [Option<&'a Value>; 3] {
        [
            self.demand.get("key_factors"),
            self.capacity.get("key_factors"),
            self.risk.get("key_factors"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn bundle(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test bundle must be an object"),
        }
    }

    #[test]
    fn business_id_chain() {
        let only_narrative = bundle(json!({"narrative": {"business_id": "from-narrative"}}));
        assert_eq!(LegacyBundle::new(&only_narrative).business_id(), "from-narrative");

        let both = bundle(json!({
            "business_id": "top",
            "narrative": {"business_id": "from-narrative"}
        }));
        assert_eq!(LegacyBundle::new(&both).business_id(), "top");

        let falsy_top = bundle(json!({
            "business_id": "",
            "scenarios": {"business_id": "from-scenarios"},
            "demand": {"business_id": "from-demand"}
        }));
        assert_eq!(LegacyBundle::new(&falsy_top).business_id(), "from-scenarios");

        let only_demand = bundle(json!({"demand": {"business_id": "from-demand"}}));
        assert_eq!(LegacyBundle::new(&only_demand).business_id(), "from-demand");

        assert_eq!(LegacyBundle::new(&Map::new()).business_id(), "—");
    }

    #[test]
    fn posture_and_confidence_fall_back_to_diagnostics() {
        let map = bundle(json!({
            "narrative": {
                "diagnostics": {
                    "earnings_posture_rule_result": "Fragile",
                    "confidence_level_rule_result": "medium"
                }
            }
        }));
        let view = LegacyBundle::new(&map);
        assert_eq!(view.posture(), "Fragile");
        assert_eq!(view.confidence(), "medium");

        let map = bundle(json!({
            "scenarios": {"posture": "Strong"},
            "narrative": {
                "confidence_level": "high",
                "diagnostics": {
                    "earnings_posture_rule_result": "Fragile",
                    "confidence_level_rule_result": "medium"
                }
            }
        }));
        let view = LegacyBundle::new(&map);
        assert_eq!(view.posture(), "Strong");
        assert_eq!(view.confidence(), "high");

        let empty = Map::new();
        let view = LegacyBundle::new(&empty);
        assert_eq!(view.posture(), "Unknown");
        assert_eq!(view.confidence(), "unknown");
    }

    #[test]
    fn headline_composition() {
        let map = bundle(json!({"narrative": {"diagnostics": {"capacity_reality": "constrained"}}}));
        assert_eq!(
            LegacyBundle::new(&map).headline("Strong"),
            "Strong. Capacity reality: constrained."
        );

        let map = bundle(json!({"narrative": {"diagnostics": {"capacity_reality": ""}}}));
        assert_eq!(LegacyBundle::new(&map).headline("Strong"), "Strong.");
        assert_eq!(LegacyBundle::new(&Map::new()).headline("Strong"), "Strong.");
    }

    #[test]
    fn summary_chain() {
        let map = bundle(json!({"narrative": {"future_earnings_profile": "Stable."}}));
        assert_eq!(LegacyBundle::new(&map).summary(), "Stable.");

        let map = bundle(json!({"narrative": {
            "base_case_summary": "Base.",
            "future_earnings_profile": "Stable."
        }}));
        assert_eq!(LegacyBundle::new(&map).summary(), "Base.");
        assert_eq!(LegacyBundle::new(&Map::new()).summary(), "");
    }

    #[test]
    fn drivers_join_each_list_into_one_line() {
        let map = bundle(json!({"narrative": {
            "downside_risks": ["B1", "B2"],
            "upside_conditions": ["A1", "A2", "A3"]
        }}));
        assert_eq!(
            LegacyBundle::new(&map).drivers(),
            vec![
                "Upside conditions: A1; A2; A3".to_string(),
                "Downside risks: B1; B2".to_string()
            ]
        );
    }

    #[test]
    fn drivers_omit_missing_or_empty_lists() {
        let map = bundle(json!({"narrative": {"upside_conditions": [], "downside_risks": ["B"]}}));
        assert_eq!(LegacyBundle::new(&map).drivers(), vec!["Downside risks: B".to_string()]);

        let map = bundle(json!({"narrative": {"upside_conditions": "A"}}));
        assert!(LegacyBundle::new(&map).drivers().is_empty());
    }

    #[test]
    fn rules_fired_render_absent_slots() {
        let map = bundle(json!({"narrative": {"diagnostics": {
            "demand_certainty": "high",
            "earnings_posture_rule_result": "Strong"
        }}}));
        assert_eq!(
            LegacyBundle::new(&map).rules_fired(),
            vec![
                "demand_certainty: high".to_string(),
                "capacity_reality: null".to_string(),
                "earnings_posture: Strong".to_string(),
                "confidence: null".to_string(),
            ]
        );
    }

    #[test]
    fn window_weeks_defaults() {
        let view_of = |value: Value| LegacyBundle::new(&bundle(value)).window_weeks();
        assert_eq!(view_of(json!({"window_weeks": 12})), 12);
        assert_eq!(view_of(json!({})), 8);
        assert_eq!(view_of(json!({"window_weeks": "12"})), 8);
        assert_eq!(view_of(json!({"window_weeks": -4})), 8);
        assert_eq!(view_of(json!({"window_weeks": 6.5})), 8);
    }

    #[test]
    fn mistyped_sections_read_as_empty() {
        let map = bundle(json!({
            "narrative": "not a mapping",
            "scenarios": ["also", "not"],
            "demand": null
        }));
        let view = LegacyBundle::new(&map);
        assert!(view.narrative.is_empty());
        assert!(view.scenarios.is_empty());
        assert!(view.diagnostics.is_empty());
        assert!(view.signal("demand").is_empty());
    }

    #[test]
    fn structured_features_require_non_empty_mapping() {
        let map = bundle(json!({"features": {}}));
        assert!(LegacyBundle::new(&map).structured_features().is_none());

        let map = bundle(json!({"features": [1]}));
        assert!(LegacyBundle::new(&map).structured_features().is_none());

        let map = bundle(json!({"features": {"demand_stability": 0.85}}));
        assert_eq!(LegacyBundle::new(&map).structured_features().map(Map::len), Some(1));
    }
}
