//! Testing utilities for EFF workspace
//! 
//! Shared bundle builders and fixture documents.

#![allow(missing_docs)]

use eff_schema::{CanonicalAssessment, FeatureValue, Scenario};
use serde_json::{json, Map, Value};

/// Unwrap a `json!` object literal into its map
pub fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a json object, got {other}"),
    }
}

/// A complete legacy bundle, shaped like the upstream assessment output
pub fn legacy_bundle() -> Value {
    json!({
        "business_id": "bakery-042",
        "window_weeks": 12,
        "demand": {
            "assessment": "Demand is steady with strong repeat customers.",
            "key_factors": [
                "demand_stability: 0.85",
                "Repeat strength is 0.64 across the window.",
                "orders_trend: -0.05"
            ],
            "risks_or_constraints": ["Seasonal dip after holidays"]
        },
        "capacity": {
            "assessment": "Ovens run close to their limit on weekends.",
            "key_factors": [
                "Capacity utilization is 0.92.",
                "The `capacity_constraint_flag` is true"
            ]
        },
        "risk": {
            "assessment": "Customer concentration is moderate.",
            "key_factors": "avg_top3_customer_share: 0.41 and std_over_mean_orders: 0.15"
        },
        "narrative": {
            "confidence_level": "medium",
            "base_case_summary": "Earnings hold flat while capacity stays the binding limit.",
            "upside_conditions": ["Second oven commissioned", "Wholesale contract renews"],
            "downside_risks": ["Flour prices spike"],
            "diagnostics": {
                "demand_certainty": "high",
                "capacity_reality": "constrained",
                "earnings_posture_rule_result": "Capacity-Limited",
                "confidence_level_rule_result": "medium"
            }
        },
        "scenarios": {
            "posture": "Capacity-Limited",
            "scenarios": [
                {
                    "scenario": "Base",
                    "earnings_direction": "Flat",
                    "confidence": "medium",
                    "primary_drivers": ["Weekend capacity", "Repeat customers"],
                    "description": "Volume holds; margins steady."
                },
                {
                    "scenario": "Upside",
                    "earnings_direction": "Up",
                    "confidence": "low",
                    "primary_drivers": ["Second oven"],
                    "description": "Added capacity converts waitlisted orders."
                },
                {
                    "scenario": "Downside",
                    "earnings_direction": "Down",
                    "confidence": "medium",
                    "primary_drivers": ["Input costs"],
                    "description": "Ingredient costs squeeze margins."
                }
            ]
        }
    })
}

/// A bundle whose only content is the given key factors per signal
pub fn bundle_with_key_factors(demand: Value, capacity: Value, risk: Value) -> Value {
    json!({
        "demand": {"key_factors": demand},
        "capacity": {"key_factors": capacity},
        "risk": {"key_factors": risk}
    })
}

/// A bundle with scenario records only
pub fn bundle_with_scenarios(records: Value) -> Value {
    json!({"scenarios": {"scenarios": records}})
}

/// A small canonical document
pub fn canonical_assessment() -> CanonicalAssessment {
    let mut assessment = CanonicalAssessment::new();
    assessment.business_id = "bakery-042".into();
    assessment.posture = "Strong".into();
    assessment.confidence = "high".into();
    assessment.headline = "Strong.".into();
    assessment.narrative.summary = "Earnings grow with demand.".into();
    assessment.scenarios.insert(
        "base".into(),
        Scenario {
            earnings_direction: "Up".into(),
            confidence: "high".into(),
            primary_drivers: vec!["Repeat customers".into()],
            explanation: "Orders keep growing.".into(),
        },
    );
    assessment
        .explainability
        .features
        .insert("demand_stability".into(), FeatureValue::from(json!(0.9)));
    assessment
}

/// The canonical document as JSON
pub fn canonical_value() -> Value {
    serde_json::to_value(canonical_assessment()).unwrap()
}
