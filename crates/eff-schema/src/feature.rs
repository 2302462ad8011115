//! Explainability feature values
//!
//! Features are either supplied directly by the upstream bundle (kept
//! verbatim) or mined from free text (always a flag or a number).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Flat, insertion-ordered mapping of feature name to value
pub type Features = IndexMap<String, FeatureValue>;

/// A single explainability feature value
///
/// Serializes untagged, so a feature renders as a bare JSON boolean,
/// number, or whatever value the upstream bundle supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    /// Boolean feature (`capacity_constraint_flag`)
    Flag(bool),
    /// Numeric feature (`demand_stability`)
    Number(Number),
    /// Any other structured value, kept as supplied
    Raw(Value),
}

impl FeatureValue {
    /// Numeric feature from a float
    ///
    /// Returns `None` for NaN and infinities, which JSON cannot carry.
    #[inline]
    #[must_use]
    pub fn number(value: f64) -> Option<Self> {
        Number::from_f64(value).map(Self::Number)
    }

    /// Numeric view of this feature
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            Self::Raw(v) => v.as_f64(),
            Self::Flag(_) => None,
        }
    }

    /// Boolean view of this feature
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Flag(b) => Some(*b),
            Self::Raw(v) => v.as_bool(),
            Self::Number(_) => None,
        }
    }

    /// Back to a plain JSON value
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Flag(b) => Value::Bool(*b),
            Self::Number(n) => Value::Number(n.clone()),
            Self::Raw(v) => v.clone(),
        }
    }
}

impl From<bool> for FeatureValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<Value> for FeatureValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Bool(b) => Self::Flag(b),
            Value::Number(n) => Self::Number(n),
            other => Self::Raw(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn number_rejects_non_finite() {
        assert!(FeatureValue::number(f64::NAN).is_none());
        assert!(FeatureValue::number(f64::INFINITY).is_none());
        assert_eq!(FeatureValue::number(0.85).and_then(|f| f.as_f64()), Some(0.85));
    }

    #[test]
    fn from_value_keeps_integers_verbatim() {
        let feature = FeatureValue::from(json!(3));
        assert_eq!(feature.to_value(), json!(3));
        assert_ne!(feature.to_value(), json!(3.0));
    }

    #[test]
    fn raw_values_survive_serialization() {
        let features: Features = [
            ("flag".to_string(), FeatureValue::from(false)),
            ("note".to_string(), FeatureValue::from(json!("seasonal"))),
        ]
        .into_iter()
        .collect();

        let value = serde_json::to_value(&features).unwrap();
        assert_eq!(value, json!({"flag": false, "note": "seasonal"}));

        let back: Features = serde_json::from_value(value).unwrap();
        assert_eq!(back["flag"].as_bool(), Some(false));
        assert_eq!(back["note"], FeatureValue::Raw(json!("seasonal")));
    }
}
