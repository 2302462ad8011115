//! Canonical assessment document
//!
//! The fixed-shape `eff_assessment_v1` document consumed by the dashboard.
//! Every field is always present; sparse inputs produce placeholders rather
//! than missing keys.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{json_kind, SchemaError, SchemaResult};
use crate::feature::Features;

/// Schema marker carried in `schema_version`
pub const SCHEMA_VERSION: &str = "eff_assessment_v1";

/// Assessment window used when the source does not state one
pub const DEFAULT_WINDOW_WEEKS: u32 = 8;

/// Placeholder for absent identifiers and labels
pub const MISSING: &str = "—";

/// Posture used when no source provides one
pub const UNKNOWN_POSTURE: &str = "Unknown";

/// Confidence used when no source provides one
pub const UNKNOWN_CONFIDENCE: &str = "unknown";

/// Check whether a marker string names the canonical schema
#[inline]
#[must_use]
pub fn is_canonical_marker(marker: &str) -> bool {
    marker == SCHEMA_VERSION
}

/// Canonical v1 assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalAssessment {
    /// Always [`SCHEMA_VERSION`]
    pub schema_version: String,
    /// Business identifier, [`MISSING`] when unknown
    pub business_id: String,
    /// Assessment window in weeks
    pub window_weeks: u32,
    /// Earnings posture label
    pub posture: String,
    /// Overall confidence label
    pub confidence: String,
    /// One-line summary derived from posture and capacity reality
    pub headline: String,
    /// Per-category assessments, passed through from the source
    pub signals: Signals,
    /// Scenarios keyed by lower-cased name
    pub scenarios: IndexMap<String, Scenario>,
    /// Narrative summary and drivers
    pub narrative: Narrative,
    /// Feature values backing the assessment
    pub explainability: Explainability,
    /// Rule trace and flags
    pub diagnostics: Diagnostics,
}

impl CanonicalAssessment {
    /// Fully shaped document with every placeholder in place
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deserialize from a JSON value
    ///
    /// # Errors
    /// Returns [`SchemaError::NotAnObject`] for a non-object root,
    /// [`SchemaError::VersionMismatch`] when the marker is not
    /// [`SCHEMA_VERSION`], and [`SchemaError::Shape`] when fields are missing
    /// or mistyped.
    pub fn from_value(value: Value) -> SchemaResult<Self> {
        let Value::Object(map) = &value else {
            return Err(SchemaError::not_an_object(&value));
        };
        match map.get("schema_version") {
            Some(Value::String(marker)) if is_canonical_marker(marker) => {}
            Some(Value::String(marker)) => {
                return Err(SchemaError::version_mismatch(SCHEMA_VERSION, marker.as_str()))
            }
            Some(other) => {
                return Err(SchemaError::version_mismatch(SCHEMA_VERSION, json_kind(other)))
            }
            None => return Err(SchemaError::version_mismatch(SCHEMA_VERSION, "nothing")),
        }
        serde_json::from_value(value).map_err(SchemaError::Shape)
    }

    /// Parse from JSON text
    ///
    /// # Errors
    /// Returns [`SchemaError::InvalidJson`] if the text is not JSON, otherwise
    /// the same errors as [`Self::from_value`].
    pub fn from_json(json: &str) -> SchemaResult<Self> {
        let value: Value = serde_json::from_str(json).map_err(SchemaError::InvalidJson)?;
        Self::from_value(value)
    }

    /// Convert to a JSON value
    ///
    /// # Errors
    /// Returns [`SchemaError::Serialization`] if a value cannot be represented.
    pub fn to_value(&self) -> SchemaResult<Value> {
        serde_json::to_value(self).map_err(|e| SchemaError::Serialization(e.to_string()))
    }

    /// Render as indented JSON text
    ///
    /// # Errors
    /// Returns [`SchemaError::Serialization`] if a value cannot be represented.
    pub fn to_json_pretty(&self) -> SchemaResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| SchemaError::Serialization(e.to_string()))
    }

    /// Look up a scenario by name, ignoring case
    #[must_use]
    pub fn scenario(&self, name: &str) -> Option<&Scenario> {
        self.scenarios.get(name.trim().to_lowercase().as_str())
    }
}

impl Default for CanonicalAssessment {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            business_id: MISSING.to_string(),
            window_weeks: DEFAULT_WINDOW_WEEKS,
            posture: UNKNOWN_POSTURE.to_string(),
            confidence: UNKNOWN_CONFIDENCE.to_string(),
            headline: format!("{UNKNOWN_POSTURE}."),
            signals: Signals::default(),
            scenarios: IndexMap::new(),
            narrative: Narrative::default(),
            explainability: Explainability::default(),
            diagnostics: Diagnostics::default(),
        }
    }
}

/// Demand, capacity and risk assessments
///
/// Each category is the source sub-mapping, untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Signals {
    /// Demand assessment
    pub demand: Map<String, Value>,
    /// Capacity assessment
    pub capacity: Map<String, Value>,
    /// Risk assessment
    pub risk: Map<String, Value>,
}

impl Signals {
    /// Category by name (`demand`, `capacity`, `risk`)
    #[must_use]
    pub fn get(&self, category: &str) -> Option<&Map<String, Value>> {
        match category {
            "demand" => Some(&self.demand),
            "capacity" => Some(&self.capacity),
            "risk" => Some(&self.risk),
            _ => None,
        }
    }
}

/// Normalized scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Direction of earnings under this scenario
    pub earnings_direction: String,
    /// Confidence label
    pub confidence: String,
    /// Main drivers, in source order
    pub primary_drivers: Vec<String>,
    /// Free-text explanation
    pub explanation: String,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            earnings_direction: MISSING.to_string(),
            confidence: MISSING.to_string(),
            primary_drivers: Vec::new(),
            explanation: String::new(),
        }
    }
}

/// Narrative section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Narrative {
    /// Base-case summary
    pub summary: String,
    /// At most two joined driver lines, upside first
    pub drivers: Vec<String>,
}

/// Explainability section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Explainability {
    /// Named feature values
    pub features: Features,
}

/// Diagnostics section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    /// Human-readable rule results
    pub rules_fired: Vec<String>,
    /// Reserved; empty when produced by the adapter
    pub flags: Map<String, Value>,
}
