//! Error types for the canonical schema
//!
//! Covers the conversions between raw JSON and [`CanonicalAssessment`]:
//! - Deserialization of untrusted text
//! - Shape checks on the document root
//! - Schema marker mismatches
//!
//! [`CanonicalAssessment`]: crate::CanonicalAssessment

/// Errors converting between JSON and the canonical schema
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Input text is not valid JSON
    #[error("invalid json: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// Document root is not a JSON object
    #[error("expected a json object at the document root, got {found}")]
    NotAnObject { found: &'static str },

    /// Document carries a different schema marker
    #[error("schema version mismatch: expected {expected}, got {found}")]
    VersionMismatch { expected: String, found: String },

    /// Document is JSON but does not match the canonical shape
    #[error("document does not match the canonical shape: {0}")]
    Shape(#[source] serde_json::Error),

    /// Serialization back to JSON failed
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl SchemaError {
    /// Create a root-shape error naming the JSON kind that was found
    #[must_use]
    pub fn not_an_object(value: &serde_json::Value) -> Self {
        Self::NotAnObject {
            found: json_kind(value),
        }
    }

    /// Create a version mismatch error
    pub fn version_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::VersionMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }
}

/// Human-readable name of a JSON value's kind
#[must_use]
pub fn json_kind(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Result type alias for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;
