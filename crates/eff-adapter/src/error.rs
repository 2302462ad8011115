//! Error types for the adapter boundary
//!
//! Adaptation itself is total. The only failures are at the edges:
//! - Raw text that is not JSON (reported distinctly, see [`AdapterError::InvalidJson`])
//! - A JSON root that is not a mapping
//! - Serializing the canonical document back to JSON

use eff_schema::{json_kind, SchemaError};
use serde_json::Value;

/// Errors surfaced to callers of the adapter
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    /// Raw input could not be deserialized
    #[error("invalid json: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// Input deserialized, but the root is not a mapping
    #[error("expected a json object, got {found}")]
    NotAnObject { found: &'static str },

    /// Canonical output could not be produced
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),
}

impl AdapterError {
    /// Create a root-shape error for the given value
    #[must_use]
    pub fn not_an_object(value: &Value) -> Self {
        Self::NotAnObject {
            found: json_kind(value),
        }
    }

    /// True when the failure happened before adaptation started
    #[inline]
    #[must_use]
    pub fn is_deserialization(&self) -> bool {
        matches!(self, Self::InvalidJson(_))
    }
}

/// Result type alias for adapter operations
pub type AdapterResult<T> = Result<T, AdapterError>;
