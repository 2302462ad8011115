//! Schema detection
//!
//! Classifies a payload as canonical (already `eff_assessment_v1`) or as a
//! legacy bundle that needs adapting. Detection never fails.

use std::fmt;

use eff_schema::is_canonical_marker;
use serde_json::Value;

/// Field that carries the schema marker
pub const MARKER_FIELD: &str = "schema_version";

/// Shape of an incoming payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    /// Already canonical; used as-is
    Canonical,
    /// Legacy internal bundle; requires adaptation
    LegacyBundle,
}

impl SchemaKind {
    /// Short lowercase label
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Canonical => "canonical",
            Self::LegacyBundle => "legacy",
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// True iff the payload's marker field equals the canonical marker
#[must_use]
pub fn is_canonical(payload: &Value) -> bool {
    payload
        .get(MARKER_FIELD)
        .and_then(Value::as_str)
        .is_some_and(is_canonical_marker)
}

/// Classify a payload
#[must_use]
pub fn detect(payload: &Value) -> SchemaKind {
    if is_canonical(payload) {
        SchemaKind::Canonical
    } else {
        SchemaKind::LegacyBundle
    }
}
