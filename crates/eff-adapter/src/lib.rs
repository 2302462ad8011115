//! EFF Bundle Adapter
//!
//! Converts the legacy internal assessment bundle into the canonical
//! `eff_assessment_v1` display schema.
//!
//! # Pipeline
//!
//! ```text
//! raw JSON → from_json_str → detect ─┬─ Canonical ──────────────────────────→ unchanged
//!                                    └─ LegacyBundle → BundleAdapter::adapt → CanonicalAssessment
//!                                                         ├─ remap      (fallback chains)
//!                                                         ├─ scenarios  (list → map)
//!                                                         └─ features   (structured or free text)
//! ```
//!
//! Adaptation is pure and total: missing or mistyped structure becomes a
//! placeholder, never an error. Only the boundaries fail (text that is not
//! JSON, a root that is not a mapping).
//!
//! # Example
//!
//! ```
//! use eff_adapter::to_v1;
//! use serde_json::json;
//!
//! let bundle = json!({
//!     "scenarios": {"posture": "Strong"},
//!     "narrative": {"diagnostics": {"capacity_reality": "constrained"}},
//!     "demand": {"key_factors": ["demand_stability: 0.85"]}
//! });
//!
//! let out = to_v1(&bundle).unwrap();
//! assert_eq!(out["headline"], "Strong. Capacity reality: constrained.");
//! assert_eq!(out["explainability"]["features"]["demand_stability"], 0.85);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod adapter;
pub mod detect;
pub mod error;
pub mod features;
pub mod lookup;
pub mod remap;
pub mod scenarios;

pub use adapter::{adapt_bundle, from_json_str, to_v1, BundleAdapter};
pub use detect::{detect, is_canonical, SchemaKind, MARKER_FIELD};
pub use error::{AdapterError, AdapterResult};
pub use features::{extract_features, CaptureKind, FeatureExtractor, Matcher};
pub use remap::LegacyBundle;
pub use scenarios::scenarios_to_map;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for adapting assessment payloads
    pub use crate::{detect, from_json_str, to_v1, AdapterError, BundleAdapter, SchemaKind};
    pub use eff_schema::{CanonicalAssessment, FeatureValue, Features, SCHEMA_VERSION};
}
