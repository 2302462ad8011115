//! EFF Canonical Schema
//!
//! Typed form of the `eff_assessment_v1` document that the dashboard renders.
//!
//! # Core Concepts
//!
//! - [`CanonicalAssessment`]: The fixed-shape display document
//! - [`Signals`], [`Scenario`], [`Narrative`], [`Explainability`], [`Diagnostics`]: Its sections
//! - [`FeatureValue`]: A named explainability value (flag, number, or verbatim JSON)
//! - [`SCHEMA_VERSION`]: The marker that identifies canonical documents
//!
//! # Example
//!
//! ```
//! use eff_schema::{CanonicalAssessment, SCHEMA_VERSION};
//!
//! let assessment = CanonicalAssessment::default();
//! assert_eq!(assessment.schema_version, SCHEMA_VERSION);
//! assert_eq!(assessment.headline, "Unknown.");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod assessment;
pub mod error;
pub mod feature;

pub use assessment::{
    is_canonical_marker, CanonicalAssessment, Diagnostics, Explainability, Narrative, Scenario,
    Signals, DEFAULT_WINDOW_WEEKS, MISSING, SCHEMA_VERSION, UNKNOWN_CONFIDENCE, UNKNOWN_POSTURE,
};
pub use error::{json_kind, SchemaError, SchemaResult};
pub use feature::{FeatureValue, Features};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
