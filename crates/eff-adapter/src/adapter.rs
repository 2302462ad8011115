//! Bundle adapter
//!
//! Turns a legacy internal bundle into a [`CanonicalAssessment`], and routes
//! arbitrary payloads through detection so canonical documents pass through
//! untouched.

use eff_schema::{
    CanonicalAssessment, Diagnostics, Explainability, FeatureValue, Features, Narrative, Signals,
    SCHEMA_VERSION,
};
use serde_json::{Map, Value};

use crate::detect::is_canonical;
use crate::error::{AdapterError, AdapterResult};
use crate::features::FeatureExtractor;
use crate::remap::LegacyBundle;
use crate::scenarios::scenarios_to_map;

/// Legacy bundle to canonical v1 adapter
#[derive(Debug, Clone, Copy, Default)]
pub struct BundleAdapter {
    extractor: FeatureExtractor,
}

impl BundleAdapter {
    /// Adapter with the standard feature extractor
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adapter using a specific feature extractor
    #[inline]
    #[must_use]
    pub fn with_extractor(mut self, extractor: FeatureExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Adapt a legacy bundle
    ///
    /// Total: any mapping, including an empty one, yields a fully shaped
    /// document.
    #[must_use]
    pub fn adapt(&self, bundle: &Map<String, Value>) -> CanonicalAssessment {
        let view = LegacyBundle::new(bundle);

        let posture = view.posture();
        let headline = view.headline(&posture);
        let features = self.features(&view);
        let scenarios = scenarios_to_map(view.scenarios.get("scenarios"));

        let assessment = CanonicalAssessment {
            schema_version: SCHEMA_VERSION.to_string(),
            business_id: view.business_id(),
            window_weeks: view.window_weeks(),
            posture,
            confidence: view.confidence(),
            headline,
            signals: Signals {
                demand: view.signal("demand"),
                capacity: view.signal("capacity"),
                risk: view.signal("risk"),
            },
            scenarios,
            narrative: Narrative {
                summary: view.summary(),
                drivers: view.drivers(),
            },
            explainability: Explainability { features },
            diagnostics: Diagnostics {
                rules_fired: view.rules_fired(),
                flags: Map::new(),
            },
        };

        tracing::debug!(
            business_id = %assessment.business_id,
            posture = %assessment.posture,
            scenarios = assessment.scenarios.len(),
            features = assessment.explainability.features.len(),
            "adapted legacy bundle"
        );
        assessment
    }

    /// Structured features verbatim, else features mined from key factors
    fn features(&self, view: &LegacyBundle<'_>) -> Features {
        if let Some(structured) = view.structured_features() {
            tracing::trace!(count = structured.len(), "using structured features");
            return structured
                .iter()
                .map(|(name, value)| (name.clone(), FeatureValue::from(value.clone())))
                .collect();
        }
        self.extractor.extract(view.key_factors())
    }

    /// Canonical JSON for any payload
    ///
    /// A canonical payload is returned unchanged; anything else is adapted.
    ///
    /// # Errors
    /// Returns [`AdapterError::NotAnObject`] when a non-canonical payload is
    /// not a mapping, and [`AdapterError::Schema`] if the adapted document
    /// cannot be serialized.
    pub fn to_v1(&self, payload: &Value) -> AdapterResult<Value> {
        if is_canonical(payload) {
            tracing::debug!("payload already canonical");
            return Ok(payload.clone());
        }
        let Value::Object(bundle) = payload else {
            return Err(AdapterError::not_an_object(payload));
        };
        Ok(self.adapt(bundle).to_value()?)
    }
}

/// Parse raw JSON text at the input boundary
///
/// # Errors
/// Returns [`AdapterError::InvalidJson`] when the text is not JSON.
pub fn from_json_str(raw: &str) -> AdapterResult<Value> {
    serde_json::from_str(raw).map_err(AdapterError::InvalidJson)
}

/// Canonical JSON for any payload, using the standard adapter
///
/// # Errors
/// See [`BundleAdapter::to_v1`].
pub fn to_v1(payload: &Value) -> AdapterResult<Value> {
    BundleAdapter::new().to_v1(payload)
}

/// Adapt a legacy bundle with the standard adapter
#[must_use]
pub fn adapt_bundle(bundle: &Map<String, Value>) -> CanonicalAssessment {
    BundleAdapter::new().adapt(bundle)
}
