//! Free-text feature extraction
//!
//! When a bundle carries no structured `features`, explainability values are
//! mined from the `key_factors` sentences of the demand, capacity and risk
//! assessments. Extraction is best-effort: only a narrow set of phrasings is
//! recognized and everything else is skipped.
//!
//! # Recognized forms
//!
//! | Kind    | Form                        | Example                                  |
//! |---------|-----------------------------|------------------------------------------|
//! | flag    | `` `name` is true|false ``  | ``The `capacity_constraint_flag` is false`` |
//! | flag    | `name is true|false`        | `volatility_flag is true`                |
//! | flag    | `name: true|false`          | `volatility_flag: false`                 |
//! | number  | `` `name` is <num> ``       | ``The `std_over_mean_orders` is 0.15``  |
//! | number  | `name: <num>`               | `demand_stability: 0.85`                 |
//! | number  | `name is <num>`             | `Capacity utilization is 0.72.`          |
//!
//! Matching is case-insensitive. Every matcher is applied to every sentence,
//! flags before numbers, and each contributes its first match. A later value
//! for the same name overwrites an earlier one.
//!
//! Value tokens are ASCII only: digits outside `0-9` are not numbers, and
//! `true`/`false` fold case over ASCII letters alone. Names may use any word
//! characters.

use eff_schema::{FeatureValue, Features};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Signed, optionally fractional number token
const NUMBER: &str = r"[-+]?[0-9]*\.?[0-9]+";

/// Boolean literal token, ASCII case folding only
const BOOLEAN: &str = r"(?i-u:true|false)";

/// What a matcher captures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureKind {
    /// `true` / `false`
    Flag,
    /// Signed decimal number
    Number,
}

/// One recognized surface form
#[derive(Debug)]
pub struct Matcher {
    /// Short name of the form, used in traces
    pub form: &'static str,
    /// Kind of value captured
    pub kind: CaptureKind,
    regex: Regex,
}

impl Matcher {
    fn new(form: &'static str, kind: CaptureKind, template: &str) -> Self {
        let token = match kind {
            CaptureKind::Flag => BOOLEAN,
            CaptureKind::Number => NUMBER,
        };
        let pattern = format!("(?i){}", template.replace("{v}", &format!("(?P<v>{token})")));
        Self {
            form,
            kind,
            regex: Regex::new(&pattern).expect("feature patterns are valid regex"),
        }
    }

    /// First `(name, value)` capture in `text`
    #[must_use]
    pub fn capture<'t>(&self, text: &'t str) -> Option<(&'t str, &'t str)> {
        let caps = self.regex.captures(text)?;
        Some((caps.name("k")?.as_str(), caps.name("v")?.as_str()))
    }
}

/// All recognized forms in application order
static MATCHERS: Lazy<Vec<Matcher>> = Lazy::new(|| {
    use CaptureKind::{Flag, Number};
    vec![
        Matcher::new("quoted-is-flag", Flag, r"`(?P<k>[\w_]+)`\s+is\s+{v}"),
        Matcher::new("is-flag", Flag, r"(?P<k>[\w_]+)\s+is\s+{v}"),
        Matcher::new("colon-flag", Flag, r"(?P<k>[\w_]+)\s*:\s*{v}"),
        Matcher::new("quoted-is-number", Number, r"`(?P<k>[\w_]+)`\s+is\s+{v}"),
        Matcher::new("colon-number", Number, r"(?P<k>[\w_]+)\s*:\s*{v}"),
        Matcher::new("is-number", Number, r"(?P<k>[\w_]+)\s+is\s+{v}"),
    ]
});

/// Extracts features from free-text sentences
#[derive(Debug, Clone, Copy)]
pub struct FeatureExtractor {
    matchers: &'static [Matcher],
}

impl FeatureExtractor {
    /// Extractor over the standard forms
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            matchers: MATCHERS.as_slice(),
        }
    }

    /// Matchers in application order
    #[inline]
    #[must_use]
    pub fn matchers(&self) -> &'static [Matcher] {
        self.matchers
    }

    /// Extract features from text sources, in order
    ///
    /// Each source may be a single string or an array of strings; any other
    /// value, and non-string array items, are skipped.
    pub fn extract<'a, I>(&self, sources: I) -> Features
    where
        I: IntoIterator<Item = Option<&'a Value>>,
    {
        let mut features = Features::new();
        for source in sources.into_iter().flatten() {
            match source {
                Value::String(text) => self.extract_text(text, &mut features),
                Value::Array(items) => {
                    for text in items.iter().filter_map(Value::as_str) {
                        self.extract_text(text, &mut features);
                    }
                }
                _ => {}
            }
        }
        features
    }

    /// Apply every matcher to one sentence, accumulating into `features`
    pub fn extract_text(&self, text: &str, features: &mut Features) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        for matcher in self.matchers {
            let Some((name, raw)) = matcher.capture(text) else {
                continue;
            };
            let name = normalize_name(name);
            if name.is_empty() {
                continue;
            }
            match parse_value(matcher.kind, raw) {
                Some(value) => {
                    features.insert(name, value);
                }
                None => {
                    tracing::trace!(form = matcher.form, %name, raw, "discarding unparseable capture");
                }
            }
        }
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract features with the standard forms
pub fn extract_features<'a, I>(sources: I) -> Features
where
    I: IntoIterator<Item = Option<&'a Value>>,
{
    FeatureExtractor::new().extract(sources)
}

fn normalize_name(name: &str) -> String {
    name.trim().replace(' ', "_")
}

fn parse_value(kind: CaptureKind, raw: &str) -> Option<FeatureValue> {
    match kind {
        CaptureKind::Flag => match raw.to_ascii_lowercase().as_str() {
            "true" => Some(FeatureValue::Flag(true)),
            "false" => Some(FeatureValue::Flag(false)),
            _ => None,
        },
        CaptureKind::Number => raw.parse::<f64>().ok().and_then(FeatureValue::number),
    }
}
