//! Subcommand implementations
//!
//! Each command returns the text to print so the binary only handles
//! process concerns (logging, exit codes).

use eff_adapter::{detect as detect_kind, to_v1, SchemaKind};
use serde_json::Value;

use crate::config::DashboardConfig;
use crate::error::{CliError, CliResult};
use crate::loader::{list_fixtures, InputSource};
use crate::report;

/// Shown when the input is not JSON
pub const PARSE_FAILURE: &str = "Could not parse this JSON.";

/// Shown when the input is JSON but cannot be adapted
pub const RENDER_FAILURE: &str = "Could not render this JSON. Check format and required fields.";

/// Shown when the input cannot be found or read
pub const LOAD_FAILURE: &str = "Could not load input.";

/// User-facing headline for a failure
#[must_use]
pub fn failure_message(err: &CliError) -> &'static str {
    match err {
        _ if err.is_parse_failure() => PARSE_FAILURE,
        CliError::Adapter(_) | CliError::Json(_) => RENDER_FAILURE,
        _ => LOAD_FAILURE,
    }
}

/// Fixture names, one per line
///
/// # Errors
/// Returns [`CliError::Io`] if the fixtures directory cannot be read.
pub fn list(config: &DashboardConfig) -> CliResult<String> {
    let names = list_fixtures(&config.fixtures_dir)?;
    if names.is_empty() {
        return Ok(format!(
            "No example files found in: {}\n",
            config.fixtures_dir.display()
        ));
    }
    Ok(names.into_iter().map(|name| name + "\n").collect())
}

/// Classify a payload
///
/// # Errors
/// Load and parse failures.
pub fn detect(source: &InputSource) -> CliResult<SchemaKind> {
    Ok(detect_kind(&source.load()?))
}

/// Load and convert to canonical JSON
///
/// # Errors
/// Load and parse failures, and [`CliError::Adapter`] when the payload is not
/// a mapping.
pub fn canonical(source: &InputSource) -> CliResult<Value> {
    let payload = source.load()?;
    let kind = detect_kind(&payload);
    tracing::info!(%kind, "adapting payload");
    Ok(to_v1(&payload)?)
}

/// Canonical JSON text
///
/// # Errors
/// Same as [`canonical`], plus [`CliError::Json`] if the output cannot be
/// serialized.
pub fn adapt(source: &InputSource, compact: bool) -> CliResult<String> {
    let doc = canonical(source)?;
    let text = if compact {
        serde_json::to_string(&doc)?
    } else {
        serde_json::to_string_pretty(&doc)?
    };
    Ok(text + "\n")
}

/// Plain-text dashboard
///
/// # Errors
/// Same as [`canonical`].
pub fn show(source: &InputSource, config: &DashboardConfig) -> CliResult<String> {
    let doc = canonical(source)?;
    Ok(report::render(&doc, config))
}
