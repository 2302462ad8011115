//! Error types for the CLI
//!
//! Loading failures (files, config) are kept apart from adapter failures so
//! the binary can report "could not parse" and "could not render" distinctly.

use std::path::PathBuf;

use eff_adapter::AdapterError;

/// Errors while loading inputs or configuration
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// IO error reading a file or directory
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Named fixture does not exist
    #[error("no fixture named '{name}' in {dir}")]
    FixtureNotFound { name: String, dir: PathBuf },

    /// Configuration file is not valid TOML for [`DashboardConfig`]
    ///
    /// [`DashboardConfig`]: crate::config::DashboardConfig
    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Payload parsing or adaptation failed
    #[error(transparent)]
    Adapter(#[from] AdapterError),

    /// Output JSON could not be written
    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the input could not be deserialized at all
    #[must_use]
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, Self::Adapter(err) if err.is_deserialization())
    }
}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, CliError>;
