//! Dashboard configuration
//!
//! Defaults cover everything; an optional TOML file overrides any subset.
//!
//! ```toml
//! fixtures_dir = "fixtures"
//! summary_chars = 520
//! driver_chars = 160
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CliError, CliResult};

/// File picked up from the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "eff.toml";

/// Presentation settings for the dashboard report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Directory holding example assessment JSON files
    pub fixtures_dir: PathBuf,
    /// Clamp width for the narrative summary
    pub summary_chars: usize,
    /// Clamp width for each decision driver line
    pub driver_chars: usize,
    /// Maximum decision driver lines shown
    pub max_drivers: usize,
    /// Maximum key factors / risks shown per signal
    pub max_list_items: usize,
    /// Maximum primary drivers shown per scenario
    pub max_scenario_drivers: usize,
}

impl DashboardConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With fixtures directory
    #[inline]
    #[must_use]
    pub fn with_fixtures_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.fixtures_dir = dir.into();
        self
    }

    /// With summary clamp width
    #[inline]
    #[must_use]
    pub fn with_summary_chars(mut self, chars: usize) -> Self {
        self.summary_chars = chars;
        self
    }

    /// Parse from TOML text
    ///
    /// # Errors
    /// Returns [`CliError::Config`] if the text is not valid config TOML.
    pub fn from_toml_str(text: &str, origin: &Path) -> CliResult<Self> {
        toml::from_str(text).map_err(|source| CliError::Config {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Load from a TOML file
    ///
    /// # Errors
    /// Returns [`CliError::Io`] if the file cannot be read and
    /// [`CliError::Config`] if it does not parse.
    pub fn load(path: &Path) -> CliResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| CliError::io_error(path, e))?;
        Self::from_toml_str(&text, path)
    }

    /// Explicit file if given, else [`DEFAULT_CONFIG_FILE`] if present, else defaults
    ///
    /// # Errors
    /// Same as [`Self::load`] for whichever file is used.
    pub fn discover(explicit: Option<&Path>) -> CliResult<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let fallback = Path::new(DEFAULT_CONFIG_FILE);
        if fallback.is_file() {
            tracing::debug!(path = %fallback.display(), "loading config");
            return Self::load(fallback);
        }
        Ok(Self::default())
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            fixtures_dir: PathBuf::from("fixtures"),
            summary_chars: 520,
            driver_chars: 160,
            max_drivers: 2,
            max_list_items: 10,
            max_scenario_drivers: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_toml_keeps_defaults() {
        let config =
            DashboardConfig::from_toml_str("summary_chars = 200\n", Path::new("eff.toml")).unwrap();
        assert_eq!(config.summary_chars, 200);
        assert_eq!(config.driver_chars, 160);
        assert_eq!(config.fixtures_dir, PathBuf::from("fixtures"));
    }

    #[test]
    fn invalid_toml_names_the_file() {
        let err =
            DashboardConfig::from_toml_str("summary_chars = \"wide\"", Path::new("conf/eff.toml"))
                .unwrap_err();
        assert!(matches!(err, CliError::Config { .. }));
        assert!(err.to_string().contains("conf/eff.toml"));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "fixtures_dir = \"samples\"\nmax_list_items = 3").unwrap();

        let config = DashboardConfig::load(file.path()).unwrap();
        assert_eq!(config.fixtures_dir, PathBuf::from("samples"));
        assert_eq!(config.max_list_items, 3);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = DashboardConfig::discover(Some(Path::new("/nonexistent/eff.toml"))).unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
    }

    #[test]
    fn builders_override() {
        let config = DashboardConfig::new()
            .with_fixtures_dir("/tmp/fixtures")
            .with_summary_chars(80);
        assert_eq!(config.fixtures_dir, PathBuf::from("/tmp/fixtures"));
        assert_eq!(config.summary_chars, 80);
    }
}
