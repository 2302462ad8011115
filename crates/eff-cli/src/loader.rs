//! Payload loading
//!
//! Resolves the `<PATH>` argument to a file, a named fixture, or stdin, and
//! reads it as JSON. Adapting the payload is left to the caller.

use std::io::Read;
use std::path::{Path, PathBuf};

use eff_adapter::from_json_str;
use serde_json::Value;

use crate::error::{CliError, CliResult};

/// Where a payload comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Standard input (`-`)
    Stdin,
    /// A file on disk
    File(PathBuf),
}

impl InputSource {
    /// Resolve an argument against the fixtures directory
    ///
    /// `-` is stdin; an existing path is used directly; otherwise the
    /// argument is looked up as a fixture name (with or without `.json`).
    ///
    /// # Errors
    /// Returns [`CliError::FixtureNotFound`] when nothing matches.
    pub fn resolve(arg: &str, fixtures_dir: &Path) -> CliResult<Self> {
        if arg == "-" {
            return Ok(Self::Stdin);
        }
        let direct = PathBuf::from(arg);
        if direct.is_file() {
            return Ok(Self::File(direct));
        }
        let named = fixtures_dir.join(arg);
        if named.is_file() {
            return Ok(Self::File(named));
        }
        let with_ext = fixtures_dir.join(format!("{arg}.json"));
        if with_ext.is_file() {
            return Ok(Self::File(with_ext));
        }
        Err(CliError::FixtureNotFound {
            name: arg.to_string(),
            dir: fixtures_dir.to_path_buf(),
        })
    }

    /// Read the raw text
    ///
    /// # Errors
    /// Returns [`CliError::Io`] if reading fails.
    pub fn read_text(&self) -> CliResult<String> {
        match self {
            Self::Stdin => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .map_err(|e| CliError::io_error("<stdin>", e))?;
                Ok(text)
            }
            Self::File(path) => {
                std::fs::read_to_string(path).map_err(|e| CliError::io_error(path, e))
            }
        }
    }

    /// Read and deserialize the payload
    ///
    /// # Errors
    /// IO failures as [`CliError::Io`]; text that is not JSON as
    /// [`CliError::Adapter`] wrapping `InvalidJson`.
    pub fn load(&self) -> CliResult<Value> {
        let text = self.read_text()?;
        let value = from_json_str(&text)?;
        tracing::debug!(source = ?self, bytes = text.len(), "loaded payload");
        Ok(value)
    }
}

/// Sorted names of `*.json` files in the fixtures directory
///
/// A missing directory lists as empty.
///
/// # Errors
/// Returns [`CliError::Io`] if the directory exists but cannot be read.
pub fn list_fixtures(dir: &Path) -> CliResult<Vec<String>> {
    if !dir.is_dir() {
        tracing::warn!(dir = %dir.display(), "fixtures directory not found");
        return Ok(Vec::new());
    }
    let entries = std::fs::read_dir(dir).map_err(|e| CliError::io_error(dir, e))?;
    let mut names = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| CliError::io_error(dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                names.push(name.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}
