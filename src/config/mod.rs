//! JSON document loading.
//!
//! Two kinds of documents are read here: the settings file (drawing style
//! and logging) and the package/symbol descriptions handed to the
//! generators.
//!
//! # Where settings come from
//!
//! 1. The file given with `--config`
//! 2. Otherwise:
//!    - **Linux/macOS:** `~/.eda-artifact-gen/config.json`
//!    - **Windows:** `%USERPROFILE%\.eda-artifact-gen\config.json`
//!
//! A missing file at the default location is not an error; built-in
//! defaults are used instead.

mod settings;

pub use settings::{Config, LoggingConfig, StyleConfig};

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::error::ConfigError;
use crate::footprint::PackageSpec;
use crate::symbol::SymbolSpec;

/// Per-user settings directory.
///
/// - **Linux/macOS:** `~/.eda-artifact-gen/`
/// - **Windows:** `%USERPROFILE%\.eda-artifact-gen\`
#[must_use]
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".eda-artifact-gen"))
}

/// Settings file read when `--config` is not given.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    default_config_dir().map(|p| p.join("config.json"))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Loads and parses the settings file.
///
/// If `path` is `None`, uses the platform-specific default location and
/// falls back to defaults when no file exists there.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given file cannot be found
/// - The file cannot be read
/// - The JSON is malformed
/// - A setting is invalid
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let config: Config = match (path, default_config_path()) {
        (Some(explicit), _) => read_json(explicit)?,
        (None, Some(default)) if default.exists() => read_json(&default)?,
        (None, _) => return Ok(Config::default()),
    };
    config.validate()?;
    Ok(config)
}

/// Loads and validates a package description.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or the engine
/// rejects the description.
pub fn load_package_spec(path: &Path) -> Result<PackageSpec, ConfigError> {
    let spec: PackageSpec = read_json(path)?;
    spec.validate().map_err(|e| ConfigError::InvalidPackage {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(spec)
}

/// Loads and validates a symbol description.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or the
/// description is inconsistent.
pub fn load_symbol_spec(path: &Path) -> Result<SymbolSpec, ConfigError> {
    let spec: SymbolSpec = read_json(path)?;
    spec.validate().map_err(|e| ConfigError::InvalidSymbol {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(spec)
}
