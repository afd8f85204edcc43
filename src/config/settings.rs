//! Settings loading from config.toml
//!
//! The settings file names the database and the execution context (current company)
//! stamped on generated timesheet works. Every key is optional.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::warn;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Database URL, overridden by the `DATABASE_URL` environment variable
    #[serde(default)]
    pub database_url: Option<String>,
    /// Execution context defaults
    #[serde(default)]
    pub context: ContextSettings,
}

/// The `[context]` table
#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct ContextSettings {
    /// Company generated works are created for
    #[serde(default)]
    pub company: Option<i64>,
}

/// Loads settings from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads settings from the default location (./config.toml).
///
/// A missing file is not an error: defaults are used instead.
pub fn load_default_config() -> Result<Settings> {
    let path = Path::new("config.toml");
    if !path.exists() {
        warn!("config.toml not found, using default settings");
        return Ok(Settings::default());
    }
    load_config(path)
}
