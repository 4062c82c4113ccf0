//! Optional TOML overrides for the Overpass endpoint and search settings.
//!
//! ```toml
//! [overpass]
//! endpoint = "https://overpass.kumi.systems/api/interpreter"
//!
//! [search]
//! debounce_ms = 500
//! max_distance_km = 5.0
//!
//! [search.query]
//! radius_m = 5000
//! require_healthcare_tag = true
//! ```
//!
//! Every table and field is optional. The query's `[timeout:N]` hint
//! always follows `overpass.timeout_secs`.

use std::path::{Path, PathBuf};

use hospital_finder_overpass::OverpassConfig;
use hospital_finder_search::SearchSettings;
use serde::Deserialize;
use thiserror::Error;

/// Errors from loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read config {}: {source}", path.display())]
    Io {
        /// File that was requested.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema.
    #[error("Invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Combined configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Overpass endpoint.
    pub overpass: OverpassConfig,
    /// Search pipeline tunables.
    pub search: SearchSettings,
}

impl AppConfig {
    /// Loads overrides from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&text)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parses overrides from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] if the text does not match the schema.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::de::from_str(text)?)
    }

    /// Loads `path` when given, otherwise the built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// Search settings with the query timeout synced to the endpoint's.
    #[must_use]
    pub const fn search_settings(&self) -> SearchSettings {
        let mut settings = self.search;
        settings.query.timeout_secs = self.overpass.timeout_secs;
        settings
    }
}
