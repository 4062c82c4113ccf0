//! Overpass endpoint configuration.
//!
//! The default endpoint is described in `services/overpass.toml`, embedded
//! at compile time. Callers can override individual fields by
//! deserializing a partial TOML table; missing fields fall back to the
//! embedded defaults.

use serde::Deserialize;

const DEFAULT_SERVICE_TOML: &str = include_str!("../services/overpass.toml");

/// Connection settings for an Overpass API instance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OverpassConfig {
    /// Interpreter URL (e.g. `"https://overpass-api.de/api/interpreter"`).
    pub endpoint: String,
    /// `User-Agent` header identifying this client.
    pub user_agent: String,
    /// Server-side timeout hint in seconds. The HTTP client waits a few
    /// seconds longer than this before giving up.
    pub timeout_secs: u32,
}

impl OverpassConfig {
    /// Parses the embedded default service definition.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed (it is checked by tests).
    #[must_use]
    pub fn embedded() -> Self {
        #[derive(Deserialize)]
        struct Raw {
            endpoint: String,
            user_agent: String,
            timeout_secs: u32,
        }

        let raw: Raw = toml::de::from_str(DEFAULT_SERVICE_TOML)
            .unwrap_or_else(|e| panic!("Failed to parse embedded Overpass service: {e}"));

        Self {
            endpoint: raw.endpoint,
            user_agent: raw.user_agent,
            timeout_secs: raw.timeout_secs,
        }
    }
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self::embedded()
    }
}
