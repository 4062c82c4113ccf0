//! Tunables for the search pipeline.

use std::time::Duration;

use hospital_finder_overpass::QueryOptions;
use serde::Deserialize;

/// Facilities farther than this (after rounding) are dropped.
pub const DEFAULT_MAX_DISTANCE_KM: f64 = 10.0;

/// Quiet period before a position change triggers a request.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Search pipeline settings.
///
/// Deserializes from a partial TOML table; missing fields keep their
/// defaults.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Overpass query parameters.
    pub query: QueryOptions,
    /// Radius filter applied to rounded distances, in km.
    pub max_distance_km: f64,
    /// Debounce quiet period in milliseconds.
    pub debounce_ms: u64,
}

impl SearchSettings {
    /// Debounce quiet period.
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            query: QueryOptions::default(),
            max_distance_km: DEFAULT_MAX_DISTANCE_KM,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}
