//! In-memory cache of ranked search results.
//!
//! Keyed by [`CacheKey`], so positions within the same 0.01° cell share an
//! entry. Entries live for the lifetime of the session; there is no
//! eviction.

use std::collections::BTreeMap;

use hospital_finder_facility_models::Facility;
use hospital_finder_spatial::CacheKey;

/// Ranked facility lists by position bucket.
#[derive(Debug, Default)]
pub struct FacilityCache {
    entries: BTreeMap<CacheKey, Vec<Facility>>,
}

impl FacilityCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached list for `key`.
    #[must_use]
    pub fn get(&self, key: &CacheKey) -> Option<&[Facility]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Stores `facilities` under `key`, replacing any previous entry.
    pub fn put(&mut self, key: CacheKey, facilities: Vec<Facility>) {
        self.entries.insert(key, facilities);
    }

    /// Number of cached buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been cached yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
