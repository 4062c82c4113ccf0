#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Nearby-hospital search pipeline.
//!
//! A position update flows through the [`fetcher::DebouncedFetcher`]:
//!
//! 1. The [`cache::FacilityCache`] is consulted with the position's
//!    [`CacheKey`](hospital_finder_spatial::CacheKey). A hit resolves
//!    immediately without touching the network.
//! 2. On a miss, a debounce timer starts. Further updates restart it.
//! 3. When the timer fires, an Overpass query is sent through the
//!    [`FacilitySource`] seam.
//! 4. The response is turned into a ranked facility list by
//!    [`classify::classify`] and cached.
//!
//! Every update bumps a generation counter. Requests from older
//! generations are cancelled, and any completion that still arrives for
//! an older generation is discarded.

pub mod cache;
pub mod classify;
pub mod fetcher;
pub mod geolocation;
pub mod settings;

pub use fetcher::{DebouncedFetcher, FetchEvent};
pub use geolocation::{FixedLocation, GeolocationError, Geolocator};
pub use settings::SearchSettings;

use async_trait::async_trait;
use hospital_finder_overpass::{OverpassClient, OverpassError, OverpassResponse};
use thiserror::Error;

/// User-facing message for any failed search request.
pub const FETCH_FAILED_MESSAGE: &str =
    "Failed to fetch nearby hospitals. Please try again later.";

/// Errors from driving a [`DebouncedFetcher`].
#[derive(Debug, Error)]
pub enum FetchError {
    /// The worker task has shut down and no longer accepts updates.
    #[error("Search worker has stopped")]
    WorkerStopped,
}

/// The remote geodata service, as seen by the fetcher.
#[async_trait]
pub trait FacilitySource: Send + Sync {
    /// Runs an Overpass QL query.
    ///
    /// # Errors
    ///
    /// Returns [`OverpassError`] on transport, status, or decode failure.
    async fn fetch(&self, query: &str) -> Result<OverpassResponse, OverpassError>;
}

#[async_trait]
impl FacilitySource for OverpassClient {
    async fn fetch(&self, query: &str) -> Result<OverpassResponse, OverpassError> {
        self.execute(query).await
    }
}
