//! Where the user is.

use async_trait::async_trait;
use hospital_finder_facility_models::Position;
use thiserror::Error;

/// Why a position could not be obtained. Terminal for the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeolocationError {
    /// No geolocation capability is available.
    #[error("Geolocation is not supported on this device.")]
    Unsupported,

    /// The capability exists but did not produce a usable position.
    #[error("Unable to get your location. Please enable location services.")]
    Denied {
        /// Underlying reason, for logs.
        reason: String,
    },
}

/// Source of the user's current position.
#[async_trait]
pub trait Geolocator: Send + Sync {
    /// Acquires the current position.
    ///
    /// # Errors
    ///
    /// Returns [`GeolocationError`] if no position is available.
    async fn locate(&self) -> Result<Position, GeolocationError>;
}

/// A position supplied up front, e.g. from command-line arguments.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedLocation {
    position: Option<Position>,
}

impl FixedLocation {
    /// Creates a locator that always answers `position`, or reports
    /// [`GeolocationError::Unsupported`] when there is none.
    #[must_use]
    pub const fn new(position: Option<Position>) -> Self {
        Self { position }
    }
}

#[async_trait]
impl Geolocator for FixedLocation {
    async fn locate(&self) -> Result<Position, GeolocationError> {
        let position = self.position.ok_or(GeolocationError::Unsupported)?;
        validate(position)
    }
}

/// Rejects coordinates outside the WGS84 range.
///
/// # Errors
///
/// Returns [`GeolocationError::Denied`] for out-of-range or non-finite
/// coordinates.
pub fn validate(position: Position) -> Result<Position, GeolocationError> {
    let Position {
        latitude,
        longitude,
    } = position;

    if !(-90.0..=90.0).contains(&latitude) {
        return Err(GeolocationError::Denied {
            reason: format!("latitude {latitude} out of range"),
        });
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(GeolocationError::Denied {
            reason: format!("longitude {longitude} out of range"),
        });
    }
    Ok(position)
}
