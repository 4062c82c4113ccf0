#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Great-circle distance and coordinate bucketing.
//!
//! Distances use the haversine formula on a spherical Earth of radius
//! [`EARTH_RADIUS_KM`] and are reported rounded to a tenth of a kilometre,
//! which is the precision shown to users and the precision the radius
//! filter compares against.
//!
//! [`CacheKey`] buckets a position into a 0.01° cell so that near-identical
//! positions share search results.

use hospital_finder_facility_models::Position;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Raw haversine distance between two positions in kilometres.
#[must_use]
pub fn haversine_km(from: Position, to: Position) -> f64 {
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lng = (to.longitude - from.longitude).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + from.latitude.to_radians().cos()
            * to.latitude.to_radians().cos()
            * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Haversine distance rounded to one decimal place.
#[must_use]
pub fn distance_km(from: Position, to: Position) -> f64 {
    round_to_tenth(haversine_km(from, to))
}

/// Rounds to one fractional digit.
#[must_use]
pub fn round_to_tenth(value: f64) -> f64 {
    round_half_up(value * 10.0) / 10.0
}

/// Rounds to the nearest integer, with halves going toward positive
/// infinity (`-0.5` becomes `-0.0`, `0.5` becomes `1.0`).
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// A position bucketed to two decimal places (roughly 1.1 km of latitude).
///
/// Stored as integer hundredths of a degree so that keys compare and hash
/// exactly. Displays as `"51.50,-0.10"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CacheKey {
    lat_hundredths: i64,
    lng_hundredths: i64,
}

impl CacheKey {
    /// Buckets `position` by rounding each coordinate to two decimals.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_position(position: Position) -> Self {
        Self {
            lat_hundredths: round_half_up(position.latitude * 100.0) as i64,
            lng_hundredths: round_half_up(position.longitude * 100.0) as i64,
        }
    }

    /// Rounded latitude.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn latitude(self) -> f64 {
        self.lat_hundredths as f64 / 100.0
    }

    /// Rounded longitude.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn longitude(self) -> f64 {
        self.lng_hundredths as f64 / 100.0
    }
}

impl From<Position> for CacheKey {
    fn from(position: Position) -> Self {
        Self::from_position(position)
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2},{:.2}", self.latitude(), self.longitude())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONDON: Position = Position::new(51.5074, -0.1278);
    const PARIS: Position = Position::new(48.8566, 2.3522);
    const SYDNEY: Position = Position::new(-33.8688, 151.2093);

    #[test]
    fn distance_to_self_is_zero() {
        for p in [LONDON, PARIS, SYDNEY, Position::new(0.0, 0.0)] {
            assert!(distance_km(p, p).abs() < f64::EPSILON, "{p}");
        }
    }

    #[test]
    fn distance_is_symmetric() {
        let pairs = [(LONDON, PARIS), (PARIS, SYDNEY), (SYDNEY, LONDON)];
        for (a, b) in pairs {
            assert!(
                (distance_km(a, b) - distance_km(b, a)).abs() < f64::EPSILON,
                "{a} <-> {b}"
            );
        }
    }

    #[test]
    fn london_to_paris() {
        // Reference value for R = 6371 km.
        let d = distance_km(LONDON, PARIS);
        assert!((d - 343.5).abs() < 0.5, "got {d}");
    }

    #[test]
    fn meridian_distance_is_arc_length() {
        let from = Position::new(51.5, -0.1);
        let to = Position::new(52.5, -0.1);
        let expected = EARTH_RADIUS_KM * 1.0_f64.to_radians();
        assert!((haversine_km(from, to) - expected).abs() < 1e-9);
    }

    #[test]
    fn distance_has_one_fractional_digit() {
        let d = distance_km(LONDON, Position::new(51.52, -0.1));
        assert!(((d * 10.0).round() - d * 10.0).abs() < 1e-9, "got {d}");
    }

    #[test]
    fn cache_key_is_stable() {
        let a = CacheKey::from_position(LONDON);
        let b = CacheKey::from_position(LONDON);
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "51.51,-0.13");
    }

    #[test]
    fn cache_key_collapses_nearby_positions() {
        let a = CacheKey::from_position(Position::new(51.501, -0.101));
        let b = CacheKey::from_position(Position::new(51.504, -0.104));
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "51.50,-0.10");
    }

    #[test]
    fn cache_key_rounds_negative_halves_up() {
        let key = CacheKey::from_position(Position::new(0.125, -0.125));
        assert_eq!(key.to_string(), "0.13,-0.12");
    }

    #[test]
    fn cache_key_separates_distinct_cells() {
        let a = CacheKey::from_position(Position::new(51.50, -0.10));
        let b = CacheKey::from_position(Position::new(51.52, -0.10));
        assert_ne!(a, b);
    }
}
