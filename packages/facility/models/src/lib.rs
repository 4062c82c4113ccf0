#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Facility, position, and category types for the hospital finder.
//!
//! These are the shared vocabulary of the workspace: the geodata client
//! produces [`FacilityId`]s, the classifier produces [`Facility`] values,
//! and the presentation layer groups them by [`FacilityCategory`].

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Name given to facilities whose source data carries no `name` tag.
pub const UNNAMED_FACILITY: &str = "Unnamed Hospital";

/// A WGS84 coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl Position {
    /// Creates a position from latitude and longitude.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5},{:.5}", self.latitude, self.longitude)
    }
}

/// `OpenStreetMap` element type a facility was derived from.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ElementKind {
    /// A single point.
    Node,
    /// A closed or open polyline (e.g. a building outline).
    Way,
    /// A group of elements (e.g. a hospital campus).
    Relation,
}

/// Stable identifier of a facility.
///
/// OSM ids are only unique within an element type, so the type is part of
/// the identifier. Displays as `node/123`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FacilityId {
    /// Element type.
    pub kind: ElementKind,
    /// Element id within its type.
    pub id: u64,
}

impl FacilityId {
    /// Creates an identifier.
    #[must_use]
    pub const fn new(kind: ElementKind, id: u64) -> Self {
        Self { kind, id }
    }
}

impl std::fmt::Display for FacilityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.kind, self.id)
    }
}

/// Error returned when parsing a [`FacilityId`] from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidFacilityIdError {
    /// The text that failed to parse.
    pub input: String,
}

impl std::fmt::Display for InvalidFacilityIdError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid facility id '{}': expected <node|way|relation>/<id>",
            self.input
        )
    }
}

impl std::error::Error for InvalidFacilityIdError {}

impl std::str::FromStr for FacilityId {
    type Err = InvalidFacilityIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidFacilityIdError {
            input: s.to_string(),
        };
        let (kind, id) = s.split_once('/').ok_or_else(invalid)?;
        let kind = kind.parse::<ElementKind>().map_err(|_| invalid())?;
        let id = id.parse::<u64>().map_err(|_| invalid())?;
        Ok(Self { kind, id })
    }
}

/// A hospital-like point of interest near the search center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Facility {
    /// Stable identifier from the source data.
    pub id: FacilityId,
    /// Display name, or [`UNNAMED_FACILITY`].
    pub name: String,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Whether the facility is tagged as having an emergency department.
    pub emergency: bool,
    /// Distance from the search center in km, one fractional digit.
    pub distance_km: f64,
}

impl Facility {
    /// Returns the facility's coordinate.
    #[must_use]
    pub const fn position(&self) -> Position {
        Position::new(self.latitude, self.longitude)
    }

    /// Whether the name contains "hospital" (case-insensitive).
    #[must_use]
    pub fn is_named_hospital(&self) -> bool {
        FacilityCategory::Hospital.matches(&self.name)
    }

    /// Returns the first category whose name rule matches this facility.
    #[must_use]
    pub fn category(&self) -> FacilityCategory {
        FacilityCategory::classify(&self.name)
    }
}

/// Display buckets for the list view.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FacilityCategory {
    /// Name contains "hospital".
    #[strum(serialize = "Hospital")]
    Hospital,
    /// Name contains "medical centre" or "medical center".
    #[strum(serialize = "Medical Centre")]
    MedicalCentre,
    /// Everything else.
    #[strum(serialize = "Other")]
    Other,
}

impl FacilityCategory {
    /// Returns all variants in display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Hospital, Self::MedicalCentre, Self::Other]
    }

    /// Whether `name` belongs in this bucket.
    ///
    /// Buckets are independent filters: a name such as
    /// "St Mary's Hospital Medical Centre" matches both `Hospital` and
    /// `MedicalCentre`. `Other` matches only names that match neither.
    #[must_use]
    pub fn matches(self, name: &str) -> bool {
        let lower = name.to_lowercase();
        match self {
            Self::Hospital => lower.contains("hospital"),
            Self::MedicalCentre => {
                lower.contains("medical centre") || lower.contains("medical center")
            }
            Self::Other => !Self::Hospital.matches(name) && !Self::MedicalCentre.matches(name),
        }
    }

    /// Returns the first bucket in display order that matches `name`.
    #[must_use]
    pub fn classify(name: &str) -> Self {
        Self::all()
            .iter()
            .copied()
            .find(|category| category.matches(name))
            .unwrap_or(Self::Other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facility_id_display_and_parse() {
        let id = FacilityId::new(ElementKind::Way, 4_242);
        assert_eq!(id.to_string(), "way/4242");
        assert_eq!("way/4242".parse::<FacilityId>().unwrap(), id);
        assert!("street/1".parse::<FacilityId>().is_err());
        assert!("node/abc".parse::<FacilityId>().is_err());
        assert!("node".parse::<FacilityId>().is_err());
    }

    #[test]
    fn category_display_names() {
        assert_eq!(FacilityCategory::Hospital.to_string(), "Hospital");
        assert_eq!(FacilityCategory::MedicalCentre.to_string(), "Medical Centre");
        assert_eq!(FacilityCategory::Other.to_string(), "Other");
    }

    #[test]
    fn category_matching_is_case_insensitive() {
        assert!(FacilityCategory::Hospital.matches("ROYAL LONDON HOSPITAL"));
        assert!(FacilityCategory::MedicalCentre.matches("Harbour Medical Center"));
        assert!(FacilityCategory::MedicalCentre.matches("Bridge medical centre"));
        assert!(FacilityCategory::Other.matches("Wellness Clinic"));
        assert!(!FacilityCategory::Other.matches("City Hospital"));
    }

    #[test]
    fn overlapping_names_classify_as_hospital_first() {
        let name = "St Mary's Hospital Medical Centre";
        assert!(FacilityCategory::Hospital.matches(name));
        assert!(FacilityCategory::MedicalCentre.matches(name));
        assert_eq!(FacilityCategory::classify(name), FacilityCategory::Hospital);
    }

    #[test]
    fn facility_serializes_camel_case() {
        let facility = Facility {
            id: FacilityId::new(ElementKind::Node, 1),
            name: UNNAMED_FACILITY.to_string(),
            latitude: 51.5,
            longitude: -0.1,
            emergency: true,
            distance_km: 2.5,
        };
        let value = serde_json::to_value(&facility).unwrap();
        assert_eq!(value["distanceKm"], 2.5);
        assert_eq!(value["id"]["kind"], "node");
    }
}
