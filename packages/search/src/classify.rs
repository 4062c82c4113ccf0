//! Turns raw Overpass elements into a ranked list of facilities.
//!
//! Ranking puts facilities whose name mentions "hospital" first and orders
//! by distance within each group, so a named hospital 5 km away comes
//! before a clinic 1 km away.

use std::cmp::Ordering;

use hospital_finder_facility_models::{Facility, FacilityCategory, Position, UNNAMED_FACILITY};
use hospital_finder_overpass::{Element, OverpassResponse};
use hospital_finder_spatial::distance_km;

use crate::SearchSettings;

/// Classifies a response relative to `center`.
///
/// A response without an `elements` list yields an empty result rather
/// than an error; it is logged so that it can be told apart from a
/// genuinely empty area.
#[must_use]
pub fn classify(
    response: &OverpassResponse,
    center: Position,
    settings: &SearchSettings,
) -> Vec<Facility> {
    let Some(elements) = response.elements.as_deref() else {
        log::warn!(
            "Overpass response has no elements list (remark: {}); treating as no results",
            response.remark.as_deref().unwrap_or("none")
        );
        return Vec::new();
    };

    let mut facilities: Vec<Facility> = elements
        .iter()
        .filter(|e| is_hospital(e, settings.query.require_healthcare_tag))
        .filter_map(|e| to_facility(e, center))
        .filter(|f| within_radius(f.distance_km, settings.max_distance_km))
        .collect();

    rank(&mut facilities);

    log::debug!(
        "Classified {} of {} elements as nearby hospitals",
        facilities.len(),
        elements.len()
    );

    facilities
}

/// Whether `element` is a hospital that may take patients.
///
/// Requires `amenity=hospital`, optionally `healthcare=hospital`, and
/// rejects anything explicitly tagged `emergency=no`.
#[must_use]
pub fn is_hospital(element: &Element, require_healthcare_tag: bool) -> bool {
    element.has_tag("amenity", "hospital")
        && (!require_healthcare_tag || element.has_tag("healthcare", "hospital"))
        && !element.has_tag("emergency", "no")
}

/// Builds a [`Facility`] from `element`, or `None` if it has no usable
/// coordinate.
#[must_use]
pub fn to_facility(element: &Element, center: Position) -> Option<Facility> {
    let Some(position) = element.coordinate() else {
        log::debug!("Skipping {} without coordinates", element.facility_id());
        return None;
    };

    let name = element
        .tag("name")
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(UNNAMED_FACILITY)
        .to_string();

    Some(Facility {
        id: element.facility_id(),
        name,
        latitude: position.latitude,
        longitude: position.longitude,
        emergency: element.has_tag("emergency", "yes"),
        distance_km: distance_km(center, position),
    })
}

/// Radius filter on a rounded distance; the boundary is inclusive.
#[must_use]
pub fn within_radius(distance_km: f64, max_distance_km: f64) -> bool {
    distance_km <= max_distance_km
}

/// Stable sort: named hospitals first, then ascending distance.
pub fn rank(facilities: &mut [Facility]) {
    facilities.sort_by(compare);
}

fn compare(a: &Facility, b: &Facility) -> Ordering {
    b.is_named_hospital()
        .cmp(&a.is_named_hospital())
        .then_with(|| a.distance_km.total_cmp(&b.distance_km))
}

/// Groups a ranked list into display buckets.
///
/// Each bucket is an independent filter over `facilities` and keeps its
/// order. Empty buckets are omitted.
#[must_use]
pub fn bucket(facilities: &[Facility]) -> Vec<(FacilityCategory, Vec<&Facility>)> {
    FacilityCategory::all()
        .iter()
        .map(|&category| {
            let members: Vec<&Facility> = facilities
                .iter()
                .filter(|f| category.matches(&f.name))
                .collect();
            (category, members)
        })
        .filter(|(_, members)| !members.is_empty())
        .collect()
}
