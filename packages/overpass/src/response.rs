//! Wire types for the Overpass JSON output format.

use std::collections::BTreeMap;

use hospital_finder_facility_models::{ElementKind, FacilityId, Position};
use serde::Deserialize;

/// Top-level Overpass JSON document.
///
/// `elements` is optional: a document without it (e.g. a remark-only
/// answer) is not a transport failure and is left for the caller to
/// interpret.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OverpassResponse {
    /// Matched elements, if the document carried a result list.
    #[serde(default)]
    pub elements: Option<Vec<Element>>,
    /// Server remark, present when the query hit a runtime error.
    #[serde(default)]
    pub remark: Option<String>,
}

/// Geometry center emitted by `out center` for ways and relations.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ElementCenter {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lon: f64,
}

/// A tagged map element.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Element {
    /// Element type.
    #[serde(rename = "type")]
    pub kind: ElementKind,
    /// Element id within its type.
    pub id: u64,
    /// Point latitude (nodes only).
    #[serde(default)]
    pub lat: Option<f64>,
    /// Point longitude (nodes only).
    #[serde(default)]
    pub lon: Option<f64>,
    /// Geometry center (ways and relations).
    #[serde(default)]
    pub center: Option<ElementCenter>,
    /// OSM tags.
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl Element {
    /// Returns the value of tag `key`.
    #[must_use]
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// Whether tag `key` is present with exactly `value`.
    #[must_use]
    pub fn has_tag(&self, key: &str, value: &str) -> bool {
        self.tag(key) == Some(value)
    }

    /// Identifier combining type and id.
    #[must_use]
    pub const fn facility_id(&self) -> FacilityId {
        FacilityId::new(self.kind, self.id)
    }

    /// The element's coordinate: the explicit point if present, otherwise
    /// the geometry center.
    #[must_use]
    pub fn coordinate(&self) -> Option<Position> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(Position::new(lat, lon)),
            _ => self.center.map(|c| Position::new(c.lat, c.lon)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nodes_and_ways() {
        let body = serde_json::json!({
            "version": 0.6,
            "elements": [
                {
                    "type": "node",
                    "id": 1,
                    "lat": 51.51,
                    "lon": -0.12,
                    "tags": { "amenity": "hospital", "name": "St Thomas' Hospital" }
                },
                {
                    "type": "way",
                    "id": 2,
                    "center": { "lat": 51.52, "lon": -0.11 },
                    "tags": { "amenity": "hospital" }
                }
            ]
        });
        let response: OverpassResponse = serde_json::from_value(body).unwrap();
        let elements = response.elements.unwrap();
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].tag("name"), Some("St Thomas' Hospital"));
        assert_eq!(
            elements[1].coordinate(),
            Some(Position::new(51.52, -0.11))
        );
        assert_eq!(elements[1].facility_id().to_string(), "way/2");
    }

    #[test]
    fn explicit_point_wins_over_center() {
        let element: Element = serde_json::from_value(serde_json::json!({
            "type": "relation",
            "id": 3,
            "lat": 1.0,
            "lon": 2.0,
            "center": { "lat": 3.0, "lon": 4.0 }
        }))
        .unwrap();
        assert_eq!(element.coordinate(), Some(Position::new(1.0, 2.0)));
        assert!(element.tags.is_empty());
    }

    #[test]
    fn element_without_geometry_has_no_coordinate() {
        let element: Element =
            serde_json::from_value(serde_json::json!({ "type": "way", "id": 4 })).unwrap();
        assert_eq!(element.coordinate(), None);
    }

    #[test]
    fn missing_elements_field_is_not_an_error() {
        let response: OverpassResponse =
            serde_json::from_value(serde_json::json!({ "remark": "runtime error" })).unwrap();
        assert!(response.elements.is_none());
        assert_eq!(response.remark.as_deref(), Some("runtime error"));
    }
}
