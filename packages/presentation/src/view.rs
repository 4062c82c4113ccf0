//! View models consumed by map and list renderers.

use hospital_finder_facility_models::{Facility, FacilityCategory, FacilityId, Position};
use hospital_finder_search::classify::bucket;
use serde::Serialize;

use crate::{FOCUS_ZOOM, OVERVIEW_ZOOM, SearchStatus, SelectionState};

/// Heading shown above the list.
pub const LIST_HEADING: &str = "Nearby Hospitals";

/// Shown while the position is being acquired.
pub const LOCATING_MESSAGE: &str = "Loading your location...";

/// Shown while a search is pending or in flight.
pub const LOADING_MESSAGE: &str = "Loading hospitals...";

/// Shown when a search resolved without results.
pub const EMPTY_MESSAGE: &str = "No hospitals found nearby";

/// Label of the user's own marker.
pub const USER_MARKER_LABEL: &str = "You are here";

/// Map contents.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    /// Map center (the user's position).
    pub center: Position,
    /// Zoom level.
    pub zoom: u8,
    /// The user's marker.
    pub user_marker: UserMarker,
    /// One marker per facility, in ranked order.
    pub markers: Vec<Marker>,
}

/// Marker for the user's own position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserMarker {
    /// Position.
    pub position: Position,
    /// Popup text.
    pub label: String,
}

/// Marker for a facility.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    /// Facility identifier, echoed back on selection.
    pub id: FacilityId,
    /// Position.
    pub position: Position,
    /// Facility name.
    pub label: String,
    /// Popup body, e.g. `"Distance: 2.5 km"`.
    pub popup: String,
    /// Primary display bucket.
    pub category: FacilityCategory,
    /// Whether the facility has an emergency department.
    pub emergency: bool,
    /// Whether this is the selected facility.
    pub highlighted: bool,
}

/// Instruction to move the map to a selected facility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Recenter {
    /// New map center.
    pub target: Position,
    /// New zoom level.
    pub zoom: u8,
}

impl Recenter {
    /// Focus on `facility` at [`FOCUS_ZOOM`].
    #[must_use]
    pub const fn to_facility(facility: &Facility) -> Self {
        Self {
            target: facility.position(),
            zoom: FOCUS_ZOOM,
        }
    }
}

/// List contents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListView {
    /// Heading text.
    pub heading: String,
    /// Body depending on search status.
    pub body: ListBody,
}

/// What the list area shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ListBody {
    /// Waiting for a position.
    Locating {
        /// Status text.
        message: String,
    },
    /// Waiting for results.
    Loading {
        /// Status text.
        message: String,
    },
    /// Location or search failure.
    Error {
        /// Status text.
        message: String,
    },
    /// Search resolved without results.
    Empty {
        /// Status text.
        message: String,
    },
    /// Results grouped by category.
    Groups {
        /// Non-empty groups in category order.
        groups: Vec<ListGroup>,
    },
}

impl ListBody {
    /// Status text for non-result bodies.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Locating { message }
            | Self::Loading { message }
            | Self::Error { message }
            | Self::Empty { message } => Some(message),
            Self::Groups { .. } => None,
        }
    }
}

/// A category section in the list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListGroup {
    /// Bucket.
    pub category: FacilityCategory,
    /// Section title (the category's display name).
    pub title: String,
    /// Members in ranked order.
    pub items: Vec<ListItem>,
}

/// A facility row in the list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItem {
    /// Facility identifier, echoed back on selection.
    pub id: FacilityId,
    /// Facility name.
    pub name: String,
    /// Distance text, e.g. `"2.5 km"`.
    pub distance: String,
    /// Whether the facility has an emergency department.
    pub emergency: bool,
    /// Whether this is the selected facility.
    pub highlighted: bool,
}

/// Formats a distance for display.
#[must_use]
pub fn format_distance(distance_km: f64) -> String {
    format!("{distance_km:.1} km")
}

/// Builds the map view around `center`.
#[must_use]
pub fn map_view(center: Position, facilities: &[Facility], selection: &SelectionState) -> MapView {
    MapView {
        center,
        zoom: OVERVIEW_ZOOM,
        user_marker: UserMarker {
            position: center,
            label: USER_MARKER_LABEL.to_string(),
        },
        markers: facilities
            .iter()
            .map(|f| Marker {
                id: f.id,
                position: f.position(),
                label: f.name.clone(),
                popup: format!("Distance: {}", format_distance(f.distance_km)),
                category: f.category(),
                emergency: f.emergency,
                highlighted: selection.is_selected(f.id),
            })
            .collect(),
    }
}

/// Builds the list view for the given status.
#[must_use]
pub fn list_view(
    status: &SearchStatus,
    facilities: &[Facility],
    selection: &SelectionState,
) -> ListView {
    let body = match status {
        SearchStatus::Locating => ListBody::Locating {
            message: LOCATING_MESSAGE.to_string(),
        },
        SearchStatus::Loading => ListBody::Loading {
            message: LOADING_MESSAGE.to_string(),
        },
        SearchStatus::Failed { message } => ListBody::Error {
            message: message.clone(),
        },
        SearchStatus::Ready if facilities.is_empty() => ListBody::Empty {
            message: EMPTY_MESSAGE.to_string(),
        },
        SearchStatus::Ready => ListBody::Groups {
            groups: bucket(facilities)
                .into_iter()
                .map(|(category, members)| ListGroup {
                    category,
                    title: category.to_string(),
                    items: members
                        .into_iter()
                        .map(|f| list_item(f, selection))
                        .collect(),
                })
                .collect(),
        },
    };

    ListView {
        heading: LIST_HEADING.to_string(),
        body,
    }
}

fn list_item(facility: &Facility, selection: &SelectionState) -> ListItem {
    ListItem {
        id: facility.id,
        name: facility.name.clone(),
        distance: format_distance(facility.distance_km),
        emergency: facility.emergency,
        highlighted: selection.is_selected(facility.id),
    }
}

#[cfg(test)]
mod tests {
    use hospital_finder_facility_models::ElementKind;

    use super::*;

    fn facility(id: u64, name: &str, distance_km: f64) -> Facility {
        Facility {
            id: FacilityId::new(ElementKind::Node, id),
            name: name.to_string(),
            latitude: 51.5 + f64::from(u32::try_from(id).unwrap()) / 100.0,
            longitude: -0.1,
            emergency: id == 1,
            distance_km,
        }
    }

    #[test]
    fn map_view_marks_selection() {
        let facilities = vec![facility(1, "City Hospital", 2.0), facility(2, "Clinic", 3.25)];
        let mut selection = SelectionState::default();
        selection.toggle(facilities[1].id);

        let view = map_view(Position::new(51.5, -0.1), &facilities, &selection);
        assert_eq!(view.zoom, OVERVIEW_ZOOM);
        assert_eq!(view.user_marker.label, "You are here");
        assert_eq!(view.markers.len(), 2);
        assert!(!view.markers[0].highlighted);
        assert!(view.markers[1].highlighted);
        assert_eq!(view.markers[0].popup, "Distance: 2.0 km");
        assert_eq!(view.markers[0].category, FacilityCategory::Hospital);
        assert_eq!(view.markers[1].category, FacilityCategory::Other);
    }

    #[test]
    fn list_view_groups_ready_results() {
        let facilities = vec![
            facility(1, "City Hospital", 2.0),
            facility(2, "Town Medical Centre", 1.0),
            facility(3, "Wellness Clinic", 0.5),
        ];
        let view = list_view(&SearchStatus::Ready, &facilities, &SelectionState::default());
        assert_eq!(view.heading, "Nearby Hospitals");
        let ListBody::Groups { groups } = view.body else {
            panic!("expected groups");
        };
        let titles: Vec<&str> = groups.iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, vec!["Hospital", "Medical Centre", "Other"]);
        assert_eq!(groups[0].items[0].distance, "2.0 km");
        assert!(groups[0].items[0].emergency);
    }

    #[test]
    fn list_view_status_messages() {
        let selection = SelectionState::default();
        let cases = [
            (SearchStatus::Locating, "Loading your location..."),
            (SearchStatus::Loading, "Loading hospitals..."),
            (SearchStatus::Ready, "No hospitals found nearby"),
            (
                SearchStatus::Failed {
                    message: "boom".to_string(),
                },
                "boom",
            ),
        ];
        for (status, expected) in cases {
            let view = list_view(&status, &[], &selection);
            assert_eq!(view.body.message(), Some(expected), "{status:?}");
        }
    }

    #[test]
    fn recenter_uses_focus_zoom() {
        let f = facility(4, "Harbour Hospital", 1.0);
        let recenter = Recenter::to_facility(&f);
        assert_eq!(recenter.target, f.position());
        assert_eq!(recenter.zoom, FOCUS_ZOOM);
    }

    #[test]
    fn list_body_serializes_tagged() {
        let view = list_view(&SearchStatus::Loading, &[], &SelectionState::default());
        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["body"]["kind"], "loading");
        assert_eq!(value["body"]["message"], "Loading hospitals...");
    }
}
