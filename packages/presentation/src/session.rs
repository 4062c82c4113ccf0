//! Session-scoped UI state.

use hospital_finder_facility_models::{Facility, FacilityId, Position};
use hospital_finder_search::{FetchEvent, GeolocationError};
use serde::Serialize;

use crate::view::{self, ListView, MapView, Recenter};
use crate::SelectionState;

/// What the session is waiting for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum SearchStatus {
    /// No position yet.
    Locating,
    /// A search is pending or in flight.
    Loading,
    /// Results (possibly empty) are available.
    Ready,
    /// Location or search failed.
    Failed {
        /// User-facing message.
        message: String,
    },
}

/// Owner of position, results and selection for one session.
#[derive(Debug, Clone)]
pub struct SearchSession {
    position: Option<Position>,
    status: SearchStatus,
    facilities: Vec<Facility>,
    selection: SelectionState,
    generation: u64,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchSession {
    /// A session waiting for its first position.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            position: None,
            status: SearchStatus::Locating,
            facilities: Vec::new(),
            selection: SelectionState::new(),
            generation: 0,
        }
    }

    /// Current position, once known.
    #[must_use]
    pub const fn position(&self) -> Option<Position> {
        self.position
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> &SearchStatus {
        &self.status
    }

    /// Ranked facilities from the latest successful search.
    #[must_use]
    pub fn facilities(&self) -> &[Facility] {
        &self.facilities
    }

    /// Current selection.
    #[must_use]
    pub const fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Records that no position could be obtained. Terminal.
    pub fn location_failed(&mut self, error: &GeolocationError) {
        log::warn!("Geolocation failed: {error:?}");
        self.status = SearchStatus::Failed {
            message: error.to_string(),
        };
    }

    /// Folds a fetcher event into the session.
    ///
    /// Events older than the newest generation already applied are
    /// ignored.
    pub fn apply(&mut self, event: &FetchEvent) {
        let generation = event.generation();
        if generation < self.generation {
            log::debug!(
                "Ignoring event for generation {generation} (session at {})",
                self.generation
            );
            return;
        }
        self.generation = generation;
        self.position = Some(event.center());

        match event {
            FetchEvent::Pending { .. } | FetchEvent::Loading { .. } => {
                self.status = SearchStatus::Loading;
            }
            FetchEvent::Resolved { facilities, .. } => {
                self.facilities.clone_from(facilities);
                self.status = SearchStatus::Ready;
                let stale = self
                    .selection
                    .selected()
                    .is_some_and(|id| self.find(id).is_none());
                if stale {
                    self.selection.clear();
                }
            }
            FetchEvent::Failed { message, .. } => {
                self.facilities.clear();
                self.selection.clear();
                self.status = SearchStatus::Failed {
                    message: message.clone(),
                };
            }
        }
    }

    /// Toggles selection of `id`.
    ///
    /// Returns where to move the map when `id` becomes selected; `None` when
    /// it was deselected or is not in the current results.
    pub fn select(&mut self, id: FacilityId) -> Option<Recenter> {
        let Some(facility) = self.find(id) else {
            log::warn!("Ignoring selection of unknown facility {id}");
            return None;
        };
        let recenter = Recenter::to_facility(facility);

        self.selection.toggle(id).then_some(recenter)
    }

    /// The map view, once a position is known.
    #[must_use]
    pub fn map_view(&self) -> Option<MapView> {
        self.position
            .map(|center| view::map_view(center, &self.facilities, &self.selection))
    }

    /// The list view.
    #[must_use]
    pub fn list_view(&self) -> ListView {
        view::list_view(&self.status, &self.facilities, &self.selection)
    }

    fn find(&self, id: FacilityId) -> Option<&Facility> {
        self.facilities.iter().find(|f| f.id == id)
    }
}

#[cfg(test)]
mod tests {
    use hospital_finder_facility_models::ElementKind;
    use hospital_finder_search::FETCH_FAILED_MESSAGE;

    use super::*;
    use crate::{FOCUS_ZOOM, ListBody};

    const CENTER: Position = Position::new(51.5, -0.1);

    fn facility(id: u64, name: &str) -> Facility {
        Facility {
            id: FacilityId::new(ElementKind::Node, id),
            name: name.to_string(),
            latitude: 51.51,
            longitude: -0.1,
            emergency: false,
            distance_km: 1.1,
        }
    }

    fn resolved(generation: u64, facilities: Vec<Facility>) -> FetchEvent {
        FetchEvent::Resolved {
            generation,
            center: CENTER,
            facilities,
            from_cache: false,
        }
    }

    #[test]
    fn starts_locating_without_map() {
        let session = SearchSession::new();
        assert_eq!(session.status(), &SearchStatus::Locating);
        assert!(session.map_view().is_none());
    }

    #[test]
    fn location_failure_is_shown() {
        let mut session = SearchSession::new();
        session.location_failed(&GeolocationError::Unsupported);
        assert_eq!(
            session.list_view().body.message(),
            Some("Geolocation is not supported on this device.")
        );
    }

    #[test]
    fn loading_then_resolved() {
        let mut session = SearchSession::new();
        session.apply(&FetchEvent::Loading {
            generation: 1,
            center: CENTER,
        });
        assert_eq!(session.status(), &SearchStatus::Loading);
        assert_eq!(session.map_view().unwrap().center, CENTER);

        session.apply(&resolved(1, vec![facility(1, "City Hospital")]));
        assert_eq!(session.status(), &SearchStatus::Ready);
        assert_eq!(session.facilities().len(), 1);
        assert!(matches!(session.list_view().body, ListBody::Groups { .. }));
    }

    #[test]
    fn failure_clears_results() {
        let mut session = SearchSession::new();
        session.apply(&resolved(1, vec![facility(1, "City Hospital")]));
        session.select(FacilityId::new(ElementKind::Node, 1));

        session.apply(&FetchEvent::Failed {
            generation: 2,
            center: CENTER,
            message: FETCH_FAILED_MESSAGE.to_string(),
        });
        assert!(session.facilities().is_empty());
        assert_eq!(session.selection().selected(), None);
        assert_eq!(session.list_view().body.message(), Some(FETCH_FAILED_MESSAGE));
    }

    #[test]
    fn older_generation_is_ignored() {
        let mut session = SearchSession::new();
        session.apply(&resolved(2, vec![facility(2, "New Hospital")]));
        session.apply(&resolved(1, vec![facility(1, "Old Hospital")]));
        assert_eq!(session.facilities()[0].name, "New Hospital");
    }

    #[test]
    fn select_toggles_and_recenters() {
        let mut session = SearchSession::new();
        session.apply(&resolved(1, vec![facility(1, "City Hospital")]));
        let id = FacilityId::new(ElementKind::Node, 1);

        let recenter = session.select(id).unwrap();
        assert_eq!(recenter.target, Position::new(51.51, -0.1));
        assert_eq!(recenter.zoom, FOCUS_ZOOM);
        assert!(session.map_view().unwrap().markers[0].highlighted);

        assert!(session.select(id).is_none());
        assert_eq!(session.selection().selected(), None);
    }

    #[test]
    fn unknown_selection_is_ignored() {
        let mut session = SearchSession::new();
        session.apply(&resolved(1, vec![facility(1, "City Hospital")]));
        assert!(session.select(FacilityId::new(ElementKind::Way, 1)).is_none());
        assert_eq!(session.selection().selected(), None);
    }

    #[test]
    fn selection_dropped_when_facility_disappears() {
        let mut session = SearchSession::new();
        session.apply(&resolved(1, vec![facility(1, "City Hospital")]));
        session.select(FacilityId::new(ElementKind::Node, 1));
        session.apply(&resolved(2, vec![facility(2, "Other Hospital")]));
        assert_eq!(session.selection().selected(), None);
    }
}
