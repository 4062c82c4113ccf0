//! The currently highlighted facility.

use hospital_finder_facility_models::FacilityId;
use serde::Serialize;

/// At most one selected facility. Selecting it again deselects it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SelectionState {
    selected: Option<FacilityId>,
}

impl SelectionState {
    /// Nothing selected.
    #[must_use]
    pub const fn new() -> Self {
        Self { selected: None }
    }

    /// The selected facility, if any.
    #[must_use]
    pub const fn selected(&self) -> Option<FacilityId> {
        self.selected
    }

    /// Whether `id` is the selected facility.
    #[must_use]
    pub fn is_selected(&self, id: FacilityId) -> bool {
        self.selected == Some(id)
    }

    /// Selects `id`, or deselects it if it was already selected.
    /// Returns whether `id` is selected afterwards.
    pub fn toggle(&mut self, id: FacilityId) -> bool {
        if self.is_selected(id) {
            self.selected = None;
            false
        } else {
            self.selected = Some(id);
            true
        }
    }

    /// Clears the selection.
    pub const fn clear(&mut self) {
        self.selected = None;
    }
}
