#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Session state and view models for map and list renderers.
//!
//! [`SearchSession`] is the single owner of everything a UI shows: the
//! current position, the search status, the ranked facilities and the
//! selected facility. Renderers read [`MapView`] and [`ListView`] from it
//! and feed selection changes back through [`SearchSession::select`].
//!
//! The view builders in [`view`] are pure functions, so renderers that keep
//! their own state can use them directly.

pub mod selection;
pub mod session;
pub mod view;

pub use selection::SelectionState;
pub use session::{SearchSession, SearchStatus};
pub use view::{ListBody, ListGroup, ListItem, ListView, MapView, Marker, Recenter, UserMarker};

/// Zoom level for the overview map centered on the user.
pub const OVERVIEW_ZOOM: u8 = 13;

/// Zoom level used when focusing a selected facility.
pub const FOCUS_ZOOM: u8 = 16;
