//! Terminal output for a [`SearchSession`].

use std::fmt::Write as _;

use hospital_finder_presentation::{ListBody, ListView, MapView, Recenter, SearchSession};
use serde::Serialize;

/// Everything a renderer would draw, for `--json` output.
#[derive(Debug, Serialize)]
pub struct Snapshot {
    /// Map contents, once a position is known.
    pub map: Option<MapView>,
    /// List contents.
    pub list: ListView,
    /// Map move requested by a selection made for this snapshot.
    pub recenter: Option<Recenter>,
}

impl Snapshot {
    #[must_use]
    pub fn of(session: &SearchSession, recenter: Option<Recenter>) -> Self {
        Self {
            map: session.map_view(),
            list: session.list_view(),
            recenter,
        }
    }
}

/// Renders the session as plain text.
#[must_use]
pub fn text(session: &SearchSession) -> String {
    let mut out = String::new();
    let list = session.list_view();

    match session.position() {
        Some(position) => {
            let _ = writeln!(out, "{} near {position}", list.heading);
        }
        None => {
            let _ = writeln!(out, "{}", list.heading);
        }
    }

    match &list.body {
        ListBody::Groups { groups } => {
            for group in groups {
                let _ = writeln!(out, "\n{} ({})", group.title, group.items.len());
                for item in &group.items {
                    let marker = if item.highlighted { '>' } else { ' ' };
                    let er = if item.emergency { " [ER]" } else { "" };
                    let _ = writeln!(
                        out,
                        " {marker} {} - {}{er} ({})",
                        item.name, item.distance, item.id
                    );
                }
            }
        }
        body => {
            let _ = writeln!(out, "{}", body.message().unwrap_or_default());
        }
    }

    out
}

/// Renders the session as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`serde_json::Error`] if serialization fails.
pub fn json(
    session: &SearchSession,
    recenter: Option<Recenter>,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&Snapshot::of(session, recenter))
}

/// Prints the session in the requested format, preceded by `recenter`
/// when a selection moved the map.
///
/// # Errors
///
/// Returns [`serde_json::Error`] if JSON serialization fails.
pub fn print(
    session: &SearchSession,
    recenter: Option<Recenter>,
    as_json: bool,
) -> Result<(), serde_json::Error> {
    if as_json {
        println!("{}", json(session, recenter)?);
    } else {
        if let Some(recenter) = &recenter {
            println!("{}", self::recenter(recenter));
        }
        print!("{}", text(session));
    }
    Ok(())
}

/// One-line description of a map move.
#[must_use]
pub fn recenter(recenter: &Recenter) -> String {
    format!("Map centered on {} (zoom {})", recenter.target, recenter.zoom)
}

#[cfg(test)]
mod tests {
    use hospital_finder_facility_models::{ElementKind, Facility, FacilityId, Position};
    use hospital_finder_search::{FETCH_FAILED_MESSAGE, FetchEvent, GeolocationError};

    use super::*;

    const CENTER: Position = Position::new(51.5, -0.1);

    fn facility(id: u64, name: &str, distance_km: f64, emergency: bool) -> Facility {
        Facility {
            id: FacilityId::new(ElementKind::Node, id),
            name: name.to_string(),
            latitude: 51.51,
            longitude: -0.1,
            emergency,
            distance_km,
        }
    }

    fn resolved(facilities: Vec<Facility>) -> SearchSession {
        let mut session = SearchSession::new();
        session.apply(&FetchEvent::Resolved {
            generation: 1,
            center: CENTER,
            facilities,
            from_cache: false,
        });
        session
    }

    #[test]
    fn text_lists_groups_with_markers() {
        let mut session = resolved(vec![
            facility(1, "City Hospital", 2.0, true),
            facility(2, "Riverside Medical Centre", 3.5, false),
        ]);
        session.select(FacilityId::new(ElementKind::Node, 2));

        let out = text(&session);
        assert!(out.starts_with("Nearby Hospitals near 51.50000,-0.10000\n"));
        assert!(out.contains("\nHospital (1)\n   City Hospital - 2.0 km [ER] (node/1)\n"));
        assert!(out.contains("\nMedical Centre (1)\n > Riverside Medical Centre - 3.5 km (node/2)\n"));
    }

    #[test]
    fn text_shows_status_messages() {
        let session = resolved(Vec::new());
        assert!(text(&session).ends_with("No hospitals found nearby\n"));

        let mut failed = SearchSession::new();
        failed.apply(&FetchEvent::Failed {
            generation: 1,
            center: CENTER,
            message: FETCH_FAILED_MESSAGE.to_string(),
        });
        assert!(text(&failed).ends_with(&format!("{FETCH_FAILED_MESSAGE}\n")));

        let mut denied = SearchSession::new();
        denied.location_failed(&GeolocationError::Unsupported);
        assert_eq!(
            text(&denied),
            "Nearby Hospitals\nGeolocation is not supported on this device.\n"
        );
    }

    #[test]
    fn json_snapshot_has_map_and_list() {
        let session = resolved(vec![facility(1, "City Hospital", 2.0, false)]);
        let value: serde_json::Value =
            serde_json::from_str(&json(&session, None).unwrap()).unwrap();

        assert_eq!(value["map"]["zoom"], 13);
        assert!(value["recenter"].is_null());
        assert_eq!(value["map"]["markers"][0]["popup"], "Distance: 2.0 km");
        assert_eq!(value["list"]["body"]["kind"], "groups");
        assert_eq!(value["list"]["heading"], "Nearby Hospitals");
    }

    #[test]
    fn json_without_position_has_null_map() {
        let session = SearchSession::new();
        let value: serde_json::Value =
            serde_json::from_str(&json(&session, None).unwrap()).unwrap();
        assert!(value["map"].is_null());
        assert_eq!(value["list"]["body"]["kind"], "locating");
    }

    #[test]
    fn json_snapshot_carries_selection_recenter() {
        let mut session = resolved(vec![facility(1, "City Hospital", 2.0, false)]);
        let recenter = session.select(FacilityId::new(ElementKind::Node, 1));
        assert!(recenter.is_some());

        let value: serde_json::Value =
            serde_json::from_str(&json(&session, recenter).unwrap()).unwrap();
        assert_eq!(value["recenter"]["zoom"], 16);
        assert_eq!(value["recenter"]["target"]["latitude"], 51.51);
        assert_eq!(value["map"]["markers"][0]["highlighted"], true);
    }

    #[test]
    fn recenter_line() {
        let line = recenter(&Recenter {
            target: Position::new(51.51, -0.1),
            zoom: 16,
        });
        assert_eq!(line, "Map centered on 51.51000,-0.10000 (zoom 16)");
    }
}
