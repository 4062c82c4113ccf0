//! Overpass QL builder for radius-bounded hospital searches.

use std::fmt::Write as _;

use hospital_finder_facility_models::{ElementKind, Position};
use serde::Deserialize;

/// Default search radius in metres.
pub const DEFAULT_RADIUS_M: u32 = 10_000;

/// Default server-side timeout hint in seconds.
pub const DEFAULT_TIMEOUT_SECS: u32 = 25;

/// Parameters of the generated query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct QueryOptions {
    /// Search radius around the center in metres.
    pub radius_m: u32,
    /// `[timeout:N]` hint sent to the server.
    pub timeout_secs: u32,
    /// Additionally require `healthcare=hospital` on every element.
    pub require_healthcare_tag: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            radius_m: DEFAULT_RADIUS_M,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            require_healthcare_tag: false,
        }
    }
}

/// Builds a query for nodes, ways and relations tagged
/// `amenity=hospital` within `options.radius_m` of `center`.
///
/// Output is `out body center;` so ways and relations carry a `center`
/// coordinate alongside their tags.
#[must_use]
pub fn build_query(center: Position, options: &QueryOptions) -> String {
    let mut filter = String::from(r#"["amenity"="hospital"]"#);
    if options.require_healthcare_tag {
        filter.push_str(r#"["healthcare"="hospital"]"#);
    }

    let around = format!(
        "(around:{},{},{})",
        options.radius_m, center.latitude, center.longitude
    );

    let mut query = format!("[out:json][timeout:{}];\n(\n", options.timeout_secs);
    for kind in [ElementKind::Node, ElementKind::Way, ElementKind::Relation] {
        let _ = writeln!(query, "  {kind}{filter}{around};");
    }
    query.push_str(");\nout body center;\n");
    query
}
