#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Overpass API access for hospital-tagged map features.
//!
//! - [`query`] builds the Overpass QL radius search.
//! - [`response`] holds the wire types of the JSON output format.
//! - [`client`] sends queries to an Overpass endpoint.
//! - [`config`] describes the endpoint, loaded from an embedded TOML file
//!   (`services/overpass.toml`) and optionally overridden by the caller.
//!
//! See <https://wiki.openstreetmap.org/wiki/Overpass_API/Overpass_QL>

pub mod client;
pub mod config;
pub mod query;
pub mod response;

pub use client::OverpassClient;
pub use config::OverpassConfig;
pub use query::{QueryOptions, build_query};
pub use response::{Element, ElementCenter, OverpassResponse};

use thiserror::Error;

/// Errors from Overpass requests.
#[derive(Debug, Error)]
pub enum OverpassError {
    /// HTTP request failed (connection, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("Overpass returned HTTP {status}")]
    Status {
        /// Response status code.
        status: reqwest::StatusCode,
    },

    /// The body was not valid Overpass JSON.
    #[error("Failed to decode Overpass response: {0}")]
    Decode(#[from] serde_json::Error),
}
