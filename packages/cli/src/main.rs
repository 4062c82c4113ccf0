#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the hospital finder.

mod config;
mod interactive;
mod render;
mod watch;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use hospital_finder_cli_utils::{MultiProgress, Spinner};
use hospital_finder_facility_models::{FacilityId, Position};
use hospital_finder_overpass::OverpassClient;
use hospital_finder_presentation::SearchSession;
use hospital_finder_presentation::view::LOADING_MESSAGE;
use hospital_finder_search::{DebouncedFetcher, FetchEvent, FixedLocation, Geolocator};

use crate::config::AppConfig;
use crate::interactive::Next;

#[derive(Parser)]
#[command(name = "hospital_finder", about = "Find hospitals near a position")]
struct Cli {
    /// TOML file overriding the Overpass endpoint and search settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Print map and list views as JSON instead of text
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search once around a position
    Search {
        /// Latitude in decimal degrees
        #[arg(long, allow_negative_numbers = true, requires = "lng")]
        lat: Option<f64>,
        /// Longitude in decimal degrees
        #[arg(long, allow_negative_numbers = true, requires = "lat")]
        lng: Option<f64>,
        /// Facility to focus in the results (e.g., "node/123")
        #[arg(long)]
        select: Option<FacilityId>,
    },
    /// Read "lat,lng" lines from stdin and search again as the position
    /// changes
    Watch,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = hospital_finder_cli_utils::init_logger();
    let cli = Cli::parse();

    let config = AppConfig::load_or_default(cli.config.as_deref())?;
    let client = OverpassClient::new(&config.overpass)?;
    log::debug!("Using Overpass endpoint {}", client.endpoint());

    let mut fetcher = DebouncedFetcher::spawn(Arc::new(client), config.search_settings());
    let mut session = SearchSession::new();

    let result = match cli.command {
        None => run_interactive(&mut fetcher, &mut session, &multi).await,
        Some(Commands::Search { lat, lng, select }) => {
            let position = lat.zip(lng).map(|(lat, lng)| Position::new(lat, lng));
            run_search(&mut fetcher, &mut session, &multi, position, select, cli.json).await
        }
        Some(Commands::Watch) => watch::run(&mut fetcher, &mut session, cli.json).await,
    };

    fetcher.shutdown().await;
    result
}

async fn run_search(
    fetcher: &mut DebouncedFetcher,
    session: &mut SearchSession,
    multi: &MultiProgress,
    position: Option<Position>,
    select: Option<FacilityId>,
    as_json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let position = match FixedLocation::new(position).locate().await {
        Ok(position) => position,
        Err(e) => {
            session.location_failed(&e);
            render::print(session, None, as_json)?;
            return Err(e.into());
        }
    };

    search_once(fetcher, session, multi, position).await?;

    let recenter = select.and_then(|id| session.select(id));
    render::print(session, recenter, as_json)?;
    Ok(())
}

async fn run_interactive(
    fetcher: &mut DebouncedFetcher,
    session: &mut SearchSession,
    multi: &MultiProgress,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut position = interactive::prompt_position()?;

    loop {
        search_once(fetcher, session, multi, position).await?;
        print!("{}", render::text(session));

        match interactive::results_menu(session)? {
            Next::Search(next) => position = next,
            Next::Quit => return Ok(()),
        }
    }
}

/// Sends `position` and folds events into `session` until it settles,
/// showing a spinner while the search is pending or in flight.
async fn search_once(
    fetcher: &mut DebouncedFetcher,
    session: &mut SearchSession,
    multi: &MultiProgress,
    position: Position,
) -> Result<(), Box<dyn std::error::Error>> {
    fetcher.update(position)?;
    let mut spinner: Option<Spinner> = None;

    while let Some(event) = fetcher.next_event().await {
        session.apply(&event);

        match &event {
            FetchEvent::Pending { .. } | FetchEvent::Loading { .. } => {
                if spinner.is_none() {
                    spinner = Some(Spinner::start(multi, LOADING_MESSAGE));
                }
            }
            FetchEvent::Resolved {
                facilities,
                from_cache,
                ..
            } => {
                log::debug!(
                    "Settled with {} facilities near {position}{}",
                    facilities.len(),
                    if *from_cache { " (cached)" } else { "" }
                );
                return Ok(());
            }
            FetchEvent::Failed { message, .. } => {
                log::debug!("Settled with failure near {position}: {message}");
                return Ok(());
            }
        }
    }

    Err(hospital_finder_search::FetchError::WorkerStopped.into())
}
