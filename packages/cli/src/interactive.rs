#![allow(clippy::module_name_repetitions)]

//! Interactive TUI for the hospital finder.
//!
//! Prompts for a position with `dialoguer`, runs one search, then lets the
//! user pick facilities from the results to focus the map on them.

use dialoguer::{Input, Select};
use hospital_finder_facility_models::{Facility, Position};
use hospital_finder_presentation::SearchSession;

use crate::render;
use crate::watch::parse_position;

/// Actions offered after each search.
enum SessionAction {
    SelectFacility,
    NewSearch,
    Quit,
}

impl SessionAction {
    const ALL: &[Self] = &[Self::SelectFacility, Self::NewSearch, Self::Quit];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::SelectFacility => "Select a facility",
            Self::NewSearch => "Search another position",
            Self::Quit => "Quit",
        }
    }
}

/// Prompts until a valid `lat,lng` pair is entered.
///
/// # Errors
///
/// Returns an error if the terminal prompt fails.
pub fn prompt_position() -> Result<Position, Box<dyn std::error::Error>> {
    let text: String = Input::new()
        .with_prompt("Your position (lat,lng)")
        .validate_with(|input: &String| {
            parse_position(input).map(|_| ()).map_err(|e| e.to_string())
        })
        .interact_text()?;

    Ok(parse_position(&text)?)
}

/// What the user chose after viewing results.
pub enum Next {
    /// Run another search at this position.
    Search(Position),
    /// Leave interactive mode.
    Quit,
}

/// Shows the results menu until the user asks for a new search or quits.
///
/// # Errors
///
/// Returns an error if a terminal prompt fails.
pub fn results_menu(session: &mut SearchSession) -> Result<Next, Box<dyn std::error::Error>> {
    let labels: Vec<&str> = SessionAction::ALL.iter().map(SessionAction::label).collect();

    loop {
        let idx = Select::new()
            .with_prompt("What would you like to do?")
            .items(&labels)
            .default(0)
            .interact()?;

        match SessionAction::ALL[idx] {
            SessionAction::SelectFacility => {
                if session.facilities().is_empty() {
                    println!("Nothing to select.");
                    continue;
                }
                pick_facility(session)?;
                print!("{}", render::text(session));
            }
            SessionAction::NewSearch => return Ok(Next::Search(prompt_position()?)),
            SessionAction::Quit => return Ok(Next::Quit),
        }
    }
}

fn pick_facility(session: &mut SearchSession) -> Result<(), dialoguer::Error> {
    let items: Vec<String> = session.facilities().iter().map(facility_label).collect();

    let idx = Select::new()
        .with_prompt("Select a facility (selecting it again deselects it)")
        .items(&items)
        .default(0)
        .interact()?;

    let id = session.facilities()[idx].id;
    match session.select(id) {
        Some(recenter) => println!("{}", render::recenter(&recenter)),
        None => println!("Selection cleared."),
    }
    Ok(())
}

fn facility_label(facility: &Facility) -> String {
    let er = if facility.emergency { " [ER]" } else { "" };
    format!(
        "{} - {:.1} km{er} ({})",
        facility.name, facility.distance_km, facility.category()
    )
}
