//! Continuous mode: positions are read from stdin, one `lat,lng` per line,
//! as a stand-in for a device's location feed.

use hospital_finder_facility_models::Position;
use hospital_finder_presentation::SearchSession;
use hospital_finder_search::{DebouncedFetcher, geolocation};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::render;

/// A line that is not a usable `lat,lng` pair.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParsePositionError {
    /// Not two comma-separated numbers.
    #[error("Expected \"lat,lng\", got {0:?}")]
    Format(String),

    /// Coordinates outside the WGS84 range.
    #[error("{0}")]
    OutOfRange(String),
}

/// Parses `"lat,lng"` with optional surrounding whitespace.
///
/// # Errors
///
/// Returns [`ParsePositionError`] if the line is malformed or the
/// coordinates are out of range.
pub fn parse_position(line: &str) -> Result<Position, ParsePositionError> {
    let format = || ParsePositionError::Format(line.trim().to_string());

    let (lat, lng) = line.trim().split_once(',').ok_or_else(format)?;
    let latitude: f64 = lat.trim().parse().map_err(|_| format())?;
    let longitude: f64 = lng.trim().parse().map_err(|_| format())?;

    geolocation::validate(Position::new(latitude, longitude)).map_err(|e| match e {
        geolocation::GeolocationError::Denied { reason } => ParsePositionError::OutOfRange(reason),
        other => ParsePositionError::OutOfRange(other.to_string()),
    })
}

/// Streams stdin positions into `fetcher`, printing the session each time
/// the newest update settles. Returns once stdin closes and the last
/// update has settled.
///
/// # Errors
///
/// Returns an error if stdin cannot be read, the worker stops, or output
/// fails to serialize.
pub async fn run(
    fetcher: &mut DebouncedFetcher,
    session: &mut SearchSession,
    as_json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut input_open = true;
    let mut sent: u64 = 0;
    let mut settled: u64 = 0;

    loop {
        if !input_open && settled == sent {
            break;
        }

        tokio::select! {
            line = lines.next_line(), if input_open => {
                match line? {
                    Some(line) if line.trim().is_empty() => {}
                    Some(line) => match parse_position(&line) {
                        Ok(position) => {
                            fetcher.update(position)?;
                            sent += 1;
                            log::debug!("Sent update #{sent}: {position}");
                        }
                        Err(e) => log::warn!("Skipping input: {e}"),
                    },
                    None => {
                        log::debug!("Input closed after {sent} update(s)");
                        input_open = false;
                    }
                }
            }
            event = fetcher.next_event() => {
                let Some(event) = event else {
                    log::warn!("Search worker stopped");
                    break;
                };
                session.apply(&event);
                if event.is_terminal() && event.generation() == sent {
                    settled = sent;
                    render::print(session, None, as_json)?;
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pairs_with_whitespace() {
        assert_eq!(
            parse_position(" 51.5, -0.1 \n").unwrap(),
            Position::new(51.5, -0.1)
        );
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(matches!(
            parse_position("51.5"),
            Err(ParsePositionError::Format(_))
        ));
        assert!(matches!(
            parse_position("north,west"),
            Err(ParsePositionError::Format(_))
        ));
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(matches!(
            parse_position("91,0"),
            Err(ParsePositionError::OutOfRange(_))
        ));
        assert!(matches!(
            parse_position("0,-181"),
            Err(ParsePositionError::OutOfRange(_))
        ));
    }
}
