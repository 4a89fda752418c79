//! Best-effort extraction of flight records from a provider response.
//!
//! The provider document is never parsed structurally. Each flight is located
//! by its marker token, and every field is looked up independently inside a
//! bounded window that follows the marker. A missing optional field keeps its
//! default. A record that lacks a flight number or a destination is dropped.

use crate::flight::{Direction, FlightRecord, FlightStatus};
use std::borrow::Cow;
use thiserror::Error;

/// Upper bound on the number of records extracted from one response
pub const MAX_FLIGHTS: usize = 20;

/// How far past a flight marker fields are looked up
pub const WINDOW: usize = 2048;

const DATA_MARKER: &str = "\"data\"";
const FLIGHT_MARKER: &str = "\"flight_date\"";
const STATUS_MARKER: &str = "\"flight_status\"";

const DEPARTURE: &str = "\"departure\"";
const ARRIVAL: &str = "\"arrival\"";
const AIRLINE: &str = "\"airline\"";
const FLIGHT: &str = "\"flight\"";

const IATA: &str = "\"iata\"";
const NAME: &str = "\"name\"";
const AIRPORT: &str = "\"airport\"";
const TERMINAL: &str = "\"terminal\"";
const GATE: &str = "\"gate\"";
const DELAY: &str = "\"delay\"";
const SCHEDULED: &str = "\"scheduled\"";
const ESTIMATED: &str = "\"estimated\"";

const UNKNOWN: &str = "-";

#[derive(Debug, PartialEq, Error)]
pub enum FeedError {
    #[error("no usable flight data")]
    NoUsableData,
}

/// Find `marker` in `window` and return the scalar that follows its colon.
///
/// Quoted strings are returned without quotes, with `\"`, `\\` and `\/`
/// unescaped; bare numbers are returned as-is. `null`, empty strings, objects,
/// arrays and anything truncated by the window edge count as absent.
pub fn find_field<'a>(window: &'a str, marker: &str) -> Option<Cow<'a, str>> {
    let start = window.find(marker)? + marker.len();
    let rest = window[start..].trim_start();
    let rest = rest.strip_prefix(':')?.trim_start();
    if let Some(quoted) = rest.strip_prefix('"') {
        let end = closing_quote(quoted)?;
        let value = &quoted[..end];
        if value.is_empty() {
            None
        } else {
            Some(unescape(value))
        }
    } else {
        let end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-'))
            .unwrap_or(rest.len());
        let value = &rest[..end];
        if value.is_empty() || value == "-" {
            None
        } else {
            Some(Cow::Borrowed(value))
        }
    }
}

/// Resolve the escapes a display string can carry. Other escapes, `\u` ones
/// included, are kept verbatim.
fn unescape(value: &str) -> Cow<str> {
    if !value.contains('\\') {
        return Cow::Borrowed(value);
    }
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(e @ '"') | Some(e @ '\\') | Some(e @ '/') => out.push(e),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    Cow::Owned(out)
}

/// Index of the first unescaped `"` in `s`
fn closing_quote(s: &str) -> Option<usize> {
    let mut escaped = false;
    for (i, c) in s.char_indices() {
        match c {
            '\\' if !escaped => escaped = true,
            '"' if !escaped => return Some(i),
            _ => escaped = false,
        }
    }
    None
}

/// Narrow `window` to the object following `anchor`, up to its first `}`
fn section<'a>(window: &'a str, anchor: &str) -> Option<&'a str> {
    let start = window.find(anchor)? + anchor.len();
    let rest = &window[start..];
    let end = rest.find('}').unwrap_or(rest.len());
    Some(&rest[..end])
}

fn field_in<'a>(window: &'a str, anchor: &str, marker: &str) -> Option<Cow<'a, str>> {
    section(window, anchor).and_then(|s| find_field(s, marker))
}

/// Largest char boundary of `s` not past `index`
fn floor_boundary(s: &str, index: usize) -> usize {
    let mut index = index.min(s.len());
    while !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

fn or_unknown(value: Option<Cow<str>>) -> String {
    value.map(Cow::into_owned).unwrap_or_else(|| UNKNOWN.to_string())
}

/// Build one record from a flight's window. Times, delay, terminal and gate
/// come from the board's own side of the flight; the far side only supplies
/// the other airport.
fn extract_record(window: &str, direction: Direction, airport: &str) -> Option<FlightRecord> {
    let (near_anchor, far_anchor) = match direction {
        Direction::Departures => (DEPARTURE, ARRIVAL),
        Direction::Arrivals => (ARRIVAL, DEPARTURE),
    };
    let flight_number = field_in(window, FLIGHT, IATA)?;
    let far_airport =
        field_in(window, far_anchor, IATA).or_else(|| field_in(window, far_anchor, AIRPORT))?;

    let near = section(window, near_anchor).unwrap_or("");
    let near_airport = find_field(near, IATA).unwrap_or(Cow::Borrowed(airport));
    let scheduled = or_unknown(find_field(near, SCHEDULED));
    let estimated = find_field(near, ESTIMATED)
        .map(Cow::into_owned)
        .unwrap_or_else(|| scheduled.clone());
    let delay_minutes = find_field(near, DELAY)
        .and_then(|d| d.split('.').next().and_then(|d| d.parse::<u32>().ok()))
        .unwrap_or(0);
    let status = find_field(window, STATUS_MARKER)
        .map(|s| FlightStatus::from_provider(&s))
        .unwrap_or(FlightStatus::Scheduled);

    let (origin, destination) = match direction {
        Direction::Departures => (near_airport, far_airport),
        Direction::Arrivals => (far_airport, near_airport),
    };
    let mut record = FlightRecord {
        flight_number: flight_number.into_owned(),
        airline: field_in(window, AIRLINE, NAME)
            .map(Cow::into_owned)
            .unwrap_or_else(|| "Unknown".to_string()),
        origin: origin.into_owned(),
        destination: destination.into_owned(),
        scheduled_time: scheduled,
        estimated_time: estimated,
        status,
        terminal: or_unknown(find_field(near, TERMINAL)),
        gate: or_unknown(find_field(near, GATE)),
        delay_minutes,
    };
    record.reconcile_status();
    Some(record)
}

/// Extract up to `MAX_FLIGHTS` departures from a raw provider response.
///
/// `airport` is used as the origin of any record that does not name one.
pub fn parse_feed(raw: &str, airport: &str) -> Result<Vec<FlightRecord>, FeedError> {
    parse_board(raw, Direction::Departures, airport)
}

/// Extract up to `MAX_FLIGHTS` records for one side of `airport`. For
/// arrivals the far airport is the origin and `airport` fills in a missing
/// destination.
pub fn parse_board(
    raw: &str,
    direction: Direction,
    airport: &str,
) -> Result<Vec<FlightRecord>, FeedError> {
    if raw.is_empty() || !raw.contains(DATA_MARKER) {
        return Err(FeedError::NoUsableData);
    }
    let mut flights = Vec::new();
    let mut pos = 0;
    while flights.len() < MAX_FLIGHTS {
        let found = match raw[pos..].find(FLIGHT_MARKER) {
            Some(i) => pos + i,
            None => break,
        };
        // Always move past the current marker, whatever the window yields
        pos = found + FLIGHT_MARKER.len();
        let limit = floor_boundary(raw, found + WINDOW);
        let end = match raw[pos..limit].find(FLIGHT_MARKER) {
            Some(i) => pos + i,
            None => limit,
        };
        if let Some(record) = extract_record(&raw[found..end], direction, airport) {
            flights.push(record);
        }
    }
    if flights.is_empty() {
        return Err(FeedError::NoUsableData);
    }
    Ok(flights)
}
