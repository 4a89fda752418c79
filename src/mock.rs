//! Fallback catalogs served when no live data is configured.

use crate::flight::{FlightRecord, FlightStatus};
use chrono::{Datelike, Duration, NaiveDateTime, Timelike};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const MOCK_FLIGHTS: usize = 20;

const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

// flight, airline, destination, scheduled, estimated, status, terminal, gate, delay
type StaticRow = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    FlightStatus,
    &'static str,
    &'static str,
    u32,
);

const STATIC_ROWS: [StaticRow; MOCK_FLIGHTS] = [
    ("AA123", "American Airlines", "JFK", "2026-02-15T10:30:00", "2026-02-15T10:30:00", FlightStatus::OnTime, "1", "A12", 0),
    ("UA456", "United Airlines", "LAX", "2026-02-15T11:00:00", "2026-02-15T11:15:00", FlightStatus::Delayed, "2", "B5", 15),
    ("DL789", "Delta Airlines", "ORD", "2026-02-15T11:30:00", "2026-02-15T11:30:00", FlightStatus::OnTime, "1", "A8", 0),
    ("BA101", "British Airways", "LHR", "2026-02-15T12:00:00", "2026-02-15T12:00:00", FlightStatus::Boarding, "3", "C15", 0),
    ("LH202", "Lufthansa", "FRA", "2026-02-15T12:30:00", "2026-02-15T12:45:00", FlightStatus::Delayed, "3", "C20", 15),
    ("AF303", "Air France", "CDG", "2026-02-15T13:00:00", "2026-02-15T13:00:00", FlightStatus::OnTime, "3", "C25", 0),
    ("KL404", "KLM", "AMS", "2026-02-15T13:30:00", "2026-02-15T13:30:00", FlightStatus::Boarding, "2", "B10", 0),
    ("SQ505", "Singapore Airlines", "SIN", "2026-02-15T14:00:00", "2026-02-15T14:00:00", FlightStatus::OnTime, "3", "C30", 0),
    ("EK606", "Emirates", "DXB", "2026-02-15T14:30:00", "2026-02-15T14:30:00", FlightStatus::OnTime, "3", "C35", 0),
    ("QR707", "Qatar Airways", "DOH", "2026-02-15T15:00:00", "2026-02-15T15:20:00", FlightStatus::Delayed, "3", "C40", 20),
    ("TK808", "Turkish Airlines", "IST", "2026-02-15T15:30:00", "2026-02-15T15:30:00", FlightStatus::OnTime, "2", "B15", 0),
    ("NH909", "ANA", "NRT", "2026-02-15T16:00:00", "2026-02-15T16:00:00", FlightStatus::OnTime, "3", "C45", 0),
    ("JL010", "Japan Airlines", "HND", "2026-02-15T16:30:00", "2026-02-15T16:30:00", FlightStatus::Boarding, "3", "C50", 0),
    ("CX111", "Cathay Pacific", "HKG", "2026-02-15T17:00:00", "2026-02-15T17:10:00", FlightStatus::Delayed, "3", "C55", 10),
    ("VS222", "Virgin Atlantic", "LGW", "2026-02-15T17:30:00", "2026-02-15T17:30:00", FlightStatus::OnTime, "2", "B20", 0),
    ("AC333", "Air Canada", "YYZ", "2026-02-15T18:00:00", "2026-02-15T18:00:00", FlightStatus::OnTime, "1", "A15", 0),
    ("IB444", "Iberia", "MAD", "2026-02-15T18:30:00", "2026-02-15T18:30:00", FlightStatus::Boarding, "2", "B25", 0),
    ("AZ555", "ITA Airways", "FCO", "2026-02-15T19:00:00", "2026-02-15T19:15:00", FlightStatus::Delayed, "3", "C60", 15),
    ("SK666", "SAS", "CPH", "2026-02-15T19:30:00", "2026-02-15T19:30:00", FlightStatus::OnTime, "2", "B30", 0),
    ("LX777", "Swiss", "ZRH", "2026-02-15T20:00:00", "2026-02-15T20:00:00", FlightStatus::OnTime, "3", "C65", 0),
];

// iata prefix, airline
const AIRLINES: [(&str, &str); 10] = [
    ("SK", "SAS"),
    ("DY", "Norwegian"),
    ("KL", "KLM"),
    ("LH", "Lufthansa"),
    ("BA", "British Airways"),
    ("AF", "Air France"),
    ("DL", "Delta"),
    ("UA", "United"),
    ("EK", "Emirates"),
    ("QR", "Qatar Airways"),
];

const DESTINATIONS: [&str; 10] = [
    "London",
    "Paris",
    "Amsterdam",
    "Copenhagen",
    "Stockholm",
    "Berlin",
    "Rome",
    "Madrid",
    "New York",
    "Dubai",
];

const TERMINALS: [&str; 5] = ["1", "2", "3", "A", "B"];

/// The fixed catalog, identical on every call apart from the origin
pub fn static_catalog(airport: &str) -> Vec<FlightRecord> {
    STATIC_ROWS
        .iter()
        .map(
            |&(flight, airline, destination, scheduled, estimated, status, terminal, gate, delay)| {
                FlightRecord {
                    flight_number: flight.to_string(),
                    airline: airline.to_string(),
                    origin: airport.to_string(),
                    destination: destination.to_string(),
                    scheduled_time: scheduled.to_string(),
                    estimated_time: estimated.to_string(),
                    status,
                    terminal: terminal.to_string(),
                    gate: gate.to_string(),
                    delay_minutes: delay,
                }
            },
        )
        .collect()
}

fn synthetic_status(i: usize) -> FlightStatus {
    if i % 10 == 9 {
        FlightStatus::Cancelled
    } else if i % 5 == 4 {
        FlightStatus::Delayed
    } else {
        FlightStatus::OnTime
    }
}

/// A catalog spread over the hours following `now`, in time order.
///
/// Delays are drawn from a generator seeded with the date and hour of `now`,
/// so repeated calls within the same hour produce the same board.
pub fn synthetic_catalog(airport: &str, now: NaiveDateTime) -> Vec<FlightRecord> {
    let date = now.date();
    let seed = (date.num_days_from_ce() as u64) * 24 + now.hour() as u64;
    let mut rng = StdRng::seed_from_u64(seed);
    let mut flights = Vec::with_capacity(MOCK_FLIGHTS);
    let top_of_hour = match date.and_hms_opt(now.hour(), 0, 0) {
        Some(t) => t,
        None => return flights,
    };
    for i in 0..MOCK_FLIGHTS {
        // Later hours roll over into the next day
        let scheduled = top_of_hour
            + Duration::hours((i / 2) as i64)
            + Duration::minutes(((i * 15) % 60) as i64);
        let status = synthetic_status(i);
        let delay_minutes: u32 = if status == FlightStatus::Delayed {
            rng.gen_range(1u32, 10u32) * 5
        } else {
            0
        };
        let estimated = scheduled + Duration::minutes(delay_minutes as i64);
        let (prefix, airline) = AIRLINES[i % AIRLINES.len()];
        flights.push(FlightRecord {
            flight_number: format!("{}{}", prefix, 100 + i),
            airline: airline.to_string(),
            origin: airport.to_string(),
            destination: DESTINATIONS[i % DESTINATIONS.len()].to_string(),
            scheduled_time: scheduled.format(TIME_FORMAT).to_string(),
            estimated_time: estimated.format(TIME_FORMAT).to_string(),
            status,
            terminal: TERMINALS[i % TERMINALS.len()].to_string(),
            gate: format!("{}{}", (b'A' + (i % 4) as u8) as char, 1 + i % 20),
            delay_minutes,
        });
    }
    flights
}

/// Turn a departures catalog into the matching arrivals catalog by swapping
/// the two ends of every flight
pub fn arrivals(departures: Vec<FlightRecord>) -> Vec<FlightRecord> {
    departures
        .into_iter()
        .map(|mut flight| {
            std::mem::swap(&mut flight.origin, &mut flight.destination);
            flight
        })
        .collect()
}
