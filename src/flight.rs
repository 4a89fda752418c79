use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FlightStatus {
    #[serde(rename = "On Time")]
    OnTime,
    Delayed,
    Boarding,
    Landed,
    Cancelled,
    Diverted,
    Scheduled,
}

impl FlightStatus {
    /// Map a provider status token onto the canonical set, unknown tokens are
    /// treated as `OnTime`
    pub fn from_provider(token: &str) -> FlightStatus {
        match token.trim().to_ascii_lowercase().as_str() {
            "scheduled" => FlightStatus::Scheduled,
            "active" | "en-route" | "on time" => FlightStatus::OnTime,
            "boarding" => FlightStatus::Boarding,
            "landed" => FlightStatus::Landed,
            "cancelled" => FlightStatus::Cancelled,
            "diverted" => FlightStatus::Diverted,
            "delayed" | "incident" => FlightStatus::Delayed,
            _ => FlightStatus::OnTime,
        }
    }

    /// Terminal statuses are never overridden by a reported delay
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            FlightStatus::Cancelled | FlightStatus::Diverted | FlightStatus::Landed
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FlightStatus::OnTime => "On Time",
            FlightStatus::Delayed => "Delayed",
            FlightStatus::Boarding => "Boarding",
            FlightStatus::Landed => "Landed",
            FlightStatus::Cancelled => "Cancelled",
            FlightStatus::Diverted => "Diverted",
            FlightStatus::Scheduled => "Scheduled",
        }
    }
}

impl fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single row of a board. Times are opaque display strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightRecord {
    pub flight_number: String,
    pub airline: String,
    pub origin: String,
    pub destination: String,
    pub scheduled_time: String,
    pub estimated_time: String,
    pub status: FlightStatus,
    pub terminal: String,
    pub gate: String,
    pub delay_minutes: u32,
}

impl FlightRecord {
    /// Force `Delayed` when a delay is reported, unless the flight already
    /// reached a terminal status
    pub fn reconcile_status(&mut self) {
        if self.delay_minutes > 0 && !self.status.is_terminal() {
            self.status = FlightStatus::Delayed;
        }
    }
}

/// Which side of the airport a board lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Departures,
    Arrivals,
}

impl Direction {
    /// Provider query parameter that selects flights by this side's airport
    pub fn query_key(&self) -> &'static str {
        match self {
            Direction::Departures => "dep_iata",
            Direction::Arrivals => "arr_iata",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Departures => "departures",
            Direction::Arrivals => "arrivals",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
