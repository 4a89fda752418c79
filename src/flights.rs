use crate::feed::{self, MAX_FLIGHTS};
use crate::flight::{Direction, FlightRecord};
use crate::keystore::KeyStore;
use crate::mock;
use crate::upstream::Fetcher;
use crate::MockMode;
use chrono::{Local, SecondsFormat, Utc};
use log::{info, warn};
use serde::Serialize;

/// Key of the upstream credential in the key store
pub const API_KEY: &str = "API_KEY";

/// A board wrapped with the airport it was built for and when
#[derive(Debug, Serialize)]
pub struct Board {
    pub airport: String,
    pub direction: Direction,
    pub flights: Vec<FlightRecord>,
    pub count: usize,
    pub timestamp: String,
}

impl Board {
    pub fn new(airport: &str, direction: Direction, flights: Vec<FlightRecord>) -> Board {
        Board {
            airport: airport.to_string(),
            direction,
            count: flights.len(),
            flights,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Builds the departures and arrivals boards for an airport.
///
/// Without a credential the configured mock catalog is served. With one, the
/// provider is queried, and a failed fetch or an unusable reply yields an
/// empty board rather than mock data.
pub struct FlightService {
    keys: Box<dyn KeyStore>,
    fetcher: Box<dyn Fetcher>,
    upstream_url: String,
    mock: MockMode,
}

impl FlightService {
    pub fn new(
        keys: Box<dyn KeyStore>,
        fetcher: Box<dyn Fetcher>,
        upstream_url: String,
        mock: MockMode,
    ) -> FlightService {
        FlightService {
            keys,
            fetcher,
            upstream_url,
            mock,
        }
    }

    /// The configured mock catalog for one side of `airport`
    pub fn mock_board(&self, direction: Direction, airport: &str) -> Vec<FlightRecord> {
        let departures = match self.mock {
            MockMode::Static => mock::static_catalog(airport),
            MockMode::Synthetic => mock::synthetic_catalog(airport, Local::now().naive_local()),
        };
        match direction {
            Direction::Departures => departures,
            Direction::Arrivals => mock::arrivals(departures),
        }
    }

    pub fn upstream_url(&self, key: &str, direction: Direction, airport: &str) -> String {
        format!(
            "{}?access_key={}&{}={}&limit={}",
            self.upstream_url,
            key,
            direction.query_key(),
            airport,
            MAX_FLIGHTS
        )
    }

    /// The departures board served on `/api/flights`
    pub async fn flights(&self, airport: &str) -> Vec<FlightRecord> {
        self.board(Direction::Departures, airport).await
    }

    pub async fn board(&self, direction: Direction, airport: &str) -> Vec<FlightRecord> {
        let key = match self.keys.get(API_KEY) {
            Ok(Some(key)) => key,
            Ok(None) => {
                info!("no {} configured, serving mock {} for {}", API_KEY, direction, airport);
                return self.mock_board(direction, airport);
            }
            Err(e) => {
                warn!("{}, serving mock {} for {}", e, direction, airport);
                return self.mock_board(direction, airport);
            }
        };
        let url = self.upstream_url(&key, direction, airport);
        let raw = match self.fetcher.fetch(&url).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("{} fetch for {} failed: {}", direction, airport, e);
                return Vec::new();
            }
        };
        match feed::parse_board(&String::from_utf8_lossy(&raw), direction, airport) {
            Ok(flights) => flights,
            Err(e) => {
                warn!("{} for {} {}", e, airport, direction);
                Vec::new()
            }
        }
    }
}
