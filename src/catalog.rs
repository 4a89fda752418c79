use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Country {
    pub code: &'static str,
    pub name: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Airport {
    pub icao: &'static str,
    pub iata: &'static str,
    pub name: &'static str,
    pub city: &'static str,
    #[serde(skip_serializing)]
    pub country: &'static str,
}

const COUNTRIES: &[(&str, &str)] = &[
    ("NO", "Norway"),
    ("SE", "Sweden"),
    ("DK", "Denmark"),
    ("FI", "Finland"),
    ("GB", "United Kingdom"),
    ("DE", "Germany"),
    ("FR", "France"),
    ("ES", "Spain"),
    ("IT", "Italy"),
    ("NL", "Netherlands"),
    ("US", "United States"),
    ("CA", "Canada"),
];

// icao, iata, name, city, country
const AIRPORTS: &[(&str, &str, &str, &str, &str)] = &[
    ("ENGM", "OSL", "Oslo Gardermoen Airport", "Oslo", "NO"),
    ("ENZV", "SVG", "Stavanger Airport", "Stavanger", "NO"),
    ("ENBR", "BGO", "Bergen Airport Flesland", "Bergen", "NO"),
    ("ENTC", "TOS", "Tromsø Airport", "Tromsø", "NO"),
    ("ESSA", "ARN", "Stockholm Arlanda Airport", "Stockholm", "SE"),
    ("ESGG", "GOT", "Göteborg Landvetter Airport", "Gothenburg", "SE"),
    ("EKCH", "CPH", "Copenhagen Airport", "Copenhagen", "DK"),
    ("EFHK", "HEL", "Helsinki-Vantaa Airport", "Helsinki", "FI"),
    ("EGLL", "LHR", "London Heathrow Airport", "London", "GB"),
    ("EGKK", "LGW", "London Gatwick Airport", "London", "GB"),
    ("EDDM", "MUC", "Munich Airport", "Munich", "DE"),
    ("EDDF", "FRA", "Frankfurt Airport", "Frankfurt", "DE"),
    ("LFPG", "CDG", "Charles de Gaulle Airport", "Paris", "FR"),
    ("LEMD", "MAD", "Madrid-Barajas Airport", "Madrid", "ES"),
    ("LIRF", "FCO", "Leonardo da Vinci Airport", "Rome", "IT"),
    ("EHAM", "AMS", "Amsterdam Schiphol Airport", "Amsterdam", "NL"),
    ("KJFK", "JFK", "John F. Kennedy Airport", "New York", "US"),
    ("KLAX", "LAX", "Los Angeles Airport", "Los Angeles", "US"),
    ("CYYZ", "YYZ", "Toronto Pearson Airport", "Toronto", "CA"),
];

/// Read-only reference data, built once at startup and shared by every
/// request.
#[derive(Debug)]
pub struct Catalog {
    countries: Vec<Country>,
    airports: Vec<Airport>,
}

impl Catalog {
    pub fn new(countries: Vec<Country>, airports: Vec<Airport>) -> Catalog {
        Catalog {
            countries,
            airports,
        }
    }

    pub fn builtin() -> Catalog {
        let countries = COUNTRIES
            .iter()
            .map(|&(code, name)| Country { code, name })
            .collect();
        let airports = AIRPORTS
            .iter()
            .map(|&(icao, iata, name, city, country)| Airport {
                icao,
                iata,
                name,
                city,
                country,
            })
            .collect();
        Catalog::new(countries, airports)
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    /// Airports whose country matches `code` exactly, in catalog order
    pub fn airports_in(&self, code: &str) -> Vec<&Airport> {
        self.airports.iter().filter(|a| a.country == code).collect()
    }
}
