use crate::flight::Direction;
use crate::http::HttpMethod;

#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Preflight,
    MethodNotAllowed,
    Countries,
    Airports,
    Flights,
    /// Wrapped departures or arrivals board, `demo` always serves mock data
    Board { direction: Direction, demo: bool },
    Health,
    Index,
    Asset,
    NotFound,
}

// Most specific prefixes first
const API_ROUTES: &[(&str, Route)] = &[
    ("/api/countries", Route::Countries),
    ("/api/airports", Route::Airports),
    ("/api/flights", Route::Flights),
    (
        "/api/departures/demo",
        Route::Board { direction: Direction::Departures, demo: true },
    ),
    (
        "/api/departures",
        Route::Board { direction: Direction::Departures, demo: false },
    ),
    (
        "/api/arrivals/demo",
        Route::Board { direction: Direction::Arrivals, demo: true },
    ),
    (
        "/api/arrivals",
        Route::Board { direction: Direction::Arrivals, demo: false },
    ),
    ("/health", Route::Health),
];

/// Select the route for a request. `OPTIONS` wins over everything else and
/// any method other than `GET` is refused before the path is looked at.
pub fn route(method: &HttpMethod, path: &str) -> Route {
    match method {
        HttpMethod::Options => return Route::Preflight,
        HttpMethod::Get => {}
        _ => return Route::MethodNotAllowed,
    }
    for (prefix, route) in API_ROUTES {
        if path.starts_with(prefix) {
            return route.clone();
        }
    }
    if path == "/" {
        Route::Index
    } else if path.starts_with('/') {
        Route::Asset
    } else {
        Route::NotFound
    }
}

/// Value of `name` in a raw `key=value&...` query string. Values are returned
/// undecoded, an empty value counts as absent.
pub fn query_param<'a>(query: &'a str, name: &str) -> Option<&'a str> {
    query
        .split('&')
        .filter_map(|pair| {
            let mut kv = pair.splitn(2, '=');
            match (kv.next(), kv.next()) {
                (Some(k), Some(v)) if k == name => Some(v),
                _ => None,
            }
        })
        .find(|v| !v.is_empty())
}
