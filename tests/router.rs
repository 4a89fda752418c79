use flightboard::flight::Direction;
use flightboard::http::HttpMethod;
use flightboard::router::{query_param, route, Route};

#[test]
fn route_api_test() {
    assert_eq!(route(&HttpMethod::Get, "/api/countries"), Route::Countries);
    assert_eq!(route(&HttpMethod::Get, "/api/airports"), Route::Airports);
    assert_eq!(route(&HttpMethod::Get, "/api/flights"), Route::Flights);
    assert_eq!(route(&HttpMethod::Get, "/health"), Route::Health);
}

#[test]
fn route_boards_test() {
    let cases = vec![
        ("/api/departures", Direction::Departures, false),
        ("/api/departures/demo", Direction::Departures, true),
        ("/api/arrivals", Direction::Arrivals, false),
        ("/api/arrivals/demo", Direction::Arrivals, true),
    ];
    for (path, direction, demo) in cases {
        assert_eq!(route(&HttpMethod::Get, path), Route::Board { direction, demo }, "{}", path);
    }
    assert_eq!(route(&HttpMethod::Post, "/api/arrivals"), Route::MethodNotAllowed);
}

#[test]
fn route_static_test() {
    assert_eq!(route(&HttpMethod::Get, "/"), Route::Index);
    assert_eq!(route(&HttpMethod::Get, "/css/board.css"), Route::Asset);
    assert_eq!(route(&HttpMethod::Get, "*"), Route::NotFound);
}

#[test]
fn route_options_short_circuits_test() {
    for path in &["/api/flights", "/nope", "*", ""] {
        assert_eq!(route(&HttpMethod::Options, path), Route::Preflight);
    }
}

#[test]
fn route_method_not_allowed_test() {
    let methods = vec![
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Head,
        HttpMethod::Patch,
        HttpMethod::Other("BREW".to_string()),
    ];
    for method in methods.iter() {
        assert_eq!(route(method, "/api/countries"), Route::MethodNotAllowed);
    }
}

#[test]
fn query_param_test() {
    assert_eq!(query_param("country=NO", "country"), Some("NO"));
    assert_eq!(query_param("a=1&airport=OSL&b=2", "airport"), Some("OSL"));
    assert_eq!(query_param("a=1", "airport"), None);
    assert_eq!(query_param("", "airport"), None);
    assert_eq!(query_param("country=", "country"), None);
    assert_eq!(query_param("xcountry=SE", "country"), None);
    assert_eq!(query_param("airport=O%53L", "airport"), Some("O%53L"));
}
