use crate::assets::{AssetError, AssetStore};
use crate::catalog::Catalog;
use crate::flights::{Board, FlightService};
use crate::http::{ParsedRequest, StatusCode};
use crate::response::Response;
use crate::router::{self, Route};
use log::error;
use serde_json::json;
use std::sync::Arc;

pub const SERVICE_NAME: &str = "flight-status-board";

/// Turns a parsed request into a response. Every failure is answered here,
/// nothing escapes to the connection loop.
pub struct Handler {
    catalog: Arc<Catalog>,
    assets: Box<dyn AssetStore>,
    flights: FlightService,
    index: String,
    default_airport: String,
}

impl Handler {
    pub fn new(
        catalog: Arc<Catalog>,
        assets: Box<dyn AssetStore>,
        flights: FlightService,
        index: &str,
        default_airport: &str,
    ) -> Handler {
        Handler {
            catalog,
            assets,
            flights,
            index: format!("/{}", index.trim_start_matches('/')),
            default_airport: default_airport.to_string(),
        }
    }

    pub async fn handle(&self, request: &ParsedRequest) -> Response {
        match router::route(&request.method, &request.path) {
            Route::Preflight => Response::empty(StatusCode::OK)
                .with_header("Access-Control-Allow-Methods", "GET, OPTIONS")
                .with_header("Access-Control-Allow-Headers", "Content-Type"),
            Route::MethodNotAllowed => {
                Response::error(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
                    .with_header("Allow", "GET, OPTIONS")
            }
            Route::Countries => Response::json(StatusCode::OK, self.catalog.countries()),
            Route::Airports => match router::query_param(&request.query, "country") {
                Some(country) => {
                    Response::json(StatusCode::OK, &self.catalog.airports_in(country))
                }
                None => Response::error(StatusCode::BAD_REQUEST, "Missing country parameter"),
            },
            Route::Flights => {
                let flights = self.flights.flights(self.airport(request)).await;
                Response::json(StatusCode::OK, &flights)
            }
            Route::Board { direction, demo } => {
                let airport = self.airport(request);
                let flights = if demo {
                    self.flights.mock_board(direction, airport)
                } else {
                    self.flights.board(direction, airport).await
                };
                Response::json(StatusCode::OK, &Board::new(airport, direction, flights))
            }
            Route::Health => Response::json(
                StatusCode::OK,
                &json!({ "status": "healthy", "service": SERVICE_NAME }),
            ),
            Route::Index => self.serve_asset(&self.index),
            Route::Asset => match request.check_path() {
                Ok(()) => self.serve_asset(&request.path),
                Err(e) => Response::error(StatusCode::BAD_REQUEST, &e.to_string()),
            },
            Route::NotFound => Response::error(StatusCode::NOT_FOUND, "Not found"),
        }
    }

    fn airport<'a>(&'a self, request: &'a ParsedRequest) -> &'a str {
        router::query_param(&request.query, "airport").unwrap_or(self.default_airport.as_str())
    }

    fn serve_asset(&self, path: &str) -> Response {
        match self.assets.load(path) {
            Ok(asset) => Response::new(StatusCode::OK, asset.content_type, asset.bytes),
            Err(AssetError::NotFound(_)) => {
                Response::error(StatusCode::NOT_FOUND, "File not found")
            }
            Err(e) => {
                error!("{}", e);
                Response::error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to read file")
            }
        }
    }
}
