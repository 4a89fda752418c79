use flightboard::assets::DirAssetStore;
use flightboard::catalog::Catalog;
use flightboard::flights::FlightService;
use flightboard::handler::Handler;
use flightboard::keystore::FileKeyStore;
use flightboard::server;
use flightboard::upstream::HttpFetcher;
use flightboard::{init_logging, Config};
use log::{info, warn};
use std::error::Error;
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
pub async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.yaml".to_string());
    let (config, load_error) = match Config::from_file(&path) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e.to_string())),
    };
    init_logging(config.log_level())?;
    if let Some(e) = load_error {
        warn!("Error reading {} ({}), using defaults", path, e);
    }

    let flights = FlightService::new(
        Box::new(FileKeyStore::new(config.keystore())),
        Box::new(HttpFetcher::new(config.upstream().timeout())),
        config.upstream().url().to_string(),
        config.mock_mode(),
    );
    let handler = Handler::new(
        Arc::new(Catalog::builtin()),
        Box::new(DirAssetStore::new(config.asset_root())),
        flights,
        config.index(),
        config.default_airport(),
    );

    // Bind a TCP listener, failing here stops the process
    let addr = config.listen()?;
    let listener = TcpListener::bind(addr).await?;
    info!("Flight Status Board listening on http://{}", addr);
    server::run(listener, handler, config.read_timeout()).await
}
