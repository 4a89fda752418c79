pub mod assets;
pub mod catalog;
pub mod feed;
pub mod flight;
pub mod flights;
pub mod handler;
pub mod http;
pub mod keystore;
pub mod mock;
pub mod response;
pub mod router;
pub mod server;
pub mod upstream;

use chrono::Local;
use log::{LevelFilter, Metadata, Record, SetLoggerError};
use serde::Deserialize;
use serde_yaml;
use std::net::SocketAddr;
use std::time::Duration;

struct SimpleLogger;

impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            println!(
                "{} {:<5} - {}",
                Local::now().format("%Y-%m-%dT%H:%M:%S"),
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

static LOGGER: SimpleLogger = SimpleLogger;

pub fn init_logging(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER).map(|()| log::set_max_level(level))
}

/// Which fallback catalog is served when no upstream credential is configured
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MockMode {
    Static,
    Synthetic,
}

impl MockMode {
    fn default_mode() -> MockMode {
        MockMode::Static
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "defaults::upstream_url")]
    url: String,
    #[serde(default = "defaults::upstream_timeout")]
    timeout: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        UpstreamConfig {
            url: defaults::upstream_url(),
            timeout: defaults::upstream_timeout(),
        }
    }
}

impl UpstreamConfig {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default = "defaults::listen")]
    listen: String,
    #[serde(default = "defaults::asset_root")]
    asset_root: String,
    #[serde(default = "defaults::index")]
    index: String,
    #[serde(default = "defaults::keystore")]
    keystore: String,
    #[serde(default = "defaults::default_airport")]
    default_airport: String,
    #[serde(default = "MockMode::default_mode")]
    mock: MockMode,
    #[serde(default = "defaults::read_timeout")]
    read_timeout: u64,
    #[serde(default = "defaults::log_level")]
    log_level: String,
    #[serde(default)]
    upstream: UpstreamConfig,
}

mod defaults {
    pub fn listen() -> String {
        "0.0.0.0:8080".to_string()
    }

    pub fn asset_root() -> String {
        "public".to_string()
    }

    pub fn index() -> String {
        "index.html".to_string()
    }

    pub fn keystore() -> String {
        "config.txt".to_string()
    }

    pub fn default_airport() -> String {
        "JFK".to_string()
    }

    pub fn read_timeout() -> u64 {
        5
    }

    pub fn log_level() -> String {
        "info".to_string()
    }

    pub fn upstream_url() -> String {
        "http://api.aviationstack.com/v1/flights".to_string()
    }

    pub fn upstream_timeout() -> u64 {
        15
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            listen: defaults::listen(),
            asset_root: defaults::asset_root(),
            index: defaults::index(),
            keystore: defaults::keystore(),
            default_airport: defaults::default_airport(),
            mock: MockMode::default_mode(),
            read_timeout: defaults::read_timeout(),
            log_level: defaults::log_level(),
            upstream: UpstreamConfig::default(),
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> Result<Config, Box<dyn std::error::Error>> {
        let f = std::fs::File::open(path)?;
        let config: Config = serde_yaml::from_reader(f)?;
        return Ok(config);
    }

    pub fn from_str(content: &str) -> Result<Config, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    pub fn listen(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        self.listen.parse()
    }

    pub fn asset_root(&self) -> &str {
        &self.asset_root
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    pub fn keystore(&self) -> &str {
        &self.keystore
    }

    pub fn default_airport(&self) -> &str {
        &self.default_airport
    }

    pub fn mock_mode(&self) -> MockMode {
        self.mock
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout)
    }

    /// Unknown level names fall back to `Info`
    pub fn log_level(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }

    pub fn upstream(&self) -> &UpstreamConfig {
        &self.upstream
    }
}

pub type AsyncResult<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;
