use crate::http::{StatusCode, BUFSIZE};
use async_trait::async_trait;
use log::{debug, warn};
use std::time::Duration;
use thiserror::Error;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time;

pub const USER_AGENT: &str = "flight-status-board/1.0";

/// Most bytes read from one upstream reply, anything past it is dropped
pub const MAX_RESPONSE: usize = 1 << 20;

const HEADER_END: &[u8] = b"\r\n\r\n";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("unsupported url: {0}")]
    UnsupportedScheme(String),
    #[error("upstream timed out after {0:?}")]
    Timeout(Duration),
    #[error("upstream i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed upstream response")]
    MalformedResponse,
}

/// Source of raw provider responses
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Plain HTTP/1.1 client, one request per connection
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> HttpFetcher {
        HttpFetcher { timeout }
    }

    async fn request(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        let mut stream = TcpStream::connect((url.host.as_str(), url.port)).await?;
        let request = format!(
            "GET {} HTTP/1.1\r\nHost: {}\r\nUser-Agent: {}\r\nAccept: application/json\r\nConnection: close\r\n\r\n",
            url.target, url.host, USER_AGENT
        );
        stream.write_all(request.as_bytes()).await?;
        let mut response = Vec::with_capacity(BUFSIZE);
        (&mut stream)
            .take(MAX_RESPONSE as u64)
            .read_to_end(&mut response)
            .await?;
        if response.len() == MAX_RESPONSE {
            warn!("upstream reply truncated at {} bytes", MAX_RESPONSE);
        }
        split_body(&response)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let url = Url::parse(url)?;
        match time::timeout(self.timeout, self.request(&url)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(self.timeout)),
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct Url {
    pub host: String,
    pub port: u16,
    pub target: String,
}

impl Url {
    /// Split an `http://host[:port]/path?query` URL
    pub fn parse(url: &str) -> Result<Url, FetchError> {
        let rest = url
            .strip_prefix("http://")
            .ok_or_else(|| FetchError::UnsupportedScheme(url.to_string()))?;
        let (authority, target) = match rest.find(|c: char| c == '/' || c == '?') {
            Some(i) if rest[i..].starts_with('?') => (&rest[..i], format!("/{}", &rest[i..])),
            Some(i) => (&rest[..i], rest[i..].to_string()),
            None => (rest, "/".to_string()),
        };
        let (host, port) = match authority.rfind(':') {
            Some(i) => {
                let port = authority[i + 1..]
                    .parse::<u16>()
                    .map_err(|_| FetchError::UnsupportedScheme(url.to_string()))?;
                (&authority[..i], port)
            }
            None => (authority, 80),
        };
        if host.is_empty() {
            return Err(FetchError::UnsupportedScheme(url.to_string()));
        }
        Ok(Url {
            host: host.to_string(),
            port,
            target,
        })
    }
}

/// Strip the status line and headers off a raw response, de-chunking the body
/// when the server used chunked transfer encoding. The status itself is only
/// logged.
pub fn split_body(response: &[u8]) -> Result<Vec<u8>, FetchError> {
    let head_end = response
        .windows(HEADER_END.len())
        .position(|w| w == HEADER_END)
        .ok_or(FetchError::MalformedResponse)?;
    let head = String::from_utf8_lossy(&response[..head_end]);
    let body = &response[head_end + HEADER_END.len()..];

    let status = head
        .split_whitespace()
        .nth(1)
        .and_then(|s| StatusCode::parse(s.as_bytes()).ok());
    match status {
        Some(s) => debug!("upstream answered {}", s),
        None => debug!("upstream answered without a valid status line"),
    }

    let chunked = head.lines().skip(1).any(|line| {
        let mut kv = line.splitn(2, ':');
        let key = kv.next().unwrap_or("").trim();
        let value = kv.next().unwrap_or("").trim();
        key.eq_ignore_ascii_case("transfer-encoding") && value.eq_ignore_ascii_case("chunked")
    });
    if chunked {
        dechunk(body)
    } else {
        Ok(body.to_vec())
    }
}

fn dechunk(mut body: &[u8]) -> Result<Vec<u8>, FetchError> {
    let mut out = Vec::with_capacity(body.len());
    loop {
        let line_end = body
            .windows(2)
            .position(|w| w == b"\r\n")
            .ok_or(FetchError::MalformedResponse)?;
        let size_line = String::from_utf8_lossy(&body[..line_end]);
        let size_str = size_line.split(';').next().unwrap_or("").trim();
        let size =
            usize::from_str_radix(size_str, 16).map_err(|_| FetchError::MalformedResponse)?;
        body = &body[line_end + 2..];
        if size == 0 {
            return Ok(out);
        }
        if body.len() < size {
            return Err(FetchError::MalformedResponse);
        }
        out.extend_from_slice(&body[..size]);
        body = body.get(size + 2..).unwrap_or(&[]);
    }
}
