use std::fmt;
use thiserror::Error;

/// Maximum number of bytes read from a single connection, anything beyond is
/// dropped and only the prefix is parsed
pub const BUFSIZE: usize = 65536;

const HEADER_END: &[u8] = b"\r\n\r\n";

#[derive(Debug, PartialEq, Error)]
pub enum HttpError {
    #[error("Invalid request")]
    InvalidRequest,
    #[error("Invalid path: {0}")]
    BadPath(String),
    #[error("Invalid status code")]
    InvalidStatusCode,
}

#[derive(Debug, Clone, PartialEq, Copy)]
pub enum HttpVersion {
    V10,
    V11,
}

impl fmt::Display for HttpVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            HttpVersion::V10 => write!(f, "HTTP/1.0"),
            HttpVersion::V11 => write!(f, "HTTP/1.1"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCode(u16);

impl StatusCode {
    pub const OK: StatusCode = StatusCode(200);
    pub const BAD_REQUEST: StatusCode = StatusCode(400);
    pub const NOT_FOUND: StatusCode = StatusCode(404);
    pub const METHOD_NOT_ALLOWED: StatusCode = StatusCode(405);
    pub const INTERNAL_SERVER_ERROR: StatusCode = StatusCode(500);

    pub fn new(code: u16) -> StatusCode {
        StatusCode(code)
    }

    /// Parse the three leading digits of `bytes` as a status code, as found
    /// right after the version token of a response status line
    pub fn parse(bytes: &[u8]) -> Result<StatusCode, HttpError> {
        if bytes.len() < 3 {
            return Err(HttpError::InvalidStatusCode);
        }

        let a = bytes[0].wrapping_sub(b'0') as u16;
        let b = bytes[1].wrapping_sub(b'0') as u16;
        let c = bytes[2].wrapping_sub(b'0') as u16;

        if a == 0 || a > 5 || b > 9 || c > 9 {
            return Err(HttpError::InvalidStatusCode);
        }

        let status = (a * 100) + (b * 10) + c;
        Ok(StatusCode(status))
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    pub fn reason(&self) -> &'static str {
        match self.0 {
            200 => "OK",
            400 => "Bad Request",
            404 => "Not Found",
            405 => "Method Not Allowed",
            500 => "Internal Server Error",
            _ => "Unknown",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.0, self.reason())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HttpMethod {
    Get,
    Head,
    Post,
    Put,
    Delete,
    Connect,
    Options,
    Trace,
    Patch,
    Other(String),
}

impl HttpMethod {
    fn from_token(token: &str) -> HttpMethod {
        match token {
            "GET" => HttpMethod::Get,
            "HEAD" => HttpMethod::Head,
            "POST" => HttpMethod::Post,
            "PUT" => HttpMethod::Put,
            "DELETE" => HttpMethod::Delete,
            "CONNECT" => HttpMethod::Connect,
            "OPTIONS" => HttpMethod::Options,
            "TRACE" => HttpMethod::Trace,
            "PATCH" => HttpMethod::Patch,
            other => HttpMethod::Other(other.to_string()),
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Head => write!(f, "HEAD"),
            HttpMethod::Post => write!(f, "POST"),
            HttpMethod::Put => write!(f, "PUT"),
            HttpMethod::Delete => write!(f, "DELETE"),
            HttpMethod::Connect => write!(f, "CONNECT"),
            HttpMethod::Options => write!(f, "OPTIONS"),
            HttpMethod::Trace => write!(f, "TRACE"),
            HttpMethod::Patch => write!(f, "PATCH"),
            HttpMethod::Other(m) => write!(f, "{}", m),
        }
    }
}

/// Request line of an incoming HTTP request. Headers and body are not kept.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRequest {
    pub method: HttpMethod,
    pub path: String,
    pub query: String,
    pub version: HttpVersion,
}

impl ParsedRequest {
    /// Reject any path that could climb out of the asset root
    pub fn check_path(&self) -> Result<(), HttpError> {
        if self.path.contains("..") {
            return Err(HttpError::BadPath(self.path.clone()));
        }
        Ok(())
    }
}

/// Returns true once `buffer` holds the full header section of a request
pub fn header_complete(buffer: &[u8]) -> bool {
    buffer.windows(HEADER_END.len()).any(|w| w == HEADER_END)
}

/// Parse the request line of an HTTP request
///
/// Receive a buffer argument representing a bytearray received from an
/// open stream, anything past `BUFSIZE` is ignored. The request line is split
/// on whitespace into method, target and version, the target is then split on
/// the first `?` into path and query.
pub fn parse_request(buffer: &[u8]) -> Result<ParsedRequest, HttpError> {
    let buffer = &buffer[..buffer.len().min(BUFSIZE)];
    let request_str = String::from_utf8_lossy(buffer);
    let request_line = request_str.lines().next().ok_or(HttpError::InvalidRequest)?;
    let tokens: Vec<&str> = request_line.split_whitespace().collect();
    if tokens.len() < 3 {
        return Err(HttpError::InvalidRequest);
    }
    let (path, query) = match tokens[1].find('?') {
        Some(i) => (&tokens[1][..i], &tokens[1][i + 1..]),
        None => (tokens[1], ""),
    };
    let version = if tokens[2].starts_with("HTTP/1.0") {
        HttpVersion::V10
    } else {
        HttpVersion::V11
    };
    Ok(ParsedRequest {
        method: HttpMethod::from_token(tokens[0]),
        path: path.to_string(),
        query: query.to_string(),
        version,
    })
}
