use crate::http::{HttpVersion, StatusCode};
use serde::Serialize;
use serde_json::json;

pub const JSON: &str = "application/json";
pub const TEXT: &str = "text/plain";

/// A fully buffered HTTP response. Every response carries the allow-all CORS
/// header and asks the client to close the connection.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: StatusCode,
    pub content_type: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: StatusCode, content_type: &str, body: Vec<u8>) -> Response {
        Response {
            status,
            content_type: content_type.to_string(),
            headers: Vec::new(),
            body,
        }
    }

    pub fn json<T: Serialize + ?Sized>(status: StatusCode, value: &T) -> Response {
        match serde_json::to_vec(value) {
            Ok(body) => Response::new(status, JSON, body),
            Err(e) => Response::error(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
        }
    }

    /// JSON error body of the form `{"error":"<message>"}`
    pub fn error(status: StatusCode, message: &str) -> Response {
        let body = json!({ "error": message }).to_string().into_bytes();
        Response::new(status, JSON, body)
    }

    pub fn empty(status: StatusCode) -> Response {
        Response::new(status, TEXT, Vec::new())
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Response {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Serialize status line, headers and body into the bytes sent on the wire
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut head = format!(
            "{} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nAccess-Control-Allow-Origin: *\r\n",
            HttpVersion::V11,
            self.status,
            self.content_type,
            self.body.len()
        );
        for (k, v) in self.headers.iter() {
            head.push_str(&format!("{}: {}\r\n", k, v));
        }
        head.push_str("Connection: close\r\n\r\n");
        let mut bytes = head.into_bytes();
        bytes.extend_from_slice(&self.body);
        bytes
    }
}
