use flightboard::upstream::{
    split_body, FetchError, Fetcher, HttpFetcher, Url, MAX_RESPONSE, USER_AGENT,
};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

#[test]
fn url_parse_test() {
    let url = Url::parse("http://api.aviationstack.com/v1/flights?access_key=k").unwrap();
    assert_eq!(url.host, "api.aviationstack.com");
    assert_eq!(url.port, 80);
    assert_eq!(url.target, "/v1/flights?access_key=k");

    let url = Url::parse("http://127.0.0.1:9000").unwrap();
    assert_eq!(url.host, "127.0.0.1");
    assert_eq!(url.port, 9000);
    assert_eq!(url.target, "/");

    let url = Url::parse("http://localhost?x=1").unwrap();
    assert_eq!(url.target, "/?x=1");
}

#[test]
fn url_parse_unsupported_test() {
    assert!(matches!(
        Url::parse("https://api.aviationstack.com/v1/flights"),
        Err(FetchError::UnsupportedScheme(_))
    ));
    assert!(matches!(
        Url::parse("http://:80/"),
        Err(FetchError::UnsupportedScheme(_))
    ));
    assert!(matches!(
        Url::parse("http://host:notaport/"),
        Err(FetchError::UnsupportedScheme(_))
    ));
}

#[test]
fn split_body_test() {
    let raw = b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n\r\n{\"data\":[]}";
    assert_eq!(split_body(raw).unwrap(), b"{\"data\":[]}".to_vec());
}

#[test]
fn split_body_ignores_status_test() {
    let raw = b"HTTP/1.1 401 Unauthorized\r\n\r\n{\"error\":{}}";
    assert_eq!(split_body(raw).unwrap(), b"{\"error\":{}}".to_vec());
}

#[test]
fn split_body_chunked_test() {
    let raw = b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\n5\r\n{\"dat\r\n6;ext=1\r\na\":[]}\r\n0\r\n\r\n";
    assert_eq!(split_body(raw).unwrap(), b"{\"data\":[]}".to_vec());
}

#[test]
fn split_body_malformed_test() {
    assert!(matches!(
        split_body(b"HTTP/1.1 200 OK\r\nContent-Type: text"),
        Err(FetchError::MalformedResponse)
    ));
    assert!(matches!(
        split_body(b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\nzz\r\n"),
        Err(FetchError::MalformedResponse)
    ));
}

#[tokio::test]
async fn http_fetcher_fetch_test() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let upstream = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buffer = vec![0; 4096];
        let n = socket.read(&mut buffer).await.unwrap();
        let request = String::from_utf8_lossy(&buffer[..n]).to_string();
        socket
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 11\r\n\r\n{\"data\":[]}")
            .await
            .unwrap();
        request
    });

    let fetcher = HttpFetcher::new(Duration::from_secs(5));
    let body = fetcher
        .fetch(&format!("http://{}/v1/flights?dep_iata=OSL", addr))
        .await
        .unwrap();
    assert_eq!(body, b"{\"data\":[]}".to_vec());

    let request = upstream.await.unwrap();
    assert!(request.starts_with("GET /v1/flights?dep_iata=OSL HTTP/1.1\r\n"));
    assert!(request.contains(&format!("User-Agent: {}\r\n", USER_AGENT)));
    assert!(request.contains("Connection: close\r\n"));
}

#[tokio::test]
async fn http_fetcher_timeout_test() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let _upstream = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;
        drop(socket);
    });

    let fetcher = HttpFetcher::new(Duration::from_millis(200));
    let result = fetcher.fetch(&format!("http://{}/", addr)).await;
    assert!(matches!(result, Err(FetchError::Timeout(_))));
}

#[tokio::test]
async fn http_fetcher_connection_refused_test() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let fetcher = HttpFetcher::new(Duration::from_secs(5));
    let result = fetcher.fetch(&format!("http://{}/", addr)).await;
    assert!(matches!(result, Err(FetchError::Io(_))));
}

#[tokio::test]
async fn http_fetcher_caps_reply_size_test() {
    const HEAD: &[u8] = b"HTTP/1.1 200 OK\r\n\r\n";
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let _upstream = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buffer = vec![0; 4096];
        let _ = socket.read(&mut buffer).await;
        let mut reply = HEAD.to_vec();
        reply.extend(std::iter::repeat(b'a').take(MAX_RESPONSE * 2));
        // The fetcher stops reading at the cap, so the tail may fail to send
        let _ = socket.write_all(&reply).await;
    });

    let fetcher = HttpFetcher::new(Duration::from_secs(5));
    let body = fetcher.fetch(&format!("http://{}/", addr)).await.unwrap();
    assert_eq!(body.len(), MAX_RESPONSE - HEAD.len());
    assert!(body.iter().all(|&b| b == b'a'));
}
