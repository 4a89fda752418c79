use crate::handler::Handler;
use crate::http::{header_complete, parse_request, StatusCode, BUFSIZE};
use crate::response::Response;
use crate::AsyncResult;
use log::{error, info, warn};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::{self, Instant};

const MAX_BACKOFF_MS: u64 = 1000;

/// Server listener state. Created in the `run` call. Connections are handled
/// one at a time: the next accept only happens once the previous response has
/// been written and the socket closed.
struct Server {
    listener: TcpListener,
    handler: Handler,
    read_timeout: Duration,
}

impl Server {
    pub async fn run(&mut self) -> AsyncResult<()> {
        loop {
            let stream = self.accept().await;
            if let Err(e) = self.handle_connection(stream).await {
                error!("Error {}", e);
            }
        }
    }

    /// Accept the next connection, retrying with a capped back off. Accept
    /// errors are logged and never end the loop.
    async fn accept(&mut self) -> TcpStream {
        let mut backoff = 1;

        loop {
            match self.listener.accept().await {
                Ok((socket, _)) => return socket,
                Err(err) => error!("Failed to accept: {}", err),
            }

            // Pause execution until the back off period elapses.
            time::sleep(Duration::from_millis(backoff)).await;

            // Double the back off
            backoff = (backoff * 2).min(MAX_BACKOFF_MS);
        }
    }

    /// Read up to the end of the header section, the peer closing the stream
    /// or `BUFSIZE` bytes. The read timeout is a single deadline for the whole
    /// request; once it passes whatever arrived is dropped and an empty buffer
    /// is returned.
    async fn read_request(&self, stream: &mut TcpStream) -> AsyncResult<Vec<u8>> {
        let deadline = Instant::now() + self.read_timeout;
        let mut buffer = vec![0; BUFSIZE];
        let mut len = 0;
        while len < BUFSIZE && !header_complete(&buffer[..len]) {
            match time::timeout_at(deadline, stream.read(&mut buffer[len..])).await {
                Ok(Ok(0)) => break,
                Ok(Ok(n)) => len += n,
                Ok(Err(e)) => return Err(e.into()),
                Err(_) => {
                    warn!(
                        "read timed out after {:?} with {} bytes pending",
                        self.read_timeout, len
                    );
                    return Ok(Vec::new());
                }
            }
        }
        buffer.truncate(len);
        Ok(buffer)
    }

    async fn handle_connection(&self, mut stream: TcpStream) -> AsyncResult<()> {
        let buffer = self.read_request(&mut stream).await?;
        if buffer.is_empty() {
            return Ok(());
        }
        let response = match parse_request(&buffer) {
            Ok(request) => {
                let response = self.handler.handle(&request).await;
                info!(
                    "{} {} {} -> {}",
                    request.method,
                    request.path,
                    request.version,
                    response.status.as_u16()
                );
                response
            }
            Err(e) => {
                warn!("{}", e);
                Response::error(StatusCode::BAD_REQUEST, &e.to_string())
            }
        };
        stream.write_all(&response.to_bytes()).await?;
        stream.shutdown().await?;
        Ok(())
    }
}

/// Run the accept loop on a bound `TcpListener`, handling each connection to
/// completion before accepting the next one.
pub async fn run(listener: TcpListener, handler: Handler, read_timeout: Duration) -> AsyncResult<()> {
    let mut server = Server {
        listener,
        handler,
        read_timeout,
    };
    server.run().await
}
