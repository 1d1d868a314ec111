//! HTTP text source
//!
//! Each fetch opens a TCP connection, sends an HTTP/1.0 `GET` and reads
//! until the server closes.

use core::fmt;

use defmt::*;
use embassy_net::tcp::TcpSocket;
use embassy_net::Stack;
use embassy_time::Duration;
use embedded_io_async::Write;
use quipclock_core::net::{build_get, parse_response, HttpError};
use quipclock_core::text::{join_lines, Message};
use quipclock_core::traits::TextSource;

use super::resolve;

/// Largest response kept, headers included. Longer bodies are cut.
const RESPONSE_LEN: usize = 1536;

/// Socket inactivity limit
const SOCKET_TIMEOUT_SECS: u64 = 10;

/// Text fetch failures
///
/// The `Display` text is what ends up scrolling on the LCD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum FetchError {
    /// Host name did not resolve
    Dns,
    /// TCP connection refused or timed out
    Connect,
    /// Request could not be sent
    Write,
    /// Connection dropped while reading
    Read,
    /// Response was not a usable 2xx text body
    Http(HttpError),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dns => f.write_str("host not found"),
            Self::Connect => f.write_str("connection failed"),
            Self::Write => f.write_str("send failed"),
            Self::Read => f.write_str("connection lost"),
            Self::Http(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl From<HttpError> for FetchError {
    fn from(e: HttpError) -> Self {
        Self::Http(e)
    }
}

/// Fetches the scroll message from a fixed URL
pub struct HttpTextSource {
    stack: Stack<'static>,
    host: &'static str,
    port: u16,
    path: &'static str,
    rx_buffer: [u8; 1024],
    tx_buffer: [u8; 512],
    response: [u8; RESPONSE_LEN],
}

impl HttpTextSource {
    pub fn new(stack: Stack<'static>, host: &'static str, port: u16, path: &'static str) -> Self {
        Self {
            stack,
            host,
            port,
            path,
            rx_buffer: [0; 1024],
            tx_buffer: [0; 512],
            response: [0; RESPONSE_LEN],
        }
    }

    /// Read the whole response into `self.response`, returning its length
    async fn exchange(&mut self) -> Result<usize, FetchError> {
        let request = build_get(self.host, self.path)?;

        let addr = resolve(self.stack, self.host).await.map_err(|e| {
            warn!("DNS lookup of {} failed: {}", self.host, e);
            FetchError::Dns
        })?;

        let mut socket = TcpSocket::new(self.stack, &mut self.rx_buffer, &mut self.tx_buffer);
        socket.set_timeout(Some(Duration::from_secs(SOCKET_TIMEOUT_SECS)));

        socket.connect((addr, self.port)).await.map_err(|e| {
            warn!("Connect to {}:{} failed: {}", self.host, self.port, e);
            FetchError::Connect
        })?;

        socket.write_all(request.as_bytes()).await.map_err(|e| {
            warn!("HTTP send failed: {}", e);
            FetchError::Write
        })?;

        let mut len = 0;
        while len < self.response.len() {
            match socket.read(&mut self.response[len..]).await {
                Ok(0) => break,
                Ok(n) => len += n,
                Err(e) => {
                    warn!("HTTP read failed: {}", e);
                    socket.abort();
                    return Err(FetchError::Read);
                }
            }
        }

        if len == self.response.len() {
            warn!("Response truncated to {} bytes", len);
            socket.abort();
        } else {
            socket.close();
        }
        // Lets the FIN or RST go out before the buffers are reused
        let _ = socket.flush().await;

        Ok(len)
    }
}

impl TextSource for HttpTextSource {
    type Error = FetchError;

    async fn fetch(&mut self) -> Result<Message, FetchError> {
        let len = self.exchange().await?;
        let body = parse_response(&self.response[..len])?;
        let text = join_lines(body);
        debug!("Fetched {} bytes of text", text.len());
        Ok(text)
    }
}
