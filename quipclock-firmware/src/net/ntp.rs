//! SNTP time sync over UDP

use defmt::*;
use embassy_net::udp::{PacketMetadata, UdpSocket};
use embassy_net::Stack;
use embassy_time::{with_timeout, Duration, Timer};
use quipclock_core::net::{parse_reply, request_packet, SntpError, NTP_PACKET_LEN, NTP_PORT};

use super::resolve;

/// Wait this long for a reply
const REPLY_TIMEOUT_SECS: u64 = 5;

/// Attempts before giving up
const MAX_ATTEMPTS: u32 = 3;

/// Pause between attempts
const RETRY_DELAY_MS: u64 = 2_000;

/// Time sync failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum NtpError {
    /// Server name did not resolve
    Dns,
    /// Could not open the local port
    Bind,
    /// Request was not sent
    Send,
    /// No reply in time
    Timeout,
    /// Receive failed
    Recv,
    /// Reply was not a usable time
    Reply(SntpError),
}

/// Fetch the current Unix time from `server`
///
/// Tries a few times before reporting the last failure.
pub async fn sync(stack: Stack<'static>, server: &str) -> Result<u64, NtpError> {
    let mut attempt = 1;
    loop {
        match query(stack, server).await {
            Ok(unix) => {
                info!("SNTP time {} from {}", unix, server);
                return Ok(unix);
            }
            Err(e) if attempt < MAX_ATTEMPTS => {
                warn!("SNTP attempt {} failed: {}", attempt, e);
                attempt += 1;
                Timer::after(Duration::from_millis(RETRY_DELAY_MS)).await;
            }
            Err(e) => return Err(e),
        }
    }
}

async fn query(stack: Stack<'static>, server: &str) -> Result<u64, NtpError> {
    let addr = resolve(stack, server).await.map_err(|e| {
        warn!("DNS lookup of {} failed: {}", server, e);
        NtpError::Dns
    })?;

    let mut rx_meta = [PacketMetadata::EMPTY; 1];
    let mut rx_buffer = [0; 128];
    let mut tx_meta = [PacketMetadata::EMPTY; 1];
    let mut tx_buffer = [0; 128];
    let mut socket = UdpSocket::new(
        stack,
        &mut rx_meta,
        &mut rx_buffer,
        &mut tx_meta,
        &mut tx_buffer,
    );

    socket.bind(0).map_err(|e| {
        warn!("UDP bind failed: {}", e);
        NtpError::Bind
    })?;

    socket
        .send_to(&request_packet(), (addr, NTP_PORT))
        .await
        .map_err(|e| {
            warn!("SNTP send failed: {}", e);
            NtpError::Send
        })?;

    let mut reply = [0u8; NTP_PACKET_LEN];
    let (n, _from) = with_timeout(
        Duration::from_secs(REPLY_TIMEOUT_SECS),
        socket.recv_from(&mut reply),
    )
    .await
    .map_err(|_| NtpError::Timeout)?
    .map_err(|e| {
        warn!("SNTP receive failed: {}", e);
        NtpError::Recv
    })?;

    parse_reply(&reply[..n]).map_err(NtpError::Reply)
}
