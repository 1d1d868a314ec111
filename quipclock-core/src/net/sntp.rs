//! SNTP client packets (RFC 4330)

use core::fmt;

/// UDP port of NTP servers
pub const NTP_PORT: u16 = 123;

/// Size of an NTP header without extensions
pub const NTP_PACKET_LEN: usize = 48;

/// Seconds between 1900-01-01 and 1970-01-01
pub const NTP_UNIX_OFFSET: u64 = 2_208_988_800;

/// LI = 0, VN = 3, Mode = 3 (client)
const CLIENT_HEADER: u8 = 0x1B;

const MODE_SERVER: u8 = 4;
const MODE_BROADCAST: u8 = 5;

/// Offset of the transmit timestamp seconds
const TRANSMIT_SECS: usize = 40;

/// SNTP reply errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SntpError {
    /// Reply shorter than an NTP header
    Truncated,
    /// Reply is not from a server
    BadMode(u8),
    /// Server asked us to back off (stratum 0)
    KissOfDeath,
    /// Server has no time to give
    ZeroTimestamp,
}

impl fmt::Display for SntpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated => f.write_str("short NTP reply"),
            Self::BadMode(mode) => write!(f, "unexpected NTP mode {}", mode),
            Self::KissOfDeath => f.write_str("NTP kiss-of-death"),
            Self::ZeroTimestamp => f.write_str("NTP server unsynchronized"),
        }
    }
}

/// Build a client request
pub fn request_packet() -> [u8; NTP_PACKET_LEN] {
    let mut packet = [0u8; NTP_PACKET_LEN];
    packet[0] = CLIENT_HEADER;
    packet
}

/// Extract the server transmit time from a reply, as Unix seconds
pub fn parse_reply(reply: &[u8]) -> Result<u64, SntpError> {
    if reply.len() < NTP_PACKET_LEN {
        return Err(SntpError::Truncated);
    }

    let mode = reply[0] & 0x07;
    if mode != MODE_SERVER && mode != MODE_BROADCAST {
        return Err(SntpError::BadMode(mode));
    }

    if reply[1] == 0 {
        return Err(SntpError::KissOfDeath);
    }

    let secs = u32::from_be_bytes([
        reply[TRANSMIT_SECS],
        reply[TRANSMIT_SECS + 1],
        reply[TRANSMIT_SECS + 2],
        reply[TRANSMIT_SECS + 3],
    ]);
    if secs == 0 {
        return Err(SntpError::ZeroTimestamp);
    }

    Ok(ntp_to_unix(secs))
}

/// Convert NTP seconds to Unix seconds
///
/// Timestamps with the top bit clear are taken to be in era 1, which
/// starts in 2036.
pub fn ntp_to_unix(secs: u32) -> u64 {
    let secs = u64::from(secs);
    if secs & 0x8000_0000 == 0 {
        secs + (1 << 32) - NTP_UNIX_OFFSET
    } else {
        secs - NTP_UNIX_OFFSET
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(mode: u8, stratum: u8, secs: u32) -> [u8; NTP_PACKET_LEN] {
        let mut packet = [0u8; NTP_PACKET_LEN];
        packet[0] = 0x18 | mode;
        packet[1] = stratum;
        packet[TRANSMIT_SECS..TRANSMIT_SECS + 4].copy_from_slice(&secs.to_be_bytes());
        packet
    }

    #[test]
    fn test_request_header() {
        let packet = request_packet();
        assert_eq!(packet[0], 0x1B);
        assert!(packet[1..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_unix_conversion() {
        assert_eq!(ntp_to_unix(2_208_988_800), 0);
        assert_eq!(ntp_to_unix(3_927_916_800), 1_718_928_000);
    }

    #[test]
    fn test_era_rollover() {
        // 2036-02-07 06:28:16 UTC
        assert_eq!(ntp_to_unix(0), 2_085_978_496);
        assert_eq!(ntp_to_unix(16), 2_085_978_512);
    }

    #[test]
    fn test_parse_reply() {
        let packet = reply(MODE_SERVER, 2, 3_927_916_800);
        assert_eq!(parse_reply(&packet), Ok(1_718_928_000));
    }

    #[test]
    fn test_parse_reply_errors() {
        let packet = reply(MODE_SERVER, 2, 3_927_916_800);
        assert_eq!(parse_reply(&packet[..47]), Err(SntpError::Truncated));
        assert_eq!(
            parse_reply(&reply(3, 2, 3_927_916_800)),
            Err(SntpError::BadMode(3))
        );
        assert_eq!(
            parse_reply(&reply(MODE_SERVER, 0, 3_927_916_800)),
            Err(SntpError::KissOfDeath)
        );
        assert_eq!(
            parse_reply(&reply(MODE_SERVER, 1, 0)),
            Err(SntpError::ZeroTimestamp)
        );
    }
}
