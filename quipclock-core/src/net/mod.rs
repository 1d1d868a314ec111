//! Network wire helpers
//!
//! Pure encode/decode for the two protocols the firmware speaks. Socket
//! handling stays in the firmware crate.

pub mod http;
pub mod sntp;

pub use http::{build_get, parse_response, HttpError, HttpRequest};
pub use sntp::{ntp_to_unix, parse_reply, request_packet, SntpError, NTP_PACKET_LEN, NTP_PORT};
