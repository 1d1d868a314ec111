//! Network clients
//!
//! The wire formats live in `quipclock_core::net`; this module moves the
//! bytes over `embassy-net` sockets.

pub mod http;
pub mod ntp;
pub mod wifi;

use embassy_net::dns::{self, DnsQueryType};
use embassy_net::{IpAddress, Stack};

pub use http::HttpTextSource;

/// Resolve a host name, accepting dotted IPv4 literals without a lookup
pub async fn resolve(stack: Stack<'static>, host: &str) -> Result<IpAddress, dns::Error> {
    if let Ok(ip) = host.parse() {
        return Ok(IpAddress::Ipv4(ip));
    }

    let addrs = stack.dns_query(host, DnsQueryType::A).await?;
    addrs.first().copied().ok_or(dns::Error::Failed)
}
