//! Minimal HTTP/1.0 client framing
//!
//! One request per connection. The server closes the socket after the body,
//! so no chunked encoding or content length handling is needed.

use core::fmt::{self, Write};

use heapless::String;

/// Encoded request buffer
pub type HttpRequest = String<256>;

const HEADER_END: &[u8] = b"\r\n\r\n";

/// HTTP client errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HttpError {
    /// Host and path do not fit the request buffer
    RequestTooLong,
    /// Status line missing or unparseable
    MalformedStatus,
    /// Server answered with a non-2xx status
    Status(u16),
    /// Response ended before the header separator
    MissingBody,
    /// Body is not UTF-8
    InvalidUtf8,
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RequestTooLong => f.write_str("request too long"),
            Self::MalformedStatus => f.write_str("bad status line"),
            Self::Status(code) => write!(f, "HTTP {}", code),
            Self::MissingBody => f.write_str("no body"),
            Self::InvalidUtf8 => f.write_str("body is not text"),
        }
    }
}

/// Encode a `GET` for `path` on `host`
pub fn build_get(host: &str, path: &str) -> Result<HttpRequest, HttpError> {
    let mut req = HttpRequest::new();
    write!(
        req,
        "GET {} HTTP/1.0\r\nHost: {}\r\nUser-Agent: quipclock\r\nAccept: text/plain\r\nConnection: close\r\n\r\n",
        if path.is_empty() { "/" } else { path },
        host
    )
    .map_err(|_| HttpError::RequestTooLong)?;
    Ok(req)
}

/// Check the status and return the body of a complete response
///
/// A multi-byte character cut off at the end of `response` is dropped, so
/// a body read into a full buffer still decodes.
pub fn parse_response(response: &[u8]) -> Result<&str, HttpError> {
    let status_end = response
        .iter()
        .position(|&b| b == b'\n')
        .ok_or(HttpError::MalformedStatus)?;
    let code = parse_status(&response[..status_end])?;
    if !(200..300).contains(&code) {
        return Err(HttpError::Status(code));
    }

    let header_end = response
        .windows(HEADER_END.len())
        .position(|w| w == HEADER_END)
        .ok_or(HttpError::MissingBody)?;
    let body = &response[header_end + HEADER_END.len()..];

    match core::str::from_utf8(body) {
        Ok(text) => Ok(text),
        Err(e) if e.error_len().is_none() => {
            // Incomplete sequence at the very end
            core::str::from_utf8(&body[..e.valid_up_to()]).map_err(|_| HttpError::InvalidUtf8)
        }
        Err(_) => Err(HttpError::InvalidUtf8),
    }
}

fn parse_status(line: &[u8]) -> Result<u16, HttpError> {
    let line = core::str::from_utf8(line).map_err(|_| HttpError::MalformedStatus)?;
    let mut parts = line.trim_end_matches('\r').split(' ');

    let version = parts.next().ok_or(HttpError::MalformedStatus)?;
    if !version.starts_with("HTTP/") {
        return Err(HttpError::MalformedStatus);
    }

    parts
        .next()
        .and_then(|code| code.parse().ok())
        .ok_or(HttpError::MalformedStatus)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_get() {
        let req = build_get("icanhazdadjoke.com", "/").unwrap();
        assert!(req.starts_with("GET / HTTP/1.0\r\nHost: icanhazdadjoke.com\r\n"));
        assert!(req.ends_with("\r\n\r\n"));
    }

    #[test]
    fn test_build_get_empty_path() {
        let req = build_get("example.com", "").unwrap();
        assert!(req.starts_with("GET / HTTP/1.0"));
    }

    #[test]
    fn test_build_get_too_long() {
        let path = "/a".repeat(150);
        assert_eq!(
            build_get("example.com", &path),
            Err(HttpError::RequestTooLong)
        );
    }

    #[test]
    fn test_parse_ok() {
        let resp = b"HTTP/1.0 200 OK\r\nContent-Type: text/plain\r\n\r\nWhy did the chicken\ncross the road?\n";
        assert_eq!(
            parse_response(resp),
            Ok("Why did the chicken\ncross the road?\n")
        );
    }

    #[test]
    fn test_parse_status_error() {
        let resp = b"HTTP/1.1 503 Service Unavailable\r\n\r\nbusy";
        assert_eq!(parse_response(resp), Err(HttpError::Status(503)));
    }

    #[test]
    fn test_parse_malformed() {
        assert_eq!(parse_response(b""), Err(HttpError::MalformedStatus));
        assert_eq!(
            parse_response(b"SSH-2.0-OpenSSH\r\n"),
            Err(HttpError::MalformedStatus)
        );
        assert_eq!(
            parse_response(b"HTTP/1.0 200 OK\r\nServer: x\r\n"),
            Err(HttpError::MissingBody)
        );
    }

    #[test]
    fn test_parse_cut_multibyte_tail() {
        // "café" with the last byte of 'é' missing
        let resp = b"HTTP/1.0 200 OK\r\n\r\ncaf\xC3";
        assert_eq!(parse_response(resp), Ok("caf"));

        let resp = b"HTTP/1.0 200 OK\r\n\r\n\xFFcaf";
        assert_eq!(parse_response(resp), Err(HttpError::InvalidUtf8));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(HttpError::Status(404).to_string(), "HTTP 404");
    }
}
