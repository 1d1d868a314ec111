//! Scroll message text
//!
//! Everything the scroll task shows is a [`Message`]: fetched text after
//! normalization, or the description of a failed fetch.

use core::fmt::{self, Display, Write};

use heapless::String;

/// Maximum message length in bytes
pub const MESSAGE_CAPACITY: usize = 512;

/// A message to scroll
pub type Message = String<MESSAGE_CAPACITY>;

/// Separator placed between the lines of a multi-line body
pub const LINE_SEPARATOR: &str = " | ";

/// Prefix for fetch failures shown on the display
pub const FETCH_ERROR_PREFIX: &str = "Error fetching text: ";

/// `fmt::Write` sink that drops whatever does not fit
///
/// Cuts only on character boundaries. Once a character is dropped,
/// everything after it is dropped too.
struct Truncating<'a> {
    msg: &'a mut Message,
    full: bool,
}

impl<'a> Truncating<'a> {
    fn new(msg: &'a mut Message) -> Self {
        Self { msg, full: false }
    }
}

impl Write for Truncating<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.full {
                break;
            }
            self.full = self.msg.push(c).is_err();
        }
        Ok(())
    }
}

/// Copy `text` into a message, truncating at capacity
pub fn message(text: &str) -> Message {
    let mut msg = Message::new();
    let _ = Truncating::new(&mut msg).write_str(text);
    msg
}

/// Flatten a fetched body onto one line
///
/// The body is trimmed, split on `\n` with any trailing `\r` removed, and
/// the lines are joined with [`LINE_SEPARATOR`].
pub fn join_lines(body: &str) -> Message {
    let mut msg = Message::new();
    let mut out = Truncating::new(&mut msg);

    for (i, line) in body.trim().split('\n').enumerate() {
        if i > 0 {
            let _ = out.write_str(LINE_SEPARATOR);
        }
        let _ = out.write_str(line.trim_end_matches('\r'));
    }
    msg
}

/// Turn a fetch outcome into displayable text
///
/// The scroll task has no failure path: an error becomes an ordinary
/// message prefixed with [`FETCH_ERROR_PREFIX`].
pub fn render_fetch_result<E: Display>(result: Result<Message, E>) -> Message {
    match result {
        Ok(msg) => msg,
        Err(e) => {
            let mut msg = Message::new();
            let _ = write!(Truncating::new(&mut msg), "{}{}", FETCH_ERROR_PREFIX, e);
            msg
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line() {
        assert_eq!(join_lines("  hello world \n").as_str(), "hello world");
    }

    #[test]
    fn test_multi_line_crlf() {
        let body = "Why do programmers prefer dark mode?\r\nBecause light attracts bugs.\r\n";
        assert_eq!(
            join_lines(body).as_str(),
            "Why do programmers prefer dark mode? | Because light attracts bugs."
        );
    }

    #[test]
    fn test_inner_blank_line_kept() {
        assert_eq!(join_lines("a\n\nb").as_str(), "a |  | b");
    }

    #[test]
    fn test_empty_body() {
        assert!(join_lines("").is_empty());
        assert!(join_lines(" \r\n ").is_empty());
    }

    #[test]
    fn test_truncates_on_char_boundary() {
        let long = "é".repeat(MESSAGE_CAPACITY);
        let msg = join_lines(&long);
        assert_eq!(msg.len(), MESSAGE_CAPACITY);
        assert!(msg.chars().all(|c| c == 'é'));

        let msg = message(&"ab".repeat(MESSAGE_CAPACITY));
        assert_eq!(msg.len(), MESSAGE_CAPACITY);
    }

    #[test]
    fn test_truncation_keeps_a_prefix() {
        // 511 bytes fit, the next two-byte char does not, and nothing after it
        let text = format!("a{}éb", "é".repeat(255));
        let msg = message(&text);
        assert_eq!(msg.len(), 511);
        assert!(text.starts_with(msg.as_str()));
    }

    #[test]
    fn test_render_ok_passes_through() {
        let result: Result<Message, &str> = Ok(message("Error fetching text: not really"));
        assert_eq!(
            render_fetch_result(result).as_str(),
            "Error fetching text: not really"
        );
    }

    #[test]
    fn test_render_error() {
        let result: Result<Message, &str> = Err("timeout");
        assert_eq!(
            render_fetch_result(result).as_str(),
            "Error fetching text: timeout"
        );
    }
}
