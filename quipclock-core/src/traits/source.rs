//! Time and text sources
//!
//! The clock and scroll tasks only see these two interfaces. The firmware
//! backs them with the RP2040 RTC and an HTTP client; tests use scripted
//! values.

use core::fmt::Display;
use core::future::Future;

use crate::clock::DateTimeFields;
use crate::text::Message;

/// Wall-clock reader
pub trait TimeSource {
    /// Read the current local time
    ///
    /// Called on every clock tick. Implementations must not cache.
    fn now(&mut self) -> DateTimeFields;
}

impl<T: TimeSource + ?Sized> TimeSource for &mut T {
    fn now(&mut self) -> DateTimeFields {
        (**self).now()
    }
}

/// Provider of messages to scroll
///
/// Failures are returned as values. The scroll task turns them into
/// ordinary text with [`render_fetch_result`](crate::text::render_fetch_result).
pub trait TextSource {
    /// Failure description shown on the display
    type Error: Display;

    /// Fetch the next message
    fn fetch(&mut self) -> impl Future<Output = Result<Message, Self::Error>>;
}
