//! Startup screens
//!
//! Shown once before the display tasks start: a greeting, a connecting
//! notice with an animated dot row while the network joins, and a
//! confirmation.

use core::cell::Cell;
use core::convert::Infallible;
use core::future::{poll_fn, Future};
use core::pin::pin;
use core::task::Poll;

use embassy_futures::select::{select, Either};
use quipclock_hal::SuspendingDelay;

use super::SharedDisplay;
use crate::traits::{CharacterDisplay, LCD_COLS};

/// First screen after power-on
pub const GREETING: &str = "Hello, World!";

/// Shown when the network join starts
pub const CONNECTING: &str = "Connecting...";

/// Shown once the network is up
pub const CONNECTED: &str = "Connected";

const DOTS: &str = "................";

/// Progress dots: one, two, ... up to a full row, then back to one
#[derive(Debug, Clone, Default)]
pub struct ConnectingDots {
    count: u8,
}

impl ConnectingDots {
    pub const fn new() -> Self {
        Self { count: 0 }
    }

    /// Dots for the next frame
    pub fn next_frame(&mut self) -> &'static str {
        self.count = if self.count >= LCD_COLS {
            1
        } else {
            self.count + 1
        };
        &DOTS[..usize::from(self.count)]
    }
}

/// Write `text` at the top left
pub fn show_status<L: CharacterDisplay>(display: &SharedDisplay<L>, text: &str) {
    display.with(|lcd| {
        lcd.set_cursor(0, 0);
        lcd.write_string(text);
    });
}

/// Show `text` for `ms`, then clear the screen
pub async fn show_for<L, S>(display: &SharedDisplay<L>, sleeper: &mut S, text: &str, ms: u32)
where
    L: CharacterDisplay,
    S: SuspendingDelay,
{
    show_status(display, text);
    sleeper.sleep_ms(ms).await;
    display.with(|lcd| lcd.clear());
}

/// Clear the screen and greet
pub async fn greet<L, S>(display: &SharedDisplay<L>, sleeper: &mut S, step_ms: u32)
where
    L: CharacterDisplay,
    S: SuspendingDelay,
{
    display.with(|lcd| lcd.clear());
    show_for(display, sleeper, GREETING, step_ms).await;
}

/// Redraw the dot row every `step_ms` until dropped
pub async fn animate_connecting<L, S>(
    display: &SharedDisplay<L>,
    sleeper: &mut S,
    step_ms: u32,
) -> Infallible
where
    L: CharacterDisplay,
    S: SuspendingDelay,
{
    let mut dots = ConnectingDots::new();
    loop {
        sleeper.sleep_ms(step_ms).await;
        let frame = dots.next_frame();
        display.with(|lcd| {
            lcd.clear();
            lcd.set_cursor(0, 0);
            lcd.write_string(frame);
        });
    }
}

/// Run `connect` behind the connecting screens
///
/// `connect` starts together with the notice and is always polled first.
/// The notice stays up for its full `step_ms` even if `connect` is already
/// done, then the dot animation runs until `connect` completes and the
/// confirmation is shown. Returns whatever `connect` produced.
pub async fn connect_with_progress<L, S, F>(
    display: &SharedDisplay<L>,
    sleeper: &mut S,
    step_ms: u32,
    connect: F,
) -> F::Output
where
    L: CharacterDisplay,
    S: SuspendingDelay,
    F: Future,
{
    let output = {
        let notice_done = Cell::new(false);
        let mut connect = pin!(connect);
        let mut progress = pin!(async {
            show_for(display, sleeper, CONNECTING, step_ms).await;
            notice_done.set(true);
            animate_connecting(display, sleeper, step_ms).await
        });

        let output = match select(connect.as_mut(), progress.as_mut()).await {
            Either::First(output) => output,
            Either::Second(never) => match never {},
        };

        if !notice_done.get() {
            let notice_shown = poll_fn(|_| {
                if notice_done.get() {
                    Poll::Ready(())
                } else {
                    Poll::Pending
                }
            });
            if let Either::First(never) = select(progress.as_mut(), notice_shown).await {
                match never {}
            }
        }
        output
    };

    show_for(display, sleeper, CONNECTED, step_ms).await;
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimClock;
    use crate::testing::{Op, RecordingDisplay};
    use crate::traits::BLANK_ROW;

    #[test]
    fn test_dots_grow_then_wrap() {
        let mut dots = ConnectingDots::new();
        for n in 1..=16 {
            assert_eq!(dots.next_frame().len(), n);
        }
        assert_eq!(dots.next_frame(), ".");
        assert_eq!(dots.next_frame(), "..");
    }

    #[test]
    fn test_greet() {
        let clock = SimClock::new();
        let display = SharedDisplay::new(RecordingDisplay::new(2));
        let mut sleeper = clock.sleeper();

        clock.run(greet(&display, &mut sleeper, 1_000));

        assert_eq!(clock.now_ms(), 1_000);
        let lcd = display.into_inner();
        assert_eq!(
            lcd.ops,
            [
                Op::Clear,
                Op::Cursor(0, 0),
                Op::Text(GREETING.into()),
                Op::Clear
            ]
        );
        assert_eq!(lcd.row_text(0), BLANK_ROW);
    }

    #[test]
    fn test_connect_with_progress() {
        let clock = SimClock::new();
        let display = SharedDisplay::new(RecordingDisplay::new(2));
        let mut sleeper = clock.sleeper();
        let mut join_timer = clock.sleeper();

        let connect = async {
            join_timer.sleep_ms(3_500).await;
            42
        };
        let out = clock.run(connect_with_progress(&display, &mut sleeper, 1_000, connect));

        assert_eq!(out, 42);
        // join runs under the 1 s notice and two dot frames, 1 s confirmation
        assert_eq!(clock.now_ms(), 4_500);
        assert_eq!(
            display.into_inner().texts(),
            [CONNECTING, ".", "..", CONNECTED]
        );
    }

    #[test]
    fn test_join_starts_with_notice() {
        let clock = SimClock::new();
        let display = SharedDisplay::new(RecordingDisplay::new(2));
        let mut sleeper = clock.sleeper();
        let started_at = Cell::new(None);

        let connect = async {
            started_at.set(Some(clock.now_ms()));
        };
        clock.run(connect_with_progress(&display, &mut sleeper, 1_000, connect));

        assert_eq!(started_at.get(), Some(0));
        assert_eq!(display.into_inner().texts(), [CONNECTING, CONNECTED]);
    }

    #[test]
    fn test_quick_join_keeps_full_notice() {
        let clock = SimClock::new();
        let display = SharedDisplay::new(RecordingDisplay::new(2));
        let mut sleeper = clock.sleeper();
        let mut join_timer = clock.sleeper();

        let connect = async {
            join_timer.sleep_ms(300).await;
        };
        clock.run(connect_with_progress(&display, &mut sleeper, 1_000, connect));

        assert_eq!(clock.now_ms(), 2_000);
        let lcd = display.into_inner();
        assert_eq!(lcd.texts(), [CONNECTING, CONNECTED]);
        assert_eq!(
            lcd.ops[..4],
            [
                Op::Cursor(0, 0),
                Op::Text(CONNECTING.into()),
                Op::Clear,
                Op::Cursor(0, 0)
            ]
        );
    }

    #[test]
    fn test_instant_connect_skips_dots() {
        let clock = SimClock::new();
        let display = SharedDisplay::new(RecordingDisplay::new(2));
        let mut sleeper = clock.sleeper();

        clock.run(connect_with_progress(&display, &mut sleeper, 1_000, async {}));

        assert_eq!(clock.now_ms(), 2_000);
        assert_eq!(display.into_inner().texts(), [CONNECTING, CONNECTED]);
    }
}
