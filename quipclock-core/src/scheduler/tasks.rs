//! The clock and scroll task bodies
//!
//! Both are plain `async fn`s generic over the display, the sleeper and
//! their source, so the firmware can run them on embassy and the tests can
//! run them under [`sim`](crate::sim).

use core::future::Future;

use embassy_futures::join::join;
use quipclock_hal::SuspendingDelay;

use super::StopFlag;
use crate::clock::format_clock;
use crate::config::{ClockConfig, ScrollConfig};
use crate::display::{scroll_text_suspending, SharedDisplay};
use crate::text::render_fetch_result;
use crate::traits::{CharacterDisplay, TextSource, TimeSource};

/// Redraw the clock on row 0 every `refresh_ms`
///
/// The line is written over the previous one without clearing, so row 0
/// never flickers.
pub async fn clock_task<L, T, S>(
    display: &SharedDisplay<L>,
    time: &mut T,
    sleeper: &mut S,
    config: &ClockConfig,
    stop: &StopFlag,
) where
    L: CharacterDisplay,
    T: TimeSource,
    S: SuspendingDelay,
{
    while !stop.is_set() {
        let line = format_clock(&time.now());
        display.with(|lcd| {
            lcd.set_cursor(0, 0);
            lcd.write_string(&line);
        });
        sleeper.sleep_ms(config.refresh_ms).await;
    }
}

/// Fetch a message and scroll it, forever
///
/// Fetch failures are scrolled as text.
///
/// An empty message or zero passes schedules no frames, so the loop waits
/// one extra step before fetching again. This is intentional: a source that
/// returns without suspending would otherwise starve the clock task.
pub async fn scroll_task<L, X, S>(
    display: &SharedDisplay<L>,
    source: &mut X,
    sleeper: &mut S,
    config: &ScrollConfig,
    stop: &StopFlag,
) where
    L: CharacterDisplay,
    X: TextSource,
    S: SuspendingDelay,
{
    while !stop.is_set() {
        let text = render_fetch_result(source.fetch().await);

        scroll_text_suspending(
            display,
            sleeper,
            &text,
            config.row,
            config.passes,
            config.step_delay_ms,
        )
        .await;

        if text.is_empty() || config.passes == 0 {
            sleeper.sleep_ms(config.step_delay_ms).await;
        }
    }
}

/// Drive both display tasks on the current executor
///
/// Completes only when both tasks return.
pub async fn run_display_tasks<C, R>(clock: C, scroll: R)
where
    C: Future<Output = ()>,
    R: Future<Output = ()>,
{
    join(clock, scroll).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{SimClock, SimTime};
    use crate::testing::{Op, RecordingDisplay, ScriptedSource};
    use crate::traits::BLANK_ROW;

    // 2024-06-21 00:00:00 UTC
    const EPOCH: u64 = 1_718_928_000;

    fn scroll_config() -> ScrollConfig {
        ScrollConfig {
            row: 1,
            passes: 3,
            step_delay_ms: 500,
        }
    }

    #[test]
    fn test_clock_ticks_each_second() {
        let clock = SimClock::new();
        let stop = StopFlag::new();
        let display = SharedDisplay::new(RecordingDisplay::new(2));
        let mut time = SimTime::new(&clock, EPOCH, 330);
        let mut sleeper = clock.sleeper();

        clock.run_until(
            3_500,
            &stop,
            clock_task(&display, &mut time, &mut sleeper, &ClockConfig::default(), &stop),
        );

        let lcd = display.into_inner();
        assert_eq!(
            lcd.texts(),
            [
                "05:30:00 21-06",
                "05:30:01 21-06",
                "05:30:02 21-06",
                "05:30:03 21-06"
            ]
        );
        assert!(!lcd.ops.contains(&Op::Clear));
        assert!(lcd
            .ops
            .iter()
            .all(|op| !matches!(op, Op::Cursor(col, row) if (*col, *row) != (0, 0))));
    }

    #[test]
    fn test_scroll_task_one_message() {
        let clock = SimClock::new();
        let stop = StopFlag::new();
        let display = SharedDisplay::new(RecordingDisplay::new(2));
        let mut source = ScriptedSource::new(&[Ok("hi")]);
        let mut sleeper = clock.sleeper();

        clock.run_until(
            100,
            &stop,
            scroll_task(&display, &mut source, &mut sleeper, &scroll_config(), &stop),
        );

        // The current scroll always completes before the task returns
        assert_eq!(source.fetches, 1);
        assert_eq!(clock.now_ms(), 6 * 500);

        let lcd = display.into_inner();
        let windows: Vec<String> = lcd
            .texts()
            .into_iter()
            .filter(|t| t != BLANK_ROW)
            .collect();
        assert_eq!(windows.len(), 6);
        assert_eq!(windows[0], "hi              ");
        assert_eq!(windows[1], "i               ");
        assert_eq!(lcd.row_text(1), BLANK_ROW);
        assert!(lcd.ops.iter().all(|op| !matches!(op, Op::Cursor(_, 0))));
    }

    #[test]
    fn test_scroll_task_shows_fetch_error() {
        let clock = SimClock::new();
        let stop = StopFlag::new();
        let display = SharedDisplay::new(RecordingDisplay::new(2));
        let mut source = ScriptedSource::new(&[Err("offline")]);
        let mut sleeper = clock.sleeper();
        let config = ScrollConfig {
            passes: 1,
            ..scroll_config()
        };

        clock.run_until(
            0,
            &stop,
            scroll_task(&display, &mut source, &mut sleeper, &config, &stop),
        );

        let texts = display.into_inner().texts();
        assert_eq!(texts[1], "Error fetching t");
        assert_eq!(texts[3], "rror fetching te");
    }

    #[test]
    fn test_scroll_task_empty_message_yields() {
        let clock = SimClock::new();
        let stop = StopFlag::new();
        let display = SharedDisplay::new(RecordingDisplay::new(2));
        let mut source = ScriptedSource::new(&[Ok("")]);
        let mut sleeper = clock.sleeper();

        clock.run_until(
            1_200,
            &stop,
            scroll_task(&display, &mut source, &mut sleeper, &scroll_config(), &stop),
        );

        assert_eq!(source.fetches, 3);
        assert_eq!(clock.now_ms(), 1_500);
        assert!(display
            .into_inner()
            .texts()
            .iter()
            .all(|t| t == BLANK_ROW));
    }

    #[test]
    fn test_scroll_task_zero_passes_yields() {
        let clock = SimClock::new();
        let stop = StopFlag::new();
        let display = SharedDisplay::new(RecordingDisplay::new(2));
        let mut source = ScriptedSource::new(&[Ok("hello")]);
        let mut sleeper = clock.sleeper();
        let config = ScrollConfig {
            passes: 0,
            ..scroll_config()
        };

        clock.run_until(
            1_200,
            &stop,
            scroll_task(&display, &mut source, &mut sleeper, &config, &stop),
        );

        // one step between fetches, never a frame of text
        assert_eq!(source.fetches, 3);
        assert_eq!(clock.now_ms(), 1_500);
        assert!(!display.into_inner().texts().iter().any(|t| t.contains('h')));
    }

    #[test]
    fn test_both_tasks_share_the_display() {
        let clock = SimClock::new();
        let stop = StopFlag::new();
        let display = SharedDisplay::new(RecordingDisplay::new(2));
        let mut time = SimTime::new(&clock, EPOCH, 0);
        let mut source = ScriptedSource::new(&[Ok("abcd"), Err("timeout")]);
        let mut clock_sleeper = clock.sleeper();
        let mut scroll_sleeper = clock.sleeper();

        clock.run_until(
            5_000,
            &stop,
            run_display_tasks(
                clock_task(
                    &display,
                    &mut time,
                    &mut clock_sleeper,
                    &ClockConfig::default(),
                    &stop,
                ),
                scroll_task(
                    &display,
                    &mut source,
                    &mut scroll_sleeper,
                    &scroll_config(),
                    &stop,
                ),
            ),
        );

        // "abcd" takes 6 s, so the error message is never reached
        assert_eq!(source.fetches, 1);
        assert_eq!(clock.now_ms(), 6_000);

        let lcd = display.into_inner();
        let clock_lines = lcd
            .texts()
            .iter()
            .filter(|t| t.contains(':'))
            .count();
        assert_eq!(clock_lines, 6);
        assert_eq!(lcd.row_text(0), "00:00:05 21-06  ");
        assert_eq!(lcd.row_text(1), BLANK_ROW);
    }
}
