//! Horizontal text scrolling on one row
//!
//! A scroll session shows a sliding 16-character window over the text
//! followed by 16 spaces. Each step blanks the row and rewrites the window,
//! so the text enters at column 0 and drains off the left edge. After the
//! last pass the row is blanked.
//!
//! The session only decides *what* to draw. The blocking form on the LCD
//! driver and [`scroll_text_suspending`] differ only in how they wait
//! between steps.

use quipclock_hal::SuspendingDelay;

use super::SharedDisplay;
use crate::traits::{clamp_row, CharacterDisplay, BLANK_ROW, LCD_COLS};

/// Blank one full row
pub fn blank_row<L: CharacterDisplay + ?Sized>(lcd: &mut L, row: u8) {
    lcd.set_cursor(0, row);
    lcd.write_string(BLANK_ROW);
}

/// One scroll request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollSession<'a> {
    text: &'a str,
    row: u8,
    passes: u16,
    step_delay_ms: u32,
}

impl<'a> ScrollSession<'a> {
    /// Create a session for a display with `rows` rows
    ///
    /// `row` is clamped the same way `set_cursor` clamps it.
    pub fn new(text: &'a str, row: u8, passes: u16, step_delay_ms: u32, rows: u8) -> Self {
        Self {
            text,
            row: clamp_row(row, rows),
            passes,
            step_delay_ms,
        }
    }

    /// Target row after clamping
    pub fn row(&self) -> u8 {
        self.row
    }

    /// Wait after each frame
    pub fn step_delay_ms(&self) -> u32 {
        self.step_delay_ms
    }

    /// Number of frames across all passes
    pub fn frame_count(&self) -> usize {
        usize::from(self.passes) * self.text.chars().count()
    }

    /// Frames in display order
    pub fn frames(&self) -> Frames<'a> {
        Frames {
            text: self.text,
            row: self.row,
            len: self.text.chars().count(),
            passes: self.passes,
            pass: 0,
            offset: 0,
        }
    }

    /// Blank the row once all frames are shown
    pub fn finish<L: CharacterDisplay + ?Sized>(&self, lcd: &mut L) {
        blank_row(lcd, self.row);
    }
}

/// Iterator over the frames of a session
#[derive(Debug, Clone)]
pub struct Frames<'a> {
    text: &'a str,
    row: u8,
    len: usize,
    passes: u16,
    pass: u16,
    offset: usize,
}

impl<'a> Iterator for Frames<'a> {
    type Item = Frame<'a>;

    fn next(&mut self) -> Option<Frame<'a>> {
        if self.len == 0 || self.pass >= self.passes {
            return None;
        }

        let frame = Frame {
            text: self.text,
            row: self.row,
            offset: self.offset,
        };

        self.offset += 1;
        if self.offset == self.len {
            self.offset = 0;
            self.pass += 1;
        }

        Some(frame)
    }
}

/// One step of a scroll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    text: &'a str,
    row: u8,
    offset: usize,
}

impl<'a> Frame<'a> {
    /// Character offset of the window into the text
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The 16 characters visible in this frame
    pub fn window(&self) -> impl Iterator<Item = char> + 'a {
        let text = self.text;
        text.chars()
            .chain(BLANK_ROW.chars())
            .skip(self.offset)
            .take(usize::from(LCD_COLS))
    }

    /// Blank the row, then write the window at column 0
    pub fn render<L: CharacterDisplay + ?Sized>(&self, lcd: &mut L) {
        blank_row(lcd, self.row);
        lcd.set_cursor(0, self.row);
        for c in self.window() {
            lcd.write_char(c);
        }
    }
}

/// Scroll `text` across `row`, yielding to other tasks between steps
///
/// Every frame is drawn in a single display access, so another task can
/// only run between complete frames.
pub async fn scroll_text_suspending<L, S>(
    display: &SharedDisplay<L>,
    sleeper: &mut S,
    text: &str,
    row: u8,
    passes: u16,
    step_delay_ms: u32,
) where
    L: CharacterDisplay,
    S: SuspendingDelay,
{
    let rows = display.with(|lcd| lcd.rows());
    let session = ScrollSession::new(text, row, passes, step_delay_ms, rows);

    for frame in session.frames() {
        display.with(|lcd| frame.render(lcd));
        sleeper.sleep_ms(session.step_delay_ms()).await;
    }

    display.with(|lcd| session.finish(lcd));
}
