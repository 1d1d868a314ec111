//! Bit-banged 4-bit HD44780 driver
//!
//! Every byte goes out as two nibbles, high first. Each nibble is placed on
//! D4..D7 (bit 0 on D4) and latched by a falling edge on E:
//!
//! ```text
//! E   ____|‾‾‾‾|________
//!      1us  1us   100us
//! ```
//!
//! All waits are busy-waits, so a command or data byte is never split by
//! another task.

use quipclock_core::config::{CharFont, LcdConfig};
use quipclock_core::display::ScrollSession;
use quipclock_core::traits::{clamp_row, CharacterDisplay};
use quipclock_hal::{BlockingDelay, OutputPin};

use super::command::*;

/// The six GPIO lines of the LCD bus
pub struct LcdPins<P> {
    /// Register select: low for instructions, high for data
    pub rs: P,
    /// Enable strobe
    pub enable: P,
    /// D4, D5, D6, D7
    pub data: [P; 4],
}

/// HD44780 driver
///
/// The control bytes mirror the controller registers. Every mutator updates
/// its byte and sends it before returning.
pub struct Hd44780<P, D> {
    pins: LcdPins<P>,
    delay: D,
    rows: u8,
    function: u8,
    control: u8,
    mode: u8,
}

impl<P: OutputPin, D: BlockingDelay> Hd44780<P, D> {
    /// Take ownership of the bus and initialize the controller
    ///
    /// Rows outside 1..=4 are clamped. The 5x10 font is only honored on
    /// single-row modules.
    pub fn new(pins: LcdPins<P>, delay: D, config: &LcdConfig) -> Self {
        let rows = config.rows.clamp(1, ROW_OFFSETS.len() as u8);
        let lines = if rows > 1 { LINES_2 } else { LINES_1 };
        let font = match config.font {
            CharFont::Dots5x10 if rows == 1 => DOTS_5X10,
            _ => DOTS_5X8,
        };

        let mut lcd = Self {
            pins,
            delay,
            rows,
            function: MODE_4BIT | lines | font,
            control: DISPLAY_ON,
            mode: ENTRY_LEFT,
        };
        lcd.init();
        lcd
    }

    fn init(&mut self) {
        self.pins.rs.set_low();
        self.pins.enable.set_low();
        self.delay.delay_ms(POWER_ON_MS);

        self.write4bits(INIT_8BIT);
        self.delay.delay_ms(5);
        self.write4bits(INIT_8BIT);
        self.delay.delay_us(150);
        self.write4bits(INIT_8BIT);
        self.write4bits(INIT_4BIT);

        self.command(FUNCTION_SET | self.function);
        self.display();
        self.clear();
        self.command(ENTRY_MODE_SET | self.mode);
    }

    /// Send an instruction byte
    pub fn command(&mut self, value: u8) {
        self.send(value, false);
    }

    /// Send a data byte (a character code)
    pub fn write(&mut self, value: u8) {
        self.send(value, true);
    }

    fn send(&mut self, value: u8, data: bool) {
        self.pins.rs.set_state(data);
        self.write4bits(value >> 4);
        self.write4bits(value);
    }

    fn write4bits(&mut self, nibble: u8) {
        for (i, pin) in self.pins.data.iter_mut().enumerate() {
            pin.set_state((nibble >> i) & 0x01 != 0);
        }
        self.pulse_enable();
    }

    fn pulse_enable(&mut self) {
        self.pins.enable.set_low();
        self.delay.delay_us(PULSE_US);
        self.pins.enable.set_high();
        self.delay.delay_us(PULSE_US);
        self.pins.enable.set_low();
        self.delay.delay_us(SETTLE_US);
    }

    /// Clear DDRAM and home the cursor
    pub fn clear(&mut self) {
        self.command(CLEAR_DISPLAY);
        self.delay.delay_us(SLOW_COMMAND_US);
    }

    /// Home the cursor and undo any display shift
    pub fn home(&mut self) {
        self.command(RETURN_HOME);
        self.delay.delay_us(SLOW_COMMAND_US);
    }

    /// Move the cursor; rows past the last are clamped to the last
    pub fn set_cursor(&mut self, col: u8, row: u8) {
        debug_assert!(col < DDRAM_ROW_LEN, "column {} off the end of DDRAM", col);
        let row = clamp_row(row, self.rows);
        self.command(SET_DDRAM_ADDR | col.wrapping_add(ROW_OFFSETS[usize::from(row)]));
    }

    /// Write every character of `text`, without wrapping
    pub fn write_string(&mut self, text: &str) {
        for c in text.chars() {
            self.write(char_code(c));
        }
    }

    pub fn display(&mut self) {
        self.control |= DISPLAY_ON;
        self.command(DISPLAY_CONTROL | self.control);
    }

    pub fn no_display(&mut self) {
        self.control &= !DISPLAY_ON;
        self.command(DISPLAY_CONTROL | self.control);
    }

    pub fn cursor(&mut self) {
        self.control |= CURSOR_ON;
        self.command(DISPLAY_CONTROL | self.control);
    }

    pub fn no_cursor(&mut self) {
        self.control &= !CURSOR_ON;
        self.command(DISPLAY_CONTROL | self.control);
    }

    pub fn blink(&mut self) {
        self.control |= BLINK_ON;
        self.command(DISPLAY_CONTROL | self.control);
    }

    pub fn no_blink(&mut self) {
        self.control &= !BLINK_ON;
        self.command(DISPLAY_CONTROL | self.control);
    }

    /// Cursor moves right after each write
    pub fn left_to_right(&mut self) {
        self.mode |= ENTRY_LEFT;
        self.command(ENTRY_MODE_SET | self.mode);
    }

    /// Cursor moves left after each write
    pub fn right_to_left(&mut self) {
        self.mode &= !ENTRY_LEFT;
        self.command(ENTRY_MODE_SET | self.mode);
    }

    /// Shift the whole display on each write
    pub fn autoscroll(&mut self) {
        self.mode |= ENTRY_SHIFT_INCREMENT;
        self.command(ENTRY_MODE_SET | self.mode);
    }

    pub fn no_autoscroll(&mut self) {
        self.mode &= !ENTRY_SHIFT_INCREMENT;
        self.command(ENTRY_MODE_SET | self.mode);
    }

    /// Shift the visible window one cell left without touching DDRAM
    pub fn scroll_display_left(&mut self) {
        self.command(CURSOR_SHIFT | DISPLAY_MOVE | MOVE_LEFT);
    }

    /// Shift the visible window one cell right without touching DDRAM
    pub fn scroll_display_right(&mut self) {
        self.command(CURSOR_SHIFT | DISPLAY_MOVE | MOVE_RIGHT);
    }

    /// Scroll `text` across `row`, busy-waiting between steps
    ///
    /// Blocks every task for the whole scroll. Inside the scheduler use
    /// [`scroll_text_suspending`](quipclock_core::display::scroll_text_suspending).
    pub fn scroll_text(&mut self, text: &str, row: u8, passes: u16, step_delay_ms: u32) {
        let session = ScrollSession::new(text, row, passes, step_delay_ms, self.rows);
        for frame in session.frames() {
            frame.render(self);
            self.delay.delay_ms(session.step_delay_ms());
        }
        session.finish(self);
    }

    /// Function set flags
    pub fn function_set(&self) -> u8 {
        self.function
    }

    /// Display control flags
    pub fn display_control(&self) -> u8 {
        self.control
    }

    /// Entry mode flags
    pub fn entry_mode(&self) -> u8 {
        self.mode
    }
}

impl<P: OutputPin, D: BlockingDelay> CharacterDisplay for Hd44780<P, D> {
    fn rows(&self) -> u8 {
        self.rows
    }

    fn clear(&mut self) {
        Hd44780::clear(self);
    }

    fn set_cursor(&mut self, col: u8, row: u8) {
        Hd44780::set_cursor(self, col, row);
    }

    fn write_char(&mut self, c: char) {
        self.write(char_code(c));
    }

    fn write_string(&mut self, text: &str) {
        Hd44780::write_string(self, text);
    }
}

/// Character generator code for `c`
fn char_code(c: char) -> u8 {
    if c.is_ascii_graphic() || c == ' ' {
        c as u8
    } else {
        REPLACEMENT
    }
}
