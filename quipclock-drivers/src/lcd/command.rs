//! HD44780 instruction set

// Instructions
pub const CLEAR_DISPLAY: u8 = 0x01;
pub const RETURN_HOME: u8 = 0x02;
pub const ENTRY_MODE_SET: u8 = 0x04;
pub const DISPLAY_CONTROL: u8 = 0x08;
pub const CURSOR_SHIFT: u8 = 0x10;
pub const FUNCTION_SET: u8 = 0x20;
pub const SET_DDRAM_ADDR: u8 = 0x80;

// Entry mode flags
pub const ENTRY_LEFT: u8 = 0x02;
pub const ENTRY_SHIFT_INCREMENT: u8 = 0x01;

// Display control flags
pub const DISPLAY_ON: u8 = 0x04;
pub const CURSOR_ON: u8 = 0x02;
pub const BLINK_ON: u8 = 0x01;

// Cursor shift flags
pub const DISPLAY_MOVE: u8 = 0x08;
pub const MOVE_RIGHT: u8 = 0x04;
pub const MOVE_LEFT: u8 = 0x00;

// Function set flags
pub const MODE_4BIT: u8 = 0x00;
pub const LINES_2: u8 = 0x08;
pub const LINES_1: u8 = 0x00;
pub const DOTS_5X10: u8 = 0x04;
pub const DOTS_5X8: u8 = 0x00;

/// Nibble sent three times to force 8-bit mode from any state
pub const INIT_8BIT: u8 = 0x03;

/// Nibble that switches the bus to 4-bit mode
pub const INIT_4BIT: u8 = 0x02;

/// DDRAM start address of each row
///
/// 16x4 modules continue rows 0 and 1 at 0x10 and 0x50.
pub const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x10, 0x50];

/// DDRAM cells per row
pub const DDRAM_ROW_LEN: u8 = 40;

/// Execution time of clear and return home
pub const SLOW_COMMAND_US: u32 = 2_000;

/// Enable pulse phase width
pub const PULSE_US: u32 = 1;

/// Settle time after each nibble
pub const SETTLE_US: u32 = 100;

/// Power-on wait before the first nibble
pub const POWER_ON_MS: u32 = 50;

/// Controller code shown for characters outside printable ASCII
pub const REPLACEMENT: u8 = b'?';
