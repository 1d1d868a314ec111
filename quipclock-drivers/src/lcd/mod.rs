//! HD44780 character LCD
//!
//! The controller is driven write-only over six GPIOs: RS, E and the upper
//! data lines D4..D7. The R/W line is expected to be tied to ground, so the
//! busy flag is never read and fixed delays cover command execution.

pub mod command;
pub mod hd44780;

pub use hd44780::{Hd44780, LcdPins};
