//! Hardware and collaborator abstraction traits
//!
//! These traits define the interface between the display logic and
//! the device-specific implementations in the drivers and firmware crates.

pub mod display;
pub mod source;

pub use display::{clamp_row, CharacterDisplay, BLANK_ROW, LCD_COLS};
pub use source::{TextSource, TimeSource};
