//! RP2040-specific HAL for the LCD clock
//!
//! Binds the board-agnostic crates to `embassy-rp`:
//!
//! - GPIO outputs for the LCD bus
//! - RTC-backed time source
//! - PWM backlight on GP4

#![no_std]

pub mod backlight;
pub mod pins;
pub mod rtc;

pub use backlight::Backlight;
pub use pins::{lcd_pins, LcdOutput};
pub use rtc::RtcClock;
