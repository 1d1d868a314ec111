//! Display driver implementations
//!
//! This crate provides concrete implementations of the display trait
//! defined in quipclock-core:
//!
//! - HD44780 character LCD over a bit-banged 4-bit parallel bus

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod lcd;

pub use lcd::{Hd44780, LcdPins};
