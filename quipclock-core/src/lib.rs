//! Board-agnostic core logic for the quipclock LCD clock
//!
//! This crate contains everything that does not touch real hardware:
//!
//! - Character display trait and row clamping
//! - Scroll sessions and the shared display handle
//! - Clock snapshot conversion and formatting
//! - Text source boundary and message normalization
//! - SNTP and HTTP wire helpers
//! - Startup splash sequence
//! - The two cooperative display tasks
//! - Configuration type definitions
//! - A deterministic simulation harness (`sim` feature)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod clock;
pub mod config;
pub mod display;
pub mod net;
pub mod scheduler;
pub mod text;
pub mod traits;

#[cfg(any(test, feature = "sim"))]
pub mod sim;

#[cfg(test)]
pub(crate) mod testing;
