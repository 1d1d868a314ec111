//! Configuration types
//!
//! Board-agnostic device settings. The firmware build script reads them from
//! `device.toml` and bakes them in as constants.

pub mod types;

pub use types::*;
