//! Device configuration
//!
//! `build.rs` validates `device.toml` and generates the constants below, so
//! a bad configuration fails the build instead of the boot.

use quipclock_core::config::{
    BacklightConfig, CharFont, ClockConfig, LcdConfig, ScrollConfig, StartupConfig,
};

include!(concat!(env!("OUT_DIR"), "/device_config.rs"));
