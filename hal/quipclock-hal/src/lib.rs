//! quipclock Hardware Abstraction Layer
//!
//! This crate defines the narrow hardware interface the display core needs:
//! digital output lines and two kinds of waiting. Chip-specific crates (or the
//! `embedded-hal` adapters in this crate) provide the implementations, so the
//! LCD driver and the display tasks can run against a recording backend in
//! host tests.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  quipclock-firmware (orchestrator)       │
//! └──────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ quipclock-    │       │ quipclock-    │
//! │   drivers     │       │    core       │
//! └───────────────┘       └───────────────┘
//!         │                       │
//!         └───────────┬───────────┘
//!                     ▼
//! ┌──────────────────────────────────────────┐
//! │  quipclock-hal (this crate - traits)     │
//! └──────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Infallible digital output
//! - [`delay::BlockingDelay`] - Busy-wait delays (not a suspension point)
//! - [`delay::SuspendingDelay`] - Cooperative sleep that yields to other tasks

#![no_std]
#![deny(unsafe_code)]

pub mod delay;
pub mod gpio;

// Re-export key traits at crate root for convenience
pub use delay::{BlockingDelay, EhDelay, SuspendingDelay};
pub use gpio::{EhOutput, OutputPin};
