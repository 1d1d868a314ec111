//! Clock snapshot and formatting
//!
//! Converts network time into civil fields and renders the top-row clock
//! line.

pub mod fields;
pub mod format;

pub use fields::{DateTimeFields, SECONDS_PER_DAY};
pub use format::{format_clock, ClockLine, CLOCK_LINE_LEN};
