//! Cooperative display tasks
//!
//! Two unending loops share the LCD: the clock redraws row 0 every second
//! and the scroller cycles fetched messages across row 1. They interleave
//! only at `.await` points, never inside a display access.

pub mod stop;
pub mod tasks;

pub use stop::StopFlag;
pub use tasks::{clock_task, run_display_tasks, scroll_task};
