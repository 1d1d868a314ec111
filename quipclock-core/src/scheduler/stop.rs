//! Cooperative cancellation

use core::cell::Cell;

/// Request for the display tasks to return
///
/// Checked at the top of every task iteration. Never set on the device;
/// the simulation harness uses it to end a run.
#[derive(Debug, Default)]
pub struct StopFlag(Cell<bool>);

impl StopFlag {
    pub const fn new() -> Self {
        Self(Cell::new(false))
    }

    /// Ask the tasks to finish their current iteration and return
    pub fn stop(&self) {
        self.0.set(true);
    }

    /// Whether a stop was requested
    pub fn is_set(&self) -> bool {
        self.0.get()
    }
}
