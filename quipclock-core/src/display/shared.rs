//! Shared display handle
//!
//! Both display tasks run on one executor. The handle gives each of them
//! short, synchronous access to the single LCD driver value.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::NoopMutex;

/// Single-executor handle to one display
///
/// Access happens only inside [`with`](Self::with). The closure is
/// synchronous, so no borrow can be held across an `.await` and every
/// command sequence issued inside it reaches the bus uninterrupted.
pub struct SharedDisplay<L> {
    inner: NoopMutex<RefCell<L>>,
}

impl<L> SharedDisplay<L> {
    /// Wrap a display
    pub const fn new(display: L) -> Self {
        Self {
            inner: NoopMutex::new(RefCell::new(display)),
        }
    }

    /// Run `f` with exclusive access to the display
    ///
    /// # Panics
    ///
    /// Panics if called again from inside `f`.
    pub fn with<R>(&self, f: impl FnOnce(&mut L) -> R) -> R {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }

    /// Release the display
    pub fn into_inner(self) -> L {
        self.inner.into_inner().into_inner()
    }
}
