//! Deterministic simulation harness
//!
//! Runs task futures against a virtual millisecond clock. Sleeps register
//! their deadlines with a [`SimClock`]; whenever every future is waiting,
//! the clock jumps straight to the earliest deadline. No real time passes,
//! and every run of the same futures produces the same interleaving.
//!
//! ```ignore
//! let clock = SimClock::new();
//! let stop = StopFlag::new();
//! clock.run_until(10_000, &stop, run_display_tasks(clock_fut, scroll_fut));
//! ```

use core::cell::{Cell, RefCell};
use core::convert::Infallible;
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};

use embassy_futures::block_on;
use embassy_futures::select::{select, Either};
use quipclock_hal::SuspendingDelay;

use crate::clock::DateTimeFields;
use crate::scheduler::StopFlag;
use crate::traits::TimeSource;

/// Maximum sleeps pending at once
pub const MAX_SLEEPERS: usize = 8;

/// Polls without any pending sleep before a run is declared stuck
const STALL_POLLS: u32 = 1_000;

/// Virtual clock shared by every sleeper of one run
#[derive(Debug, Default)]
pub struct SimClock {
    now_ms: Cell<u64>,
    pending: RefCell<heapless::Vec<u64, MAX_SLEEPERS>>,
}

impl SimClock {
    pub const fn new() -> Self {
        Self {
            now_ms: Cell::new(0),
            pending: RefCell::new(heapless::Vec::new()),
        }
    }

    /// Current virtual time
    pub fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }

    /// A sleeper on this clock
    pub fn sleeper(&self) -> SimSleeper<'_> {
        SimSleeper { clock: self }
    }

    /// Run `fut` to completion
    ///
    /// # Panics
    ///
    /// Panics if `fut` waits on something other than a sleep of this clock.
    pub fn run<F: Future>(&self, fut: F) -> F::Output {
        self.drive(fut, None)
    }

    /// Run `fut`, setting `stop` once time would pass `limit_ms`
    ///
    /// Time keeps advancing after the stop so that tasks can reach their
    /// next stop check.
    pub fn run_until<F: Future>(&self, limit_ms: u64, stop: &StopFlag, fut: F) -> F::Output {
        self.drive(fut, Some((limit_ms, stop)))
    }

    fn drive<F: Future>(&self, fut: F, limit: Option<(u64, &StopFlag)>) -> F::Output {
        let advance = Advance {
            clock: self,
            limit,
            idle_polls: 0,
        };
        match block_on(select(fut, advance)) {
            Either::First(output) => output,
            Either::Second(never) => match never {},
        }
    }

    fn register(&self, deadline: u64) {
        if self.pending.borrow_mut().push(deadline).is_err() {
            panic!("more than {} concurrent sleeps", MAX_SLEEPERS);
        }
    }

    fn unregister(&self, deadline: u64) {
        let mut pending = self.pending.borrow_mut();
        if let Some(i) = pending.iter().position(|&d| d == deadline) {
            pending.swap_remove(i);
        }
    }

    fn earliest(&self) -> Option<u64> {
        self.pending.borrow().iter().copied().min()
    }
}

/// [`SuspendingDelay`] backed by a [`SimClock`]
#[derive(Debug, Clone, Copy)]
pub struct SimSleeper<'c> {
    clock: &'c SimClock,
}

impl<'c> SuspendingDelay for SimSleeper<'c> {
    fn sleep_ms(&mut self, ms: u32) -> impl Future<Output = ()> {
        SimSleep {
            clock: self.clock,
            deadline: self.clock.now_ms() + u64::from(ms),
            registered: false,
        }
    }
}

/// Future completing once virtual time reaches its deadline
struct SimSleep<'c> {
    clock: &'c SimClock,
    deadline: u64,
    registered: bool,
}

impl Future for SimSleep<'_> {
    type Output = ();

    fn poll(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<()> {
        let this = self.get_mut();
        if this.clock.now_ms() >= this.deadline {
            if this.registered {
                this.clock.unregister(this.deadline);
                this.registered = false;
            }
            return Poll::Ready(());
        }

        if !this.registered {
            this.clock.register(this.deadline);
            this.registered = true;
        }
        Poll::Pending
    }
}

impl Drop for SimSleep<'_> {
    fn drop(&mut self) {
        if self.registered {
            self.clock.unregister(self.deadline);
        }
    }
}

/// Polled after the simulated futures; moves time forward when they wait
struct Advance<'c> {
    clock: &'c SimClock,
    limit: Option<(u64, &'c StopFlag)>,
    idle_polls: u32,
}

impl Future for Advance<'_> {
    type Output = Infallible;

    fn poll(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Infallible> {
        let this = self.get_mut();

        let Some(deadline) = this.clock.earliest() else {
            this.idle_polls += 1;
            if this.idle_polls > STALL_POLLS {
                panic!("simulation stalled at {} ms", this.clock.now_ms());
            }
            return Poll::Pending;
        };
        this.idle_polls = 0;

        if deadline > this.clock.now_ms() {
            if let Some((limit_ms, stop)) = this.limit {
                if deadline > limit_ms {
                    stop.stop();
                }
            }
            this.clock.now_ms.set(deadline);
        }
        Poll::Pending
    }
}

/// [`TimeSource`] reading the virtual clock
pub struct SimTime<'c> {
    clock: &'c SimClock,
    epoch_unix: u64,
    offset_minutes: i16,
}

impl<'c> SimTime<'c> {
    /// Time source that reads `epoch_unix` at virtual time zero
    pub fn new(clock: &'c SimClock, epoch_unix: u64, offset_minutes: i16) -> Self {
        Self {
            clock,
            epoch_unix,
            offset_minutes,
        }
    }
}

impl TimeSource for SimTime<'_> {
    fn now(&mut self) -> DateTimeFields {
        DateTimeFields::from_unix_with_offset(
            self.epoch_unix + self.clock.now_ms() / 1_000,
            self.offset_minutes,
        )
    }
}
