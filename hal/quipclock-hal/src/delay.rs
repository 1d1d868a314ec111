//! Timing primitives
//!
//! Two kinds of waiting exist on the device:
//!
//! - [`BlockingDelay`] spins the CPU. It is used for the microsecond pulse
//!   timing of the LCD bus and for controller processing delays. It blocks
//!   every task while it runs.
//! - [`SuspendingDelay`] is a cooperative sleep. Awaiting it is a suspension
//!   point where another task may run.

use core::future::Future;

/// Busy-wait delay
pub trait BlockingDelay {
    /// Spin for at least `us` microseconds
    fn delay_us(&mut self, us: u32);

    /// Spin for at least `ms` milliseconds
    fn delay_ms(&mut self, ms: u32) {
        for _ in 0..ms {
            self.delay_us(1_000);
        }
    }
}

impl<D: BlockingDelay + ?Sized> BlockingDelay for &mut D {
    fn delay_us(&mut self, us: u32) {
        (**self).delay_us(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        (**self).delay_ms(ms);
    }
}

/// Cooperative sleep
///
/// The returned future must not be `Send`-bound: everything that awaits it
/// runs on a single executor thread.
pub trait SuspendingDelay {
    /// Yield to other tasks for at least `ms` milliseconds
    fn sleep_ms(&mut self, ms: u32) -> impl Future<Output = ()>;
}

impl<D: SuspendingDelay + ?Sized> SuspendingDelay for &mut D {
    fn sleep_ms(&mut self, ms: u32) -> impl Future<Output = ()> {
        (**self).sleep_ms(ms)
    }
}

/// Adapter from `embedded-hal` delay providers
///
/// Implements [`BlockingDelay`] for blocking `DelayNs` providers and
/// [`SuspendingDelay`] for async ones. `embassy_time::Delay` is both.
#[derive(Debug, Clone, Copy, Default)]
pub struct EhDelay<D>(pub D);

impl<D> EhDelay<D> {
    /// Wrap a delay provider
    pub const fn new(delay: D) -> Self {
        Self(delay)
    }
}

impl<D: embedded_hal::delay::DelayNs> BlockingDelay for EhDelay<D> {
    fn delay_us(&mut self, us: u32) {
        embedded_hal::delay::DelayNs::delay_us(&mut self.0, us);
    }

    fn delay_ms(&mut self, ms: u32) {
        embedded_hal::delay::DelayNs::delay_ms(&mut self.0, ms);
    }
}

impl<D: embedded_hal_async::delay::DelayNs> SuspendingDelay for EhDelay<D> {
    async fn sleep_ms(&mut self, ms: u32) {
        embedded_hal_async::delay::DelayNs::delay_ms(&mut self.0, ms).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records requested nanoseconds instead of waiting
    #[derive(Default)]
    struct CountingDelay {
        total_ns: u64,
    }

    impl embedded_hal::delay::DelayNs for CountingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += u64::from(ns);
        }
    }

    impl embedded_hal_async::delay::DelayNs for CountingDelay {
        async fn delay_ns(&mut self, ns: u32) {
            self.total_ns += u64::from(ns);
        }
    }

    /// Plain microsecond counter using the default `delay_ms`
    #[derive(Default)]
    struct MicroCounter {
        total_us: u64,
    }

    impl BlockingDelay for MicroCounter {
        fn delay_us(&mut self, us: u32) {
            self.total_us += u64::from(us);
        }
    }

    #[test]
    fn test_default_delay_ms_is_built_from_micros() {
        let mut delay = MicroCounter::default();
        delay.delay_ms(3);
        delay.delay_us(150);
        assert_eq!(delay.total_us, 3_150);
    }

    #[test]
    fn test_eh_blocking_delay() {
        let mut delay = EhDelay::new(CountingDelay::default());
        BlockingDelay::delay_us(&mut delay, 100);
        BlockingDelay::delay_ms(&mut delay, 2);
        assert!(delay.0.total_ns >= 2_100_000);
    }

    #[test]
    fn test_eh_suspending_delay() {
        let mut delay = EhDelay::new(CountingDelay::default());
        embassy_futures::block_on(delay.sleep_ms(500));
        assert!(delay.0.total_ns >= 500_000_000);
    }

    #[test]
    fn test_mut_ref_delay_forwards() {
        fn wait<D: BlockingDelay>(mut d: D) {
            d.delay_us(7);
        }

        let mut delay = MicroCounter::default();
        wait(&mut delay);
        assert_eq!(delay.total_us, 7);
    }
}
