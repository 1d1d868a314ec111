//! GPIO pin abstractions
//!
//! The LCD bus is write-only and has no error reporting, so output pins are
//! infallible here. Pins from `embedded-hal` HALs can be wrapped in
//! [`EhOutput`] as long as their error type is `Infallible`.

use core::convert::Infallible;

/// Digital output pin
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }
}

impl<P: OutputPin + ?Sized> OutputPin for &mut P {
    fn set_high(&mut self) {
        (**self).set_high();
    }

    fn set_low(&mut self) {
        (**self).set_low();
    }
}

/// Adapter from an `embedded-hal` output pin
///
/// Only pins that cannot fail are accepted. On the RP2040 this covers
/// `embassy_rp::gpio::Output`.
pub struct EhOutput<P>(pub P);

impl<P> EhOutput<P> {
    /// Wrap an `embedded-hal` pin
    pub const fn new(pin: P) -> Self {
        Self(pin)
    }

    /// Release the wrapped pin
    pub fn into_inner(self) -> P {
        self.0
    }
}

impl<P> OutputPin for EhOutput<P>
where
    P: embedded_hal::digital::OutputPin<Error = Infallible>,
{
    fn set_high(&mut self) {
        match self.0.set_high() {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }

    fn set_low(&mut self) {
        match self.0.set_low() {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EhPin {
        high: bool,
    }

    impl embedded_hal::digital::ErrorType for EhPin {
        type Error = Infallible;
    }

    impl embedded_hal::digital::OutputPin for EhPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.high = true;
            Ok(())
        }
    }

    #[test]
    fn test_eh_adapter_drives_pin() {
        let mut pin = EhOutput::new(EhPin { high: false });

        pin.set_state(true);
        assert!(pin.0.high);

        pin.set_state(false);
        assert!(!pin.0.high);
    }

    #[test]
    fn test_mut_ref_forwards() {
        fn drive<P: OutputPin>(mut pin: P) {
            pin.set_high();
        }

        let mut inner = EhOutput::new(EhPin { high: false });
        drive(&mut inner);
        assert!(inner.into_inner().high);
    }
}
