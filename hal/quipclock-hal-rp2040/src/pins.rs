//! LCD bus pins
//!
//! Pin numbers come from `device.toml`, so pins are taken by number with
//! [`take_pin!`](crate::take_pin) and erased to `AnyPin`.

use embassy_rp::gpio::{AnyPin, Level, Output};
use embassy_rp::Peri;
use quipclock_drivers::LcdPins;
use quipclock_hal::EhOutput;

/// Macro to take a user GPIO by number from peripherals
///
/// GPIO23, 24, 25 and 29 belong to the wireless chip on the Pico W and
/// are not offered.
///
/// Usage:
/// ```ignore
/// let rs = take_pin!(p, 16); // Takes p.PIN_16 as Peri<AnyPin>
/// ```
#[macro_export]
macro_rules! take_pin {
    ($p:expr, 0) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_0) };
    ($p:expr, 1) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_1) };
    ($p:expr, 2) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_2) };
    ($p:expr, 3) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_3) };
    ($p:expr, 5) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_5) };
    ($p:expr, 6) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_6) };
    ($p:expr, 7) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_7) };
    ($p:expr, 8) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_8) };
    ($p:expr, 9) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_9) };
    ($p:expr, 10) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_10) };
    ($p:expr, 11) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_11) };
    ($p:expr, 12) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_12) };
    ($p:expr, 13) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_13) };
    ($p:expr, 14) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_14) };
    ($p:expr, 15) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_15) };
    ($p:expr, 16) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_16) };
    ($p:expr, 17) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_17) };
    ($p:expr, 18) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_18) };
    ($p:expr, 19) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_19) };
    ($p:expr, 20) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_20) };
    ($p:expr, 21) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_21) };
    ($p:expr, 22) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_22) };
    ($p:expr, 26) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_26) };
    ($p:expr, 27) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_27) };
    ($p:expr, 28) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_28) };
}

/// One LCD bus line
pub type LcdOutput = EhOutput<Output<'static>>;

/// Configure a GPIO as an LCD bus output, driven low
pub fn lcd_output(pin: Peri<'static, AnyPin>) -> LcdOutput {
    EhOutput::new(Output::new(pin, Level::Low))
}

/// Configure the six LCD bus lines
pub fn lcd_pins(
    rs: Peri<'static, AnyPin>,
    enable: Peri<'static, AnyPin>,
    data: [Peri<'static, AnyPin>; 4],
) -> LcdPins<LcdOutput> {
    LcdPins {
        rs: lcd_output(rs),
        enable: lcd_output(enable),
        data: data.map(lcd_output),
    }
}
