//! LCD backlight PWM on GP4 (slice 2, channel A)

use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::peripherals::{PIN_4, PWM_SLICE2};
use embassy_rp::pwm::{Config, Pwm};
use embassy_rp::Peri;
use quipclock_core::config::BacklightConfig;

/// LCD backlight held at a fixed duty
///
/// Dropping it stops the PWM output.
pub struct Backlight<'d> {
    _pwm: Pwm<'d>,
}

impl<'d> Backlight<'d> {
    /// Start the backlight at the configured duty
    pub fn new(
        slice: Peri<'d, PWM_SLICE2>,
        pin: Peri<'d, PIN_4>,
        settings: &BacklightConfig,
    ) -> Self {
        Self {
            _pwm: Pwm::new_output_a(slice, pin, pwm_config(settings)),
        }
    }
}

fn pwm_config(settings: &BacklightConfig) -> Config {
    let timing = settings.pwm_timing(clk_sys_freq());
    let mut config = Config::default();
    config.divider = timing.divider.into();
    config.top = timing.top;
    config.compare_a = timing.compare;
    config
}
