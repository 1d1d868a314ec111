//! Clock and scroll rendering
//!
//! Both display loops run inside this one executor task and share the LCD
//! through [`SharedDisplay`](quipclock_core::display::SharedDisplay). They
//! interleave only at their sleeps and the HTTP fetch.

use defmt::*;
use embassy_time::Delay;
use quipclock_core::scheduler::{clock_task, run_display_tasks, scroll_task, StopFlag};
use quipclock_hal::EhDelay;
use quipclock_hal_rp2040::RtcClock;

use crate::config;
use crate::net::HttpTextSource;
use crate::Display;

/// Run the clock and the scroller forever
#[embassy_executor::task]
pub async fn display_task(
    display: &'static Display,
    mut rtc: RtcClock<'static>,
    mut source: HttpTextSource,
) {
    info!("Display tasks started");

    // Never set on the device
    let stop = StopFlag::new();
    let mut clock_sleeper = EhDelay::new(Delay);
    let mut scroll_sleeper = EhDelay::new(Delay);

    run_display_tasks(
        clock_task(display, &mut rtc, &mut clock_sleeper, &config::CLOCK, &stop),
        scroll_task(display, &mut source, &mut scroll_sleeper, &config::SCROLL, &stop),
    )
    .await;
}
