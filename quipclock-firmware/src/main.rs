//! quipclock - Pico W LCD clock
//!
//! Shows the time on row 0 of an HD44780 character LCD and scrolls a text
//! message fetched over HTTP on the row below.
//!
//! Startup:
//! 1. Backlight and LCD on, greeting
//! 2. Power up the radio and join the network behind the connecting screens
//! 3. Set the RTC from SNTP (keeps its power-on value on failure)
//! 4. Hand the display to the clock and scroll loops

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio::InterruptHandler as PioInterruptHandler;
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use quipclock_core::display::{connect_with_progress, greet, SharedDisplay};
use quipclock_drivers::Hd44780;
use quipclock_hal::EhDelay;
use quipclock_hal_rp2040::{Backlight, LcdOutput, RtcClock};

use crate::net::wifi::{self, WifiPeripherals};
use crate::net::HttpTextSource;

mod config;
mod net;
mod tasks;

bind_interrupts!(pub struct Irqs {
    PIO0_IRQ_0 => PioInterruptHandler<PIO0>;
});

/// The LCD as wired on the board
pub type Lcd = Hd44780<LcdOutput, EhDelay<Delay>>;

/// LCD handle shared by startup and the display task
pub type Display = SharedDisplay<Lcd>;

static DISPLAY: StaticCell<Display> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("quipclock starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let _backlight = Backlight::new(p.PWM_SLICE2, p.PIN_4, &config::BACKLIGHT);

    let pins = config::take_lcd_pins!(p);
    let lcd = Hd44780::new(pins, EhDelay::new(Delay), &config::LCD);
    let display: &'static Display = DISPLAY.init(SharedDisplay::new(lcd));
    info!(
        "LCD ready: {} rows on GPIO {}",
        config::LCD.rows,
        config::LCD_PINS
    );

    let mut sleeper = EhDelay::new(Delay);
    greet(display, &mut sleeper, config::STARTUP.step_ms).await;

    let mut rtc = RtcClock::new(p.RTC).unwrap();

    let wifi = WifiPeripherals {
        pwr: p.PIN_23,
        dio: p.PIN_24,
        cs: p.PIN_25,
        clk: p.PIN_29,
        pio: p.PIO0,
        dma: p.DMA_CH0,
    };
    // Radio bring-up and join both run under the connecting screens
    let (_control, stack) = connect_with_progress(
        display,
        &mut sleeper,
        config::STARTUP.step_ms,
        async {
            let (mut control, stack) = wifi::start(spawner, wifi).await;
            wifi::join(&mut control, stack, config::WIFI_SSID, config::WIFI_PASSWORD).await;
            (control, stack)
        },
    )
    .await;

    match net::ntp::sync(stack, config::NTP_SERVER).await {
        Ok(unix) => match rtc.set_unix(unix, config::UTC_OFFSET_MINUTES) {
            Ok(()) => info!("RTC set, UTC offset {} min", config::UTC_OFFSET_MINUTES),
            Err(e) => warn!("RTC rejected the time: {}", e),
        },
        Err(e) => warn!("Time sync failed, keeping RTC time: {}", e),
    }

    display.with(|lcd| lcd.clear());

    let source = HttpTextSource::new(
        stack,
        config::TEXT_HOST,
        config::TEXT_PORT,
        config::TEXT_PATH,
    );
    spawner.spawn(tasks::display_task(display, rtc, source).unwrap());

    // Keeps the wireless control handle and the backlight alive
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
