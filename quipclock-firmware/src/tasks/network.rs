//! Wireless driver and network stack runners
//!
//! Both must keep running for any socket to make progress.

use cyw43_pio::PioSpi;
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::{DMA_CH0, PIO0};

/// CYW43439 driver event loop
#[embassy_executor::task]
pub async fn wifi_task(
    runner: cyw43::Runner<'static, cyw43::SpiBus<Output<'static>, PioSpi<'static, PIO0, 0, DMA_CH0>>>,
) -> ! {
    runner.run().await
}

/// embassy-net stack event loop
#[embassy_executor::task]
pub async fn net_task(mut runner: embassy_net::Runner<'static, cyw43::NetDriver<'static>>) -> ! {
    runner.run().await
}
