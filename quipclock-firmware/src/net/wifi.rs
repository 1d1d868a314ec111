//! CYW43439 bring-up and network join

use cyw43::{aligned_bytes, Control, JoinOptions};
use cyw43_pio::{PioSpi, DEFAULT_CLOCK_DIVIDER};
use defmt::*;
use embassy_executor::Spawner;
use embassy_net::{Config as NetConfig, Stack, StackResources};
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::{DMA_CH0, PIN_23, PIN_24, PIN_25, PIN_29, PIO0};
use embassy_rp::pio::Pio;
use embassy_rp::Peri;
use embassy_time::{with_timeout, Duration, Instant, Timer};
use static_cell::StaticCell;

use crate::tasks::{net_task, wifi_task};
use crate::Irqs;

/// Give up on a single join attempt after this long
const JOIN_TIMEOUT_SECS: u64 = 30;

/// Pause between join attempts
const RETRY_DELAY_MS: u64 = 2_000;

/// DNS, the SNTP socket and the HTTP socket
const SOCKET_COUNT: usize = 4;

/// The Pico W wiring of the wireless chip
pub struct WifiPeripherals {
    pub pwr: Peri<'static, PIN_23>,
    pub dio: Peri<'static, PIN_24>,
    pub cs: Peri<'static, PIN_25>,
    pub clk: Peri<'static, PIN_29>,
    pub pio: Peri<'static, PIO0>,
    pub dma: Peri<'static, DMA_CH0>,
}

/// Power up the radio and start the network stack
///
/// Spawns the driver and stack tasks. The returned `Control` must stay
/// alive for as long as the link is used.
pub async fn start(spawner: Spawner, p: WifiPeripherals) -> (Control<'static>, Stack<'static>) {
    let fw = aligned_bytes!("../../../cyw43-firmware/43439A0.bin");
    let clm = include_bytes!("../../../cyw43-firmware/43439A0_clm.bin");
    let nvram = aligned_bytes!("../../../cyw43-firmware/nvram_rp2040.bin");

    let pwr = Output::new(p.pwr, Level::Low);
    let cs = Output::new(p.cs, Level::High);
    let mut pio = Pio::new(p.pio, Irqs);
    let spi = PioSpi::new(
        &mut pio.common,
        pio.sm0,
        DEFAULT_CLOCK_DIVIDER,
        pio.irq0,
        cs,
        p.dio,
        p.clk,
        p.dma,
    );

    static STATE: StaticCell<cyw43::State> = StaticCell::new();
    let state = STATE.init(cyw43::State::new());
    let (net_device, mut control, runner) = cyw43::new(state, pwr, spi, fw, nvram).await;
    spawner.spawn(wifi_task(runner).unwrap());

    control.init(clm).await;
    control
        .set_power_management(cyw43::PowerManagementMode::PowerSave)
        .await;

    let mac = control.address().await;
    info!(
        "Wireless MAC {:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
        mac[0], mac[1], mac[2], mac[3], mac[4], mac[5]
    );

    static RESOURCES: StaticCell<StackResources<SOCKET_COUNT>> = StaticCell::new();
    let (stack, runner) = embassy_net::new(
        net_device,
        NetConfig::dhcpv4(Default::default()),
        RESOURCES.init(StackResources::new()),
        stack_seed(&mac),
    );
    spawner.spawn(net_task(runner).unwrap());

    (control, stack)
}

/// Join `ssid` and wait for a DHCP lease
///
/// Retries until it succeeds. An empty password joins an open network.
pub async fn join(control: &mut Control<'static>, stack: Stack<'static>, ssid: &str, password: &str) {
    let mut attempt: u32 = 0;
    loop {
        attempt += 1;
        info!("Joining {} (attempt {})", ssid, attempt);

        let options = if password.is_empty() {
            JoinOptions::new_open()
        } else {
            JoinOptions::new(password.as_bytes())
        };

        match with_timeout(
            Duration::from_secs(JOIN_TIMEOUT_SECS),
            control.join(ssid, options),
        )
        .await
        {
            Ok(Ok(())) => break,
            Ok(Err(e)) => warn!("Join failed, status {}", e.status),
            Err(_) => warn!("Join timed out after {}s", JOIN_TIMEOUT_SECS),
        }

        // Resets the driver state after a failed join
        control.leave().await;
        Timer::after(Duration::from_millis(RETRY_DELAY_MS)).await;
    }

    info!("Joined, waiting for DHCP");
    stack.wait_config_up().await;

    if let Some(config) = stack.config_v4() {
        info!("IP address {}", config.address);
    }
}

/// Seed for the stack's port and sequence randomization
fn stack_seed(mac: &[u8; 6]) -> u64 {
    let mut seed = Instant::now().as_ticks();
    for &b in mac {
        seed = seed.rotate_left(8) ^ u64::from(b);
    }
    seed
}
