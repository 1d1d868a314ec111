//! Build script for quipclock-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates device.toml at compile time
//! - Generates `device_config.rs` with the settings as constants

use std::env;
use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use quipclock_core::config::{DeviceConfig, MAX_PASSWORD_LEN, MAX_SSID_LEN};

fn main() {
    setup_linker();
    let config = load_config();
    generate_config(&config);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    if env::var_os("CARGO_FEATURE_DEFMT").is_some() {
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Read, parse and validate device.toml
fn load_config() -> DeviceConfig {
    println!("cargo:rerun-if-changed=device.toml");
    println!("cargo:rerun-if-env-changed=WIFI_SSID");
    println!("cargo:rerun-if-env-changed=WIFI_PASSWORD");

    let config_path = Path::new("device.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: device.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a device.toml configuration file.         ║\n\
            ║  Please create one in the quipclock-firmware directory.          ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read device.toml                               ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Syntax and field types, including string capacities
    let mut config: DeviceConfig = match toml::from_str(&config_content) {
        Ok(config) => config,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid device.toml                                      ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    };

    apply_credential_overrides(&mut config);

    if let Err(e) = config.validate() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: device.toml failed validation                            ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            format_error_lines(&e.to_string())
        );
    }

    println!("cargo:warning=device.toml validated successfully");
    config
}

/// Let credentials come from the environment instead of the checked-in file
fn apply_credential_overrides(config: &mut DeviceConfig) {
    if let Ok(ssid) = env::var("WIFI_SSID") {
        config.network.ssid.clear();
        if config.network.ssid.push_str(&ssid).is_err() {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: WIFI_SSID is longer than {:<2} bytes                       ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                MAX_SSID_LEN
            );
        }
    }

    if let Ok(password) = env::var("WIFI_PASSWORD") {
        config.network.password.clear();
        if config.network.password.push_str(&password).is_err() {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: WIFI_PASSWORD is longer than {:<2} bytes                   ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                MAX_PASSWORD_LEN
            );
        }
    }
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.chars().count() > 64 {
                format!("{}...", line.chars().take(61).collect::<String>())
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write the validated settings as constants into `$OUT_DIR/device_config.rs`
fn generate_config(config: &DeviceConfig) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let mut src = String::new();

    writeln!(src, "// Generated by build.rs from device.toml").unwrap();
    writeln!(src).unwrap();

    let lcd = &config.lcd;
    writeln!(
        src,
        "pub const LCD: LcdConfig = LcdConfig {{ rows: {}, font: CharFont::{:?} }};",
        lcd.rows, lcd.font
    )
    .unwrap();

    let scroll = &config.scroll;
    writeln!(
        src,
        "pub const SCROLL: ScrollConfig = ScrollConfig {{ row: {}, passes: {}, step_delay_ms: {} }};",
        scroll.row, scroll.passes, scroll.step_delay_ms
    )
    .unwrap();

    writeln!(
        src,
        "pub const CLOCK: ClockConfig = ClockConfig {{ refresh_ms: {} }};",
        config.clock.refresh_ms
    )
    .unwrap();

    writeln!(
        src,
        "pub const STARTUP: StartupConfig = StartupConfig {{ step_ms: {} }};",
        config.startup.step_ms
    )
    .unwrap();

    let backlight = &config.backlight;
    writeln!(
        src,
        "pub const BACKLIGHT: BacklightConfig = BacklightConfig {{ duty: {}, freq_hz: {} }};",
        backlight.duty, backlight.freq_hz
    )
    .unwrap();

    let network = &config.network;
    writeln!(src, "pub const WIFI_SSID: &str = {:?};", network.ssid.as_str()).unwrap();
    writeln!(
        src,
        "pub const WIFI_PASSWORD: &str = {:?};",
        network.password.as_str()
    )
    .unwrap();
    writeln!(
        src,
        "pub const NTP_SERVER: &str = {:?};",
        network.ntp_server.as_str()
    )
    .unwrap();
    writeln!(
        src,
        "pub const UTC_OFFSET_MINUTES: i16 = {};",
        network.utc_offset_minutes
    )
    .unwrap();

    let text = &config.text_source;
    writeln!(src, "pub const TEXT_HOST: &str = {:?};", text.host.as_str()).unwrap();
    writeln!(src, "pub const TEXT_PORT: u16 = {};", text.port).unwrap();
    writeln!(src, "pub const TEXT_PATH: &str = {:?};", text.path.as_str()).unwrap();

    // Pin numbers must be literals for take_pin!
    let pins = &config.pins;
    let [d4, d5, d6, d7] = pins.data;
    writeln!(src).unwrap();
    writeln!(src, "/// Take the configured LCD bus pins from `Peripherals`").unwrap();
    writeln!(src, "macro_rules! take_lcd_pins {{").unwrap();
    writeln!(src, "    ($p:expr) => {{").unwrap();
    writeln!(src, "        quipclock_hal_rp2040::lcd_pins(").unwrap();
    writeln!(src, "            quipclock_hal_rp2040::take_pin!($p, {}),", pins.rs).unwrap();
    writeln!(src, "            quipclock_hal_rp2040::take_pin!($p, {}),", pins.enable).unwrap();
    writeln!(src, "            [").unwrap();
    for pin in [d4, d5, d6, d7] {
        writeln!(src, "                quipclock_hal_rp2040::take_pin!($p, {}),", pin).unwrap();
    }
    writeln!(src, "            ],").unwrap();
    writeln!(src, "        )").unwrap();
    writeln!(src, "    }};").unwrap();
    writeln!(src, "}}").unwrap();
    writeln!(src, "pub(crate) use take_lcd_pins;").unwrap();

    writeln!(src).unwrap();
    writeln!(
        src,
        "pub const LCD_PINS: [u8; 6] = [{}, {}, {}, {}, {}, {}];",
        pins.rs, pins.enable, d4, d5, d6, d7
    )
    .unwrap();

    fs::write(out_dir.join("device_config.rs"), src).unwrap();
}
