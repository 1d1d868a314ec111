//! Configuration type definitions

use core::fmt;

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum SSID length (802.11)
pub const MAX_SSID_LEN: usize = 32;

/// Maximum WPA2 passphrase length
pub const MAX_PASSWORD_LEN: usize = 64;

/// Maximum host name length
pub const MAX_HOST_LEN: usize = 64;

/// Maximum request path length
pub const MAX_PATH_LEN: usize = 128;

/// Highest GPIO number on the RP2040
pub const MAX_GPIO: u8 = 29;

/// GPIOs the Pico W wires to the wireless chip and VSYS sense
pub const RESERVED_PINS: [u8; 4] = [23, 24, 25, 29];

/// Backlight PWM output
pub const BACKLIGHT_PIN: u8 = 4;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Row count is not 1, 2 or 4
    InvalidRows(u8),
    /// GPIO number does not exist
    PinOutOfRange(u8),
    /// GPIO is used by the board
    ReservedPin(u8),
    /// GPIO assigned twice
    DuplicatePin(u8),
    /// Scroll step delay of zero
    ZeroStepDelay,
    /// Clock refresh period of zero
    ZeroRefresh,
    /// No network name
    MissingSsid,
    /// No text source host
    MissingHost,
    /// UTC offset outside -12:00..=+14:00
    InvalidUtcOffset(i16),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRows(rows) => write!(f, "lcd.rows must be 1, 2 or 4, got {}", rows),
            Self::PinOutOfRange(pin) => write!(f, "GPIO{} does not exist", pin),
            Self::ReservedPin(pin) => write!(f, "GPIO{} is reserved on the Pico W", pin),
            Self::DuplicatePin(pin) => write!(f, "GPIO{} is assigned more than once", pin),
            Self::ZeroStepDelay => f.write_str("scroll.step_delay_ms must be positive"),
            Self::ZeroRefresh => f.write_str("clock.refresh_ms must be positive"),
            Self::MissingSsid => f.write_str("network.ssid is empty"),
            Self::MissingHost => f.write_str("text_source.host is empty"),
            Self::InvalidUtcOffset(m) => write!(f, "utc_offset_minutes {} out of range", m),
        }
    }
}

/// Character cell font
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CharFont {
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "5x8"))]
    Dots5x8,
    /// Only available on single-row modules
    #[cfg_attr(feature = "serde", serde(rename = "5x10"))]
    Dots5x10,
}

/// LCD module geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LcdConfig {
    /// Visible rows (1, 2 or 4)
    pub rows: u8,
    /// Character font
    pub font: CharFont,
}

impl Default for LcdConfig {
    fn default() -> Self {
        Self {
            rows: 2,
            font: CharFont::Dots5x8,
        }
    }
}

/// GPIO assignment for the 4-bit LCD bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LcdPinConfig {
    /// Register select
    pub rs: u8,
    /// Enable strobe
    pub enable: u8,
    /// D4..D7
    pub data: [u8; 4],
}

impl Default for LcdPinConfig {
    fn default() -> Self {
        Self {
            rs: 16,
            enable: 17,
            data: [18, 19, 20, 21],
        }
    }
}

impl LcdPinConfig {
    /// All six pins, RS first
    pub fn all(&self) -> [u8; 6] {
        let [d4, d5, d6, d7] = self.data;
        [self.rs, self.enable, d4, d5, d6, d7]
    }

    /// Check that every pin exists, is free and is used once
    pub fn validate(&self) -> Result<(), ConfigError> {
        let pins = self.all();
        for (i, &pin) in pins.iter().enumerate() {
            if pin > MAX_GPIO {
                return Err(ConfigError::PinOutOfRange(pin));
            }
            if RESERVED_PINS.contains(&pin) || pin == BACKLIGHT_PIN {
                return Err(ConfigError::ReservedPin(pin));
            }
            if pins[..i].contains(&pin) {
                return Err(ConfigError::DuplicatePin(pin));
            }
        }
        Ok(())
    }
}

/// Scroll task settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScrollConfig {
    /// Row the message scrolls on
    pub row: u8,
    /// Passes over each message before fetching the next
    pub passes: u16,
    /// Wait between scroll steps
    pub step_delay_ms: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            row: 1,
            passes: 3,
            step_delay_ms: 500,
        }
    }
}

/// Clock task settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClockConfig {
    /// Redraw period
    pub refresh_ms: u32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self { refresh_ms: 1_000 }
    }
}

/// Startup screen settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StartupConfig {
    /// How long each splash screen and dot frame stays up
    pub step_ms: u32,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self { step_ms: 1_000 }
    }
}

/// Wireless and time settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NetworkConfig {
    /// Network name
    pub ssid: String<MAX_SSID_LEN>,
    /// WPA2 passphrase, empty for an open network
    pub password: String<MAX_PASSWORD_LEN>,
    /// SNTP server host name
    pub ntp_server: String<MAX_HOST_LEN>,
    /// Local time offset from UTC
    pub utc_offset_minutes: i16,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        let mut ntp_server = String::new();
        let _ = ntp_server.push_str("pool.ntp.org");
        Self {
            ssid: String::new(),
            password: String::new(),
            ntp_server,
            // India Standard Time
            utc_offset_minutes: 330,
        }
    }
}

/// Where scroll messages come from
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TextSourceConfig {
    /// Host name or dotted IPv4 address
    pub host: String<MAX_HOST_LEN>,
    /// TCP port
    pub port: u16,
    /// Request path
    pub path: String<MAX_PATH_LEN>,
}

impl Default for TextSourceConfig {
    fn default() -> Self {
        let mut path = String::new();
        let _ = path.push('/');
        Self {
            host: String::new(),
            port: 80,
            path,
        }
    }
}

/// LCD backlight settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BacklightConfig {
    /// Duty cycle out of 255
    pub duty: u8,
    /// PWM frequency
    pub freq_hz: u32,
}

impl Default for BacklightConfig {
    fn default() -> Self {
        Self {
            duty: 100,
            freq_hz: 1_000,
        }
    }
}

/// PWM counter settings for one output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmTiming {
    /// Integer clock divider, 1-255
    pub divider: u8,
    /// Counter wrap value
    pub top: u16,
    /// Compare level for the configured duty
    pub compare: u16,
}

impl BacklightConfig {
    /// Counter settings for a PWM clocked at `sys_hz`
    ///
    /// Picks the smallest divider that keeps the wrap value within 16 bits,
    /// for the finest duty resolution.
    pub fn pwm_timing(&self, sys_hz: u32) -> PwmTiming {
        let freq = u64::from(self.freq_hz.max(1));
        let sys = u64::from(sys_hz);

        let divider = sys.div_ceil(freq * 65_536).clamp(1, 255);
        let period = (sys / (divider * freq)).clamp(1, 65_536);
        let compare = period * u64::from(self.duty) / 255;

        PwmTiming {
            divider: divider as u8,
            top: (period - 1) as u16,
            compare: compare as u16,
        }
    }
}

/// Complete device configuration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DeviceConfig {
    pub lcd: LcdConfig,
    pub pins: LcdPinConfig,
    pub scroll: ScrollConfig,
    pub clock: ClockConfig,
    pub startup: StartupConfig,
    pub network: NetworkConfig,
    pub text_source: TextSourceConfig,
    pub backlight: BacklightConfig,
}

impl DeviceConfig {
    /// Check the whole configuration, reporting the first problem
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !matches!(self.lcd.rows, 1 | 2 | 4) {
            return Err(ConfigError::InvalidRows(self.lcd.rows));
        }
        self.pins.validate()?;
        if self.scroll.step_delay_ms == 0 {
            return Err(ConfigError::ZeroStepDelay);
        }
        if self.clock.refresh_ms == 0 {
            return Err(ConfigError::ZeroRefresh);
        }
        if self.network.ssid.is_empty() {
            return Err(ConfigError::MissingSsid);
        }
        if self.text_source.host.is_empty() {
            return Err(ConfigError::MissingHost);
        }
        if !(-720..=840).contains(&self.network.utc_offset_minutes) {
            return Err(ConfigError::InvalidUtcOffset(
                self.network.utc_offset_minutes,
            ));
        }
        Ok(())
    }
}
