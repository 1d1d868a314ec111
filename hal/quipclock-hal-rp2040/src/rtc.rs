//! RTC-backed wall clock

use embassy_rp::peripherals::RTC;
use embassy_rp::rtc::{DateTime, DayOfWeek, Rtc, RtcError};
use embassy_rp::Peri;
use quipclock_core::clock::DateTimeFields;
use quipclock_core::traits::TimeSource;

/// Time the RTC starts from before the first sync (2000-01-01 00:00:00)
pub const FALLBACK_UNIX: u64 = 946_684_800;

/// The on-chip RTC, holding local time
pub struct RtcClock<'d> {
    rtc: Rtc<'d, RTC>,
}

impl<'d> RtcClock<'d> {
    /// Start the RTC at [`FALLBACK_UNIX`]
    pub fn new(rtc: Peri<'d, RTC>) -> Result<Self, RtcError> {
        let mut clock = Self { rtc: Rtc::new(rtc) };
        clock.set(&DateTimeFields::from_unix(FALLBACK_UNIX))?;
        Ok(clock)
    }

    /// Load local time
    pub fn set(&mut self, t: &DateTimeFields) -> Result<(), RtcError> {
        self.rtc.set_datetime(to_rtc(t))
    }

    /// Load a Unix timestamp shifted by `offset_minutes`
    pub fn set_unix(&mut self, unix: u64, offset_minutes: i16) -> Result<(), RtcError> {
        self.set(&DateTimeFields::from_unix_with_offset(unix, offset_minutes))
    }
}

impl TimeSource for RtcClock<'_> {
    fn now(&mut self) -> DateTimeFields {
        // Only fails while the RTC is not yet running
        self.rtc.now().map(|t| from_rtc(&t)).unwrap_or_default()
    }
}

fn to_rtc(t: &DateTimeFields) -> DateTime {
    let day_of_week = match t.weekday {
        0 => DayOfWeek::Monday,
        1 => DayOfWeek::Tuesday,
        2 => DayOfWeek::Wednesday,
        3 => DayOfWeek::Thursday,
        4 => DayOfWeek::Friday,
        5 => DayOfWeek::Saturday,
        _ => DayOfWeek::Sunday,
    };
    DateTime {
        year: t.year,
        month: t.month,
        day: t.day,
        day_of_week,
        hour: t.hour,
        minute: t.minute,
        second: t.second,
    }
}

fn from_rtc(t: &DateTime) -> DateTimeFields {
    // The RTC counts Sunday as 0
    let weekday = (t.day_of_week as u8 + 6) % 7;
    DateTimeFields {
        year: t.year,
        month: t.month,
        day: t.day,
        weekday,
        hour: t.hour,
        minute: t.minute,
        second: t.second,
    }
}
