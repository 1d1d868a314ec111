//! Civil date and time fields

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Seconds in one day
pub const SECONDS_PER_DAY: i64 = 86_400;

/// One reading of the wall clock
///
/// Read fresh on every tick and never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DateTimeFields {
    /// Full year, e.g. 2024
    pub year: u16,
    /// Month, 1-12
    pub month: u8,
    /// Day of month, 1-31
    pub day: u8,
    /// Day of week, 0 = Monday .. 6 = Sunday
    pub weekday: u8,
    /// Hour, 0-23
    pub hour: u8,
    /// Minute, 0-59
    pub minute: u8,
    /// Second, 0-59
    pub second: u8,
}

impl DateTimeFields {
    /// Fields for a Unix timestamp in UTC
    pub fn from_unix(unix: u64) -> Self {
        Self::from_unix_with_offset(unix, 0)
    }

    /// Fields for a Unix timestamp shifted by `offset_minutes` from UTC
    ///
    /// Negative offsets are west of Greenwich.
    pub fn from_unix_with_offset(unix: u64, offset_minutes: i16) -> Self {
        let local = unix as i64 + i64::from(offset_minutes) * 60;
        let days = local.div_euclid(SECONDS_PER_DAY);
        let secs = local.rem_euclid(SECONDS_PER_DAY);

        let (year, month, day) = civil_from_days(days);

        Self {
            year: year as u16,
            month,
            day,
            // 1970-01-01 was a Thursday
            weekday: (days + 3).rem_euclid(7) as u8,
            hour: (secs / 3_600) as u8,
            minute: (secs / 60 % 60) as u8,
            second: (secs % 60) as u8,
        }
    }
}

/// Proleptic Gregorian date for a count of days since 1970-01-01
///
/// Howard Hinnant's `civil_from_days`, with eras of 400 years.
fn civil_from_days(days: i64) -> (i64, u8, u8) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u8;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch() {
        let t = DateTimeFields::from_unix(0);
        assert_eq!((t.year, t.month, t.day), (1970, 1, 1));
        assert_eq!((t.hour, t.minute, t.second), (0, 0, 0));
        // Thursday
        assert_eq!(t.weekday, 3);
    }

    #[test]
    fn test_midsummer_2024() {
        let t = DateTimeFields::from_unix(1_718_928_000);
        assert_eq!((t.year, t.month, t.day), (2024, 6, 21));
        // Friday
        assert_eq!(t.weekday, 4);
    }

    #[test]
    fn test_leap_day() {
        let t = DateTimeFields::from_unix(1_709_208_000);
        assert_eq!((t.year, t.month, t.day), (2024, 2, 29));
        assert_eq!(t.hour, 12);

        let t = DateTimeFields::from_unix(951_868_800);
        assert_eq!((t.year, t.month, t.day), (2000, 3, 1));
    }

    #[test]
    fn test_ist_offset() {
        let t = DateTimeFields::from_unix_with_offset(1_718_928_000 + 45, 330);
        assert_eq!((t.hour, t.minute, t.second), (5, 30, 45));
        assert_eq!((t.month, t.day), (6, 21));
    }

    #[test]
    fn test_offset_crosses_midnight_and_year() {
        // 2023-12-31 20:00 UTC is 01:30 on New Year's Day in IST
        let t = DateTimeFields::from_unix_with_offset(1_704_052_800, 330);
        assert_eq!((t.year, t.month, t.day), (2024, 1, 1));
        assert_eq!((t.hour, t.minute), (1, 30));
        // Monday
        assert_eq!(t.weekday, 0);

        // And back again with a western offset
        let t = DateTimeFields::from_unix_with_offset(1_718_928_000, -300);
        assert_eq!((t.month, t.day, t.hour), (6, 20, 19));
        assert_eq!(t.weekday, 3);
    }
}
