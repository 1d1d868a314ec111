//! Clock line rendering

use core::fmt::Write;

use heapless::String;

use super::DateTimeFields;

/// Length of a rendered clock line
pub const CLOCK_LINE_LEN: usize = 14;

/// Rendered clock line, always shorter than one LCD row
pub type ClockLine = String<16>;

/// Render `HH:MM:SS DD-MM`
///
/// Only hour, minute, second, day and month are shown.
pub fn format_clock(t: &DateTimeFields) -> ClockLine {
    let mut line = ClockLine::new();
    // Two-digit fields always fit; oversized values are cut off at capacity.
    let _ = write!(
        line,
        "{:02}:{:02}:{:02} {:02}-{:02}",
        t.hour, t.minute, t.second, t.day, t.month
    );
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(hour: u8, minute: u8, second: u8, day: u8, month: u8) -> DateTimeFields {
        DateTimeFields {
            year: 2024,
            month,
            day,
            weekday: 0,
            hour,
            minute,
            second,
        }
    }

    #[test]
    fn test_zero_padding() {
        let line = format_clock(&fields(9, 5, 3, 21, 6));
        assert_eq!(line.as_str(), "09:05:03 21-06");
        assert_eq!(line.len(), CLOCK_LINE_LEN);
    }

    #[test]
    fn test_midnight_new_year() {
        let line = format_clock(&fields(0, 0, 0, 1, 1));
        assert_eq!(line.as_str(), "00:00:00 01-01");
    }

    #[test]
    fn test_year_and_weekday_not_shown() {
        let mut t = fields(23, 59, 59, 31, 12);
        let before = format_clock(&t);
        t.year = 1999;
        t.weekday = 6;
        assert_eq!(format_clock(&t), before);
    }
}
