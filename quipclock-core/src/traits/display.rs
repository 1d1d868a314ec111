//! Character display trait

/// Visible columns per row
pub const LCD_COLS: u8 = 16;

/// One full row of spaces
pub const BLANK_ROW: &str = "                ";

/// Clamp a requested row into the visible range
///
/// Rows past the last one land on the last row. A zero-row display is
/// treated as having one row.
pub fn clamp_row(row: u8, rows: u8) -> u8 {
    row.min(rows.saturating_sub(1))
}

/// Trait for character LCDs with a 16-column window
///
/// Every positioned write goes through [`set_cursor`](Self::set_cursor), which
/// applies [`clamp_row`] with the display's row count.
pub trait CharacterDisplay {
    /// Number of visible rows
    fn rows(&self) -> u8;

    /// Clear the screen and home the cursor
    fn clear(&mut self);

    /// Move the cursor to `col` on `row`
    fn set_cursor(&mut self, col: u8, row: u8);

    /// Write one character at the cursor and advance it
    fn write_char(&mut self, c: char);

    /// Write every character of `text` in order
    ///
    /// No wrapping or truncation happens here.
    fn write_string(&mut self, text: &str) {
        for c in text.chars() {
            self.write_char(c);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_blank_row_width() {
        assert_eq!(BLANK_ROW.len(), LCD_COLS as usize);
        assert!(BLANK_ROW.chars().all(|c| c == ' '));
    }

    #[test]
    fn test_clamp_row() {
        assert_eq!(clamp_row(0, 2), 0);
        assert_eq!(clamp_row(1, 2), 1);
        assert_eq!(clamp_row(7, 2), 1);
        assert_eq!(clamp_row(3, 4), 3);
        assert_eq!(clamp_row(5, 0), 0);
    }

    proptest! {
        #[test]
        fn test_clamp_row_in_range(row in any::<u8>(), rows in 1u8..=4) {
            let clamped = clamp_row(row, rows);
            prop_assert!(clamped < rows);
            if row < rows {
                prop_assert_eq!(clamped, row);
            }
        }
    }
}
