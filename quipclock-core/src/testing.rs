//! Test doubles shared by the unit tests

use std::collections::VecDeque;
use std::string::String;
use std::vec::Vec;

use crate::text::{message, Message};
use crate::traits::{clamp_row, CharacterDisplay, TextSource, LCD_COLS};

/// One observed display call, with consecutive characters merged
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Clear,
    Cursor(u8, u8),
    Text(String),
}

/// In-memory display that keeps a call log and the visible cells
pub struct RecordingDisplay {
    rows: u8,
    cells: [[char; LCD_COLS as usize]; 4],
    col: u8,
    row: u8,
    pub ops: Vec<Op>,
}

impl RecordingDisplay {
    pub fn new(rows: u8) -> Self {
        Self {
            rows,
            cells: [[' '; LCD_COLS as usize]; 4],
            col: 0,
            row: 0,
            ops: Vec::new(),
        }
    }

    /// Visible text of one row
    pub fn row_text(&self, row: usize) -> String {
        self.cells[row].iter().collect()
    }

    /// Every text write, in order
    pub fn texts(&self) -> Vec<String> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text(t) => Some(t.clone()),
                _ => None,
            })
            .collect()
    }
}

impl CharacterDisplay for RecordingDisplay {
    fn rows(&self) -> u8 {
        self.rows
    }

    fn clear(&mut self) {
        self.cells = [[' '; LCD_COLS as usize]; 4];
        self.col = 0;
        self.row = 0;
        self.ops.push(Op::Clear);
    }

    fn set_cursor(&mut self, col: u8, row: u8) {
        self.col = col;
        self.row = clamp_row(row, self.rows);
        self.ops.push(Op::Cursor(col, self.row));
    }

    fn write_char(&mut self, c: char) {
        if self.col < LCD_COLS {
            self.cells[self.row as usize][self.col as usize] = c;
        }
        self.col = self.col.saturating_add(1);

        if let Some(Op::Text(t)) = self.ops.last_mut() {
            t.push(c);
        } else {
            self.ops.push(Op::Text(String::from(c)));
        }
    }
}

/// Text source that replays a fixed list of outcomes, repeating the last
pub struct ScriptedSource {
    replies: VecDeque<Result<&'static str, &'static str>>,
    pub fetches: usize,
}

impl ScriptedSource {
    pub fn new(replies: &[Result<&'static str, &'static str>]) -> Self {
        Self {
            replies: replies.iter().copied().collect(),
            fetches: 0,
        }
    }
}

impl TextSource for ScriptedSource {
    type Error = &'static str;

    async fn fetch(&mut self) -> Result<Message, &'static str> {
        self.fetches += 1;
        let reply = if self.replies.len() > 1 {
            self.replies.pop_front()
        } else {
            self.replies.front().copied()
        };
        reply.unwrap_or(Err("no script")).map(message)
    }
}
