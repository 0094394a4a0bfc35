//! Terminal-side input state for the picker TUI
//!
//! The selection state lives in [`crate::picker::Picker`]. This module only
//! holds what the terminal front end needs on top of it: the editable query
//! line and click timing for double-click detection.

use std::time::{Duration, Instant};

/// Two clicks on the same row within this window count as a double click
pub const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(400);

/// Editable query line with a byte-offset cursor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryInput {
    text: String,
    cursor: usize,
}

impl QueryInput {
    /// Create an input holding `text` with the cursor at the end
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self { text, cursor }
    }

    /// Current text
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position (byte offset)
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Insert a character at the cursor
    pub fn push(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Remove the character before the cursor
    ///
    /// Returns `true` if the text changed.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let prev_char_boundary = self.text[..self.cursor]
            .char_indices()
            .next_back()
            .map_or(0, |(i, _)| i);
        self.text.remove(prev_char_boundary);
        self.cursor = prev_char_boundary;
        true
    }

    /// Remove the character under the cursor
    ///
    /// Returns `true` if the text changed.
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.text.len() {
            return false;
        }
        self.text.remove(self.cursor);
        true
    }

    /// Move the cursor one character left
    pub fn cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map_or(0, |(i, _)| i);
        }
    }

    /// Move the cursor one character right
    pub fn cursor_right(&mut self) {
        if self.cursor < self.text.len() {
            self.cursor = self.text[self.cursor..]
                .char_indices()
                .nth(1)
                .map_or(self.text.len(), |(i, _)| self.cursor + i);
        }
    }

    /// Move the cursor to the start
    pub const fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    /// Move the cursor to the end
    pub const fn cursor_end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Delete the word before the cursor
    ///
    /// Returns `true` if the text changed.
    pub fn delete_word(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let trimmed = self.text[..self.cursor].trim_end();
        let start = trimmed.rfind(' ').map_or(0, |i| i + 1);
        self.text.drain(start..self.cursor);
        self.cursor = start;
        true
    }

    /// Clear the text
    ///
    /// Returns `true` if the text changed.
    pub fn clear(&mut self) -> bool {
        let changed = !self.text.is_empty();
        self.text.clear();
        self.cursor = 0;
        changed
    }
}

/// Turns single clicks into double clicks when they repeat quickly
#[derive(Debug, Default)]
pub struct ClickTracker {
    last: Option<(String, Instant)>,
}

impl ClickTracker {
    /// Record a click on the row with `id` at time `now`
    ///
    /// Returns `true` if this click completes a double click.
    pub fn click(&mut self, id: &str, now: Instant) -> bool {
        let is_double = self.last.as_ref().is_some_and(|(last_id, at)| {
            last_id == id && now.saturating_duration_since(*at) <= DOUBLE_CLICK_WINDOW
        });

        self.last = if is_double {
            None
        } else {
            Some((id.to_string(), now))
        };
        is_double
    }
}
