//! Application state for the browser
//!
//! Holds only what the terminal needs beyond the query engine: the text
//! field being edited, which pane has focus, per-pane cursors, the active
//! overlay, and transient status messages.

use super::widgets::KeyHint;
use super::window::VirtualWindow;
use std::time::{Duration, Instant};

/// Current mode of the TUI application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    /// Help overlay is visible
    Help,
    /// Details modal for the selected template is visible
    Details,
}

/// Pane that receives navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusPane {
    UseCases,
    Categories,
    #[default]
    Results,
}

impl FocusPane {
    /// Next pane in Tab order
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::UseCases => Self::Categories,
            Self::Categories => Self::Results,
            Self::Results => Self::UseCases,
        }
    }

    /// Previous pane in Tab order
    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::UseCases => Self::Results,
            Self::Categories => Self::UseCases,
            Self::Results => Self::Categories,
        }
    }
}

/// Severity of a status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Success,
    Error,
    Info,
}

/// A status message with timestamp for TTL-based expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub level: MessageLevel,
    pub text: String,
    pub created_at: Instant,
}

impl StatusMessage {
    /// Create a new status message
    #[must_use]
    pub fn new(level: MessageLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
            created_at: Instant::now(),
        }
    }

    #[must_use]
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() > ttl
    }
}

/// Single-line text field with a byte-offset cursor on char boundaries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: String,
    cursor: usize,
}

impl TextField {
    /// Field holding `value` with the cursor at the end
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            cursor: value.len(),
            value,
        }
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn insert(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete the char before the cursor; returns whether anything changed
    pub fn backspace(&mut self) -> bool {
        match self.prev_boundary() {
            Some(prev) => {
                self.value.remove(prev);
                self.cursor = prev;
                true
            }
            None => false,
        }
    }

    /// Delete the char under the cursor; returns whether anything changed
    pub fn delete(&mut self) -> bool {
        if self.cursor < self.value.len() {
            self.value.remove(self.cursor);
            true
        } else {
            false
        }
    }

    /// Delete back to the previous space; returns whether anything changed
    pub fn delete_word(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let start = self.value[..self.cursor]
            .trim_end()
            .rfind(' ')
            .map_or(0, |i| i + 1);
        self.value.drain(start..self.cursor);
        self.cursor = start;
        true
    }

    pub fn left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor = prev;
        }
    }

    pub fn right(&mut self) {
        if let Some(c) = self.value[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    pub fn clear(&mut self) -> bool {
        let changed = !self.value.is_empty();
        self.value.clear();
        self.cursor = 0;
        changed
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.value[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
    }
}

/// Application state for the browser
#[derive(Debug)]
pub struct AppState {
    /// Query being edited
    pub query: TextField,
    pub mode: Mode,
    pub focus: FocusPane,
    /// Cursor and scroll over the result list
    pub results: VirtualWindow,
    /// Cursor over the use-case list; row 0 is "All use cases"
    pub use_case_cursor: usize,
    /// Number of use-case rows, including "All use cases"
    pub use_case_rows: usize,
    pub category_cursor: usize,
    pub category_rows: usize,
    pub messages: Vec<StatusMessage>,
    pub message_ttl: Duration,
    pub should_exit: bool,
    /// Hints shown in the help bar
    pub hints: Vec<KeyHint>,
}

impl AppState {
    /// Create state for a session whose query starts as `query`
    #[must_use]
    pub fn new(query: impl Into<String>, row_height: u16) -> Self {
        Self {
            query: TextField::new(query),
            mode: Mode::Normal,
            focus: FocusPane::Results,
            results: VirtualWindow::new(row_height),
            use_case_cursor: 0,
            use_case_rows: 1,
            category_cursor: 0,
            category_rows: 0,
            messages: Vec::new(),
            message_ttl: Duration::from_secs(4),
            should_exit: false,
            hints: default_hints(),
        }
    }

    /// Update list sizes after the engine recomputes
    pub fn set_list_sizes(&mut self, results: usize, use_cases: usize, categories: usize) {
        self.results.set_len(results);
        self.use_case_rows = use_cases + 1;
        self.use_case_cursor = self.use_case_cursor.min(self.use_case_rows - 1);
        self.category_rows = categories;
        self.category_cursor = self.category_cursor.min(categories.saturating_sub(1));
    }

    /// Move the focused cursor by `delta` rows
    pub fn move_cursor(&mut self, delta: isize) {
        match self.focus {
            FocusPane::Results => {
                if delta < 0 {
                    for _ in 0..delta.unsigned_abs() {
                        self.results.up();
                    }
                } else {
                    for _ in 0..delta.unsigned_abs() {
                        self.results.down();
                    }
                }
            }
            FocusPane::UseCases => {
                self.use_case_cursor = step(self.use_case_cursor, delta, self.use_case_rows);
            }
            FocusPane::Categories => {
                self.category_cursor = step(self.category_cursor, delta, self.category_rows);
            }
        }
    }

    pub fn page_up(&mut self) {
        match self.focus {
            FocusPane::Results => self.results.page_up(),
            _ => self.move_cursor(-10),
        }
    }

    pub fn page_down(&mut self) {
        match self.focus {
            FocusPane::Results => self.results.page_down(),
            _ => self.move_cursor(10),
        }
    }

    pub fn jump_to_start(&mut self) {
        match self.focus {
            FocusPane::Results => self.results.home(),
            FocusPane::UseCases => self.use_case_cursor = 0,
            FocusPane::Categories => self.category_cursor = 0,
        }
    }

    pub fn jump_to_end(&mut self) {
        match self.focus {
            FocusPane::Results => self.results.end(),
            FocusPane::UseCases => self.use_case_cursor = self.use_case_rows.saturating_sub(1),
            FocusPane::Categories => self.category_cursor = self.category_rows.saturating_sub(1),
        }
    }

    /// Add a status message
    pub fn add_message(&mut self, level: MessageLevel, text: impl Into<String>) {
        self.messages.push(StatusMessage::new(level, text));
    }

    /// Most recent non-expired message
    #[must_use]
    pub fn latest_message(&self) -> Option<&StatusMessage> {
        self.messages
            .iter()
            .rev()
            .find(|m| !m.is_expired(self.message_ttl))
    }

    /// Clean up expired messages
    pub fn cleanup_messages(&mut self) {
        let ttl = self.message_ttl;
        self.messages.retain(|m| !m.is_expired(ttl));
    }
}

fn step(cursor: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    cursor.saturating_add_signed(delta).min(len - 1)
}

/// Hints for the bottom bar
#[must_use]
pub fn default_hints() -> Vec<KeyHint> {
    vec![
        KeyHint::new("↑/↓", "navigate"),
        KeyHint::new("Tab", "focus"),
        KeyHint::new("Enter", "open"),
        KeyHint::new("Space", "toggle category"),
        KeyHint::new("^S", "sort"),
        KeyHint::new("^X", "clear"),
        KeyHint::new("^Y", "copy link"),
        KeyHint::new("F1", "help"),
        KeyHint::new("Esc", "quit"),
    ]
}
