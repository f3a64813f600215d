//! Fixed-row-height virtual scrolling
//!
//! A [`VirtualWindow`] tracks a cursor over `len` rows and the first row
//! shown in a viewport of known height. Only rows in [`VirtualWindow::range`]
//! are ever materialized, and the range always contains the cursor.

use std::ops::Range;

/// Cursor and scroll position over a list of uniform rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualWindow {
    len: usize,
    cursor: usize,
    offset: usize,
    /// Lines available in the viewport
    viewport_lines: u16,
    /// Lines per row
    row_height: u16,
}

impl VirtualWindow {
    /// Create an empty window with the given row height (at least one line)
    #[must_use]
    pub fn new(row_height: u16) -> Self {
        Self {
            len: 0,
            cursor: 0,
            offset: 0,
            viewport_lines: 20,
            row_height: row_height.max(1),
        }
    }

    #[must_use]
    pub const fn row_height(&self) -> u16 {
        self.row_height
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Index of the highlighted row, if there are any rows
    #[must_use]
    pub const fn cursor(&self) -> Option<usize> {
        if self.len == 0 { None } else { Some(self.cursor) }
    }

    /// How many whole rows fit in the viewport (at least one)
    #[must_use]
    pub fn rows_per_page(&self) -> usize {
        usize::from((self.viewport_lines / self.row_height).max(1))
    }

    /// Rows to render, in list order
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        let end = (self.offset + self.rows_per_page()).min(self.len);
        self.offset.min(end)..end
    }

    /// Update the viewport height in lines
    pub fn set_viewport(&mut self, lines: u16) {
        self.viewport_lines = lines;
        self.follow_cursor();
    }

    /// Update the row count, keeping the cursor in bounds
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        self.cursor = self.cursor.min(len.saturating_sub(1));
        self.offset = self.offset.min(len.saturating_sub(self.rows_per_page()));
        self.follow_cursor();
    }

    /// Jump back to the first row
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.offset = 0;
    }

    pub fn up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
        self.follow_cursor();
    }

    pub fn down(&mut self) {
        if self.cursor + 1 < self.len {
            self.cursor += 1;
        }
        self.follow_cursor();
    }

    pub fn page_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(self.rows_per_page());
        self.follow_cursor();
    }

    pub fn page_down(&mut self) {
        self.cursor = (self.cursor + self.rows_per_page()).min(self.len.saturating_sub(1));
        self.follow_cursor();
    }

    pub fn home(&mut self) {
        self.cursor = 0;
        self.follow_cursor();
    }

    pub fn end(&mut self) {
        self.cursor = self.len.saturating_sub(1);
        self.follow_cursor();
    }

    fn follow_cursor(&mut self) {
        let page = self.rows_per_page();
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + page {
            self.offset = self.cursor + 1 - page;
        }
    }
}
