//! Category multi-select

use super::scroll_start;
use crate::ui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use std::collections::BTreeSet;

/// Checkbox list of the categories available in the current partition
pub struct CategorySelect<'a> {
    categories: &'a [String],
    selected: &'a BTreeSet<String>,
    cursor: usize,
    theme: &'a Theme,
    focused: bool,
}

impl<'a> CategorySelect<'a> {
    #[must_use]
    pub const fn new(
        categories: &'a [String],
        selected: &'a BTreeSet<String>,
        cursor: usize,
        theme: &'a Theme,
    ) -> Self {
        Self {
            categories,
            selected,
            cursor,
            theme,
            focused: false,
        }
    }

    /// Set focus state
    #[must_use]
    pub const fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for CategorySelect<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.selected.is_empty() {
            " Categories ".to_string()
        } else {
            format!(" Categories ({}) ", self.selected.len())
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.pane_border_style(self.focused))
            .title(title);

        let inner = block.inner(area);
        block.render(area, buf);

        if self.categories.is_empty() {
            Paragraph::new(Line::styled("(none)", self.theme.dimmed_style())).render(inner, buf);
            return;
        }

        let height = usize::from(inner.height);
        let start = scroll_start(self.cursor, height);

        let lines: Vec<Line> = self
            .categories
            .iter()
            .enumerate()
            .skip(start)
            .take(height)
            .map(|(i, category)| {
                let checked = self.selected.contains(category);
                let is_cursor = self.focused && i == self.cursor;
                let checkbox = if checked { "[x] " } else { "[ ] " };
                let style = if is_cursor {
                    self.theme.selected_style()
                } else if checked {
                    self.theme.checked_style()
                } else {
                    self.theme.normal_style()
                };
                Line::from(vec![
                    Span::styled(checkbox, self.theme.checked_style()),
                    Span::styled(category.as_str(), style),
                ])
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}
