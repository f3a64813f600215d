//! Search bar widget for query input

use crate::ui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Search bar that displays the query with cursor and the match count
pub struct SearchBar<'a> {
    /// Current query text
    query: &'a str,
    /// Cursor position in the query (byte offset)
    cursor: usize,
    theme: &'a Theme,
    /// `(shown, total)` counts for the title
    counts: Option<(usize, usize)>,
    /// A keystroke has not been committed yet
    pending: bool,
}

impl<'a> SearchBar<'a> {
    /// Create a new search bar widget
    #[must_use]
    pub const fn new(query: &'a str, cursor: usize, theme: &'a Theme) -> Self {
        Self {
            query,
            cursor,
            theme,
            counts: None,
            pending: false,
        }
    }

    /// Show `shown of total` in the title
    #[must_use]
    pub const fn counts(mut self, shown: usize, total: usize) -> Self {
        self.counts = Some((shown, total));
        self
    }

    /// Mark the query as waiting for its debounce window
    #[must_use]
    pub const fn pending(mut self, pending: bool) -> Self {
        self.pending = pending;
        self
    }

    fn title(&self) -> String {
        match self.counts {
            Some((shown, total)) if shown == total => format!(" Search ({total} templates) "),
            Some((shown, total)) => format!(" Search ({shown} of {total}) "),
            None => " Search ".to_string(),
        }
    }
}

impl Widget for SearchBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.cursor_style())
            .title(self.title());

        let inner = block.inner(area);
        block.render(area, buf);

        let cursor_span = Span::styled("│", Style::default().add_modifier(Modifier::SLOW_BLINK));
        let mut spans = vec![Span::styled(">", self.theme.dimmed_style()), Span::raw(" ")];

        if self.query.is_empty() {
            spans.push(cursor_span);
            spans.push(Span::styled(
                "search templates, apps, categories",
                self.theme.dimmed_style(),
            ));
        } else {
            let split = self.cursor.min(self.query.len());
            let (before, after) = self.query.split_at(split);
            spans.push(Span::raw(before));
            spans.push(cursor_span);
            spans.push(Span::raw(after));
        }

        if self.pending {
            spans.push(Span::styled(" …", self.theme.dimmed_style()));
        }

        Paragraph::new(Line::from(spans)).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::widgets::buffer_text;

    fn render(bar: SearchBar<'_>) -> String {
        let mut buf = Buffer::empty(Rect::new(0, 0, 60, 3));
        bar.render(buf.area, &mut buf);
        buffer_text(&buf)
    }

    #[test]
    fn test_title_shows_counts() {
        let theme = Theme::default();
        let text = render(SearchBar::new("slack", 5, &theme).counts(3, 16));
        assert!(text.contains("Search (3 of 16)"));
        assert!(text.contains("slack│"));

        let text = render(SearchBar::new("", 0, &theme).counts(16, 16));
        assert!(text.contains("16 templates"));
    }

    #[test]
    fn test_pending_indicator() {
        let theme = Theme::default();
        let text = render(SearchBar::new("sl", 2, &theme).pending(true));
        assert!(text.contains('…'));
    }
}
