//! Virtualized result list
//!
//! Rows have a fixed height of one to three lines. Only the rows inside the
//! [`VirtualWindow`] range are built, so a catalog of thousands of records
//! costs the same to draw as a single page.

use crate::model::TemplateRecord;
use crate::model::TemplateRef;
use crate::output::format_minutes;
use crate::ui::theme::Theme;
use crate::ui::window::VirtualWindow;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Result list widget
pub struct TemplateList<'a> {
    records: &'a [TemplateRef],
    window: &'a VirtualWindow,
    theme: &'a Theme,
    focused: bool,
}

impl<'a> TemplateList<'a> {
    /// Create a new list over `records`, scrolled by `window`
    #[must_use]
    pub const fn new(records: &'a [TemplateRef], window: &'a VirtualWindow, theme: &'a Theme) -> Self {
        Self {
            records,
            window,
            theme,
            focused: true,
        }
    }

    /// Set focus state
    #[must_use]
    pub const fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Lines for one row, truncated to the window's row height
    fn row_lines(&self, record: &TemplateRecord, is_cursor: bool) -> Vec<Line<'a>> {
        let cursor_char = if is_cursor { "> " } else { "  " };
        let title_style = if is_cursor {
            self.theme.selected_style()
        } else {
            self.theme.normal_style()
        };

        let mut lines = vec![Line::from(vec![
            Span::styled(cursor_char, self.theme.cursor_style()),
            Span::styled(record.title.clone(), title_style),
            Span::raw("  "),
            Span::styled(
                record.complexity.as_str(),
                self.theme.complexity_style(record.complexity),
            ),
            Span::raw("  "),
            Span::styled(
                format!("★ {:.0}", record.popularity_score),
                self.theme.popularity_style(),
            ),
        ])];

        if self.window.row_height() >= 2 {
            lines.push(Line::from(vec![
                Span::raw("    "),
                Span::styled(record.app_names(), self.theme.app_style()),
                Span::styled(
                    format!("  · {}", format_minutes(record.setup_time_minutes)),
                    self.theme.dimmed_style(),
                ),
            ]));
        }

        if self.window.row_height() >= 3 {
            lines.push(Line::from(vec![
                Span::raw("    "),
                Span::styled(record.categories.join(", "), self.theme.tag_style()),
            ]));
        }

        lines
    }

    fn render_empty(&self, area: Rect, buf: &mut Buffer) {
        let lines = vec![
            Line::default(),
            Line::styled("No templates found", self.theme.warning_style()),
            Line::styled(
                "Try a different search, or press ctrl-x to clear filters",
                self.theme.dimmed_style(),
            ),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

impl Widget for TemplateList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = match self.window.cursor() {
            Some(cursor) => format!(" Templates ({}/{}) ", cursor + 1, self.records.len()),
            None => " Templates ".to_string(),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.pane_border_style(self.focused))
            .title(title);

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        if self.records.is_empty() {
            self.render_empty(inner, buf);
            return;
        }

        let row_height = self.window.row_height();
        let cursor = self.window.cursor();
        let mut y = inner.y;

        for idx in self.window.range() {
            let Some(record) = self.records.get(idx) else {
                break;
            };
            let is_cursor = cursor == Some(idx);
            let row_area = Rect::new(
                inner.x,
                y,
                inner.width,
                row_height.min(inner.bottom().saturating_sub(y)),
            );
            if row_area.height == 0 {
                break;
            }
            if is_cursor {
                buf.set_style(row_area, self.theme.selected_style());
            }
            for (offset, line) in self.row_lines(record, is_cursor).iter().enumerate() {
                let Ok(offset) = u16::try_from(offset) else {
                    break;
                };
                if offset >= row_area.height {
                    break;
                }
                buf.set_line(row_area.x, row_area.y + offset, line, row_area.width);
            }
            y = y.saturating_add(row_height);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Complexity;
    use crate::testing::RecordBuilder;
    use crate::ui::widgets::buffer_text;

    fn render(records: &[TemplateRef], window: &VirtualWindow, height: u16) -> String {
        let theme = Theme::default();
        let mut buf = Buffer::empty(Rect::new(0, 0, 70, height));
        TemplateList::new(records, window, &theme).render(buf.area, &mut buf);
        buffer_text(&buf)
    }

    fn many(n: usize) -> Vec<TemplateRef> {
        (0..n)
            .map(|i| {
                RecordBuilder::new(&format!("t{i}"))
                    .title(&format!("Row {i:04}"))
                    .apps(&["Slack"])
                    .complexity(Complexity::Advanced)
                    .build()
            })
            .collect()
    }

    #[test]
    fn test_only_visible_rows_render() {
        let records = many(2000);
        let mut window = VirtualWindow::new(2);
        window.set_viewport(10);
        window.set_len(records.len());

        let text = render(&records, &window, 12);
        assert!(text.contains("Row 0000"));
        assert!(text.contains("Row 0004"));
        assert!(!text.contains("Row 0005"));
        assert!(text.contains("(1/2000)"));
        assert!(text.contains("Slack"));
    }

    #[test]
    fn test_scrolled_window_renders_following_rows() {
        let records = many(50);
        let mut window = VirtualWindow::new(1);
        window.set_viewport(5);
        window.set_len(records.len());
        window.end();

        let text = render(&records, &window, 7);
        assert!(text.contains("> Row 0049"));
        assert!(text.contains("Row 0045"));
        assert!(!text.contains("Row 0044"));
    }

    #[test]
    fn test_empty_state() {
        let window = VirtualWindow::new(2);
        let text = render(&[], &window, 8);
        assert!(text.contains("No templates found"));
    }

    #[test]
    fn test_single_line_rows_omit_apps() {
        let records = many(3);
        let mut window = VirtualWindow::new(1);
        window.set_viewport(5);
        window.set_len(records.len());

        let text = render(&records, &window, 7);
        assert!(text.contains("Row 0002"));
        assert!(!text.contains("Slack"));
    }
}
