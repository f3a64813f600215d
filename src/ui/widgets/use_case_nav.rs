//! Use-case side navigation

use super::scroll_start;
use crate::query::pipeline::display_label;
use crate::ui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Label of the pass-through row at index 0
pub const ALL_USE_CASES: &str = "All use cases";

/// Vertical list of use cases with an "All use cases" entry first
pub struct UseCaseNav<'a> {
    use_cases: &'a [String],
    /// Currently applied use case (`None` = all)
    active: Option<&'a str>,
    /// Highlighted row, where 0 is "All use cases"
    cursor: usize,
    theme: &'a Theme,
    focused: bool,
}

impl<'a> UseCaseNav<'a> {
    #[must_use]
    pub const fn new(
        use_cases: &'a [String],
        active: Option<&'a str>,
        cursor: usize,
        theme: &'a Theme,
    ) -> Self {
        Self {
            use_cases,
            active,
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

    fn row(&self, index: usize, label: String, is_active: bool) -> Line<'static> {
        let is_cursor = self.focused && index == self.cursor;
        let marker = if is_active { "● " } else { "  " };
        let style = if is_cursor {
            self.theme.selected_style()
        } else if is_active {
            self.theme.checked_style()
        } else {
            self.theme.normal_style()
        };
        Line::from(vec![
            Span::styled(marker, self.theme.checked_style()),
            Span::styled(label, style),
        ])
    }
}

impl Widget for UseCaseNav<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.pane_border_style(self.focused))
            .title(" Use cases ");

        let inner = block.inner(area);
        block.render(area, buf);

        let height = usize::from(inner.height);
        let start = scroll_start(self.cursor, height);

        let lines: Vec<Line> = std::iter::once(self.row(
            0,
            ALL_USE_CASES.to_string(),
            self.active.is_none(),
        ))
        .chain(self.use_cases.iter().enumerate().map(|(i, use_case)| {
            self.row(
                i + 1,
                display_label(use_case),
                self.active == Some(use_case.as_str()),
            )
        }))
        .skip(start)
        .take(height)
        .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}
