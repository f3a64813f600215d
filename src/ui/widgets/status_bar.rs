//! Status bar widget
//!
//! Left side shows the latest status message, or the share string when no
//! message is live. Right side shows the sort order, active filter count,
//! and the clear-all hint when there is something to clear.

use crate::query::SortKey;
use crate::ui::state::{MessageLevel, StatusMessage};
use crate::ui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct StatusBar<'a> {
    theme: &'a Theme,
    sort_key: SortKey,
    filter_count: usize,
    share: &'a str,
    can_clear: bool,
    message: Option<&'a StatusMessage>,
}

impl<'a> StatusBar<'a> {
    #[must_use]
    pub const fn new(theme: &'a Theme, sort_key: SortKey, share: &'a str) -> Self {
        Self {
            theme,
            sort_key,
            filter_count: 0,
            share,
            can_clear: false,
            message: None,
        }
    }

    /// Number of active use-case and category filters
    #[must_use]
    pub const fn filters(mut self, count: usize) -> Self {
        self.filter_count = count;
        self
    }

    #[must_use]
    pub const fn can_clear(mut self, can_clear: bool) -> Self {
        self.can_clear = can_clear;
        self
    }

    #[must_use]
    pub const fn message(mut self, message: Option<&'a StatusMessage>) -> Self {
        self.message = message;
        self
    }

    fn style_for_level(&self, level: MessageLevel) -> Style {
        match level {
            MessageLevel::Success => self.theme.success_style(),
            MessageLevel::Error => self.theme.error_style(),
            MessageLevel::Info => self.theme.info_style(),
        }
    }

    const fn prefix_for_level(level: MessageLevel) -> &'static str {
        match level {
            MessageLevel::Success => "✓ ",
            MessageLevel::Error => "✗ ",
            MessageLevel::Info => "ℹ ",
        }
    }

    fn left_line(&self) -> Line<'a> {
        if let Some(msg) = self.message {
            let style = self.style_for_level(msg.level);
            return Line::from(vec![
                Span::styled(Self::prefix_for_level(msg.level), style),
                Span::styled(msg.text.as_str(), style),
            ]);
        }
        let share = if self.share.is_empty() { "" } else { "?" };
        Line::from(vec![
            Span::styled("link: ", self.theme.dimmed_style()),
            Span::styled(format!("{share}{}", self.share), self.theme.info_style()),
        ])
    }

    fn right_line(&self) -> Line<'a> {
        let mut spans = vec![
            Span::styled("sort: ", self.theme.dimmed_style()),
            Span::styled(self.sort_key.label(), self.theme.normal_style()),
        ];
        if self.filter_count > 0 {
            spans.push(Span::styled(
                format!("  filters: {}", self.filter_count),
                self.theme.tag_style(),
            ));
        }
        if self.can_clear {
            spans.push(Span::styled("  ctrl-x clear all", self.theme.warning_style()));
        }
        Line::from(spans)
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.pane_border_style(false))
            .title(" Status ");

        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(inner);

        Paragraph::new(self.left_line()).render(chunks[0], buf);
        Paragraph::new(self.right_line())
            .alignment(Alignment::Right)
            .render(chunks[1], buf);
    }
}
