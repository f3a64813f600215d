//! Loading placeholder drawn before the dataset is available

use crate::ui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Placeholder bars in the same layout as the browser
pub struct Skeleton<'a> {
    theme: &'a Theme,
    row_height: u16,
}

impl<'a> Skeleton<'a> {
    #[must_use]
    pub const fn new(theme: &'a Theme, row_height: u16) -> Self {
        Self { theme, row_height }
    }

    fn bars(&self, height: u16, width: u16) -> Vec<Line<'static>> {
        let step = self.row_height.max(1);
        (0..height)
            .map(|line| {
                if line % step != 0 {
                    return Line::default();
                }
                let len = usize::from(width.saturating_sub(4)) * (3 + usize::from(line / step) % 3) / 5;
                Line::styled(format!("  {}", "░".repeat(len)), self.theme.skeleton_style())
            })
            .collect()
    }
}

impl Widget for Skeleton<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search bar
                Constraint::Min(5),    // Content
                Constraint::Length(3), // Status bar
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        let dim = self.theme.pane_border_style(false);

        Block::default()
            .borders(Borders::ALL)
            .border_style(dim)
            .title(" Search ")
            .render(layout[0], buf);

        let content = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(25), Constraint::Percentage(75)])
            .split(layout[1]);

        let side = Block::default()
            .borders(Borders::ALL)
            .border_style(dim)
            .title(" Use cases ");
        let side_inner = side.inner(content[0]);
        side.render(content[0], buf);
        Paragraph::new(self.bars(side_inner.height, side_inner.width)).render(side_inner, buf);

        let list = Block::default()
            .borders(Borders::ALL)
            .border_style(dim)
            .title(" Loading templates… ");
        let list_inner = list.inner(content[1]);
        list.render(content[1], buf);
        Paragraph::new(self.bars(list_inner.height, list_inner.width)).render(list_inner, buf);

        Block::default()
            .borders(Borders::ALL)
            .border_style(dim)
            .title(" Status ")
            .render(layout[2], buf);
    }
}
