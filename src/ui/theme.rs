//! Color theme for the browser

use crate::model::Complexity;
use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color for the highlighted row
    pub selection_bg: Color,
    /// Foreground color for the highlighted row
    pub selection_fg: Color,
    /// Color for the cursor indicator and focused borders
    pub cursor: Color,
    pub success: Color,
    pub error: Color,
    pub warning: Color,
    pub info: Color,
    pub border: Color,
    /// Color for dimmed/inactive text
    pub dimmed: Color,
    /// Color for app names
    pub app: Color,
    /// Color for category and use-case tags
    pub tag: Color,
    /// Color for popularity stars
    pub popularity: Color,
    /// Color for loading placeholders
    pub skeleton: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create a dark theme (default)
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            selection_bg: Color::Blue,
            selection_fg: Color::White,
            cursor: Color::Cyan,
            success: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,
            info: Color::Cyan,
            border: Color::DarkGray,
            dimmed: Color::DarkGray,
            app: Color::Cyan,
            tag: Color::Magenta,
            popularity: Color::Yellow,
            skeleton: Color::DarkGray,
        }
    }

    /// Style for the highlighted row
    #[must_use]
    pub fn selected_style(&self) -> Style {
        Style::default()
            .bg(self.selection_bg)
            .fg(self.selection_fg)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn normal_style(&self) -> Style {
        Style::default()
    }

    /// Style for the cursor indicator (>)
    #[must_use]
    pub fn cursor_style(&self) -> Style {
        Style::default()
            .fg(self.cursor)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for checked categories and the active use case
    #[must_use]
    pub fn checked_style(&self) -> Style {
        Style::default()
            .fg(self.success)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success)
    }

    #[must_use]
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    #[must_use]
    pub fn warning_style(&self) -> Style {
        Style::default().fg(self.warning)
    }

    #[must_use]
    pub fn info_style(&self) -> Style {
        Style::default().fg(self.info)
    }

    /// Border style, brighter when the pane has focus
    #[must_use]
    pub fn pane_border_style(&self, focused: bool) -> Style {
        if focused {
            self.cursor_style()
        } else {
            Style::default().fg(self.border)
        }
    }

    #[must_use]
    pub fn dimmed_style(&self) -> Style {
        Style::default().fg(self.dimmed)
    }

    #[must_use]
    pub fn app_style(&self) -> Style {
        Style::default().fg(self.app)
    }

    #[must_use]
    pub fn tag_style(&self) -> Style {
        Style::default().fg(self.tag)
    }

    #[must_use]
    pub fn popularity_style(&self) -> Style {
        Style::default().fg(self.popularity)
    }

    #[must_use]
    pub fn skeleton_style(&self) -> Style {
        Style::default()
            .fg(self.skeleton)
            .add_modifier(Modifier::DIM)
    }

    /// Green, yellow, or red by difficulty
    #[must_use]
    pub fn complexity_style(&self, complexity: Complexity) -> Style {
        match complexity {
            Complexity::Beginner => Style::default().fg(self.success),
            Complexity::Intermediate => Style::default().fg(self.warning),
            Complexity::Advanced => Style::default().fg(self.error),
        }
    }
}
