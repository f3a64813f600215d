//! Ratatui widgets for the catalog browser
//!
//! Every widget is a pure consumer of engine output and [`AppState`]; none
//! of them mutate state while rendering.
//!
//! [`AppState`]: super::AppState

mod category_select;
mod details_modal;
mod help_bar;
mod help_overlay;
mod search_bar;
mod skeleton;
mod status_bar;
mod template_list;
mod use_case_nav;

pub use category_select::CategorySelect;
pub use details_modal::DetailsModal;
pub use help_bar::{HelpBar, KeyHint};
pub use help_overlay::HelpOverlay;
pub use search_bar::SearchBar;
pub use skeleton::Skeleton;
pub use status_bar::StatusBar;
pub use template_list::TemplateList;
pub use use_case_nav::UseCaseNav;

use ratatui::layout::{Constraint, Layout, Rect};

/// Centered area taking the given percentages of `area`
pub(crate) fn centered_rect(width_percent: u16, height_percent: u16, area: Rect) -> Rect {
    let width_percent = width_percent.min(90);
    let height_percent = height_percent.min(90);
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .split(popup_layout[1])[1]
}

/// First row to show so that `cursor` stays inside `height` visible rows
pub(crate) const fn scroll_start(cursor: usize, height: usize) -> usize {
    if height == 0 || cursor < height {
        0
    } else {
        cursor + 1 - height
    }
}

#[cfg(test)]
pub(crate) fn buffer_text(buf: &ratatui::buffer::Buffer) -> String {
    let area = buf.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            out.push_str(buf[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}
