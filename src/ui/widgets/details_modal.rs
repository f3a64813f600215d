//! Details modal widget for displaying one template

use super::centered_rect;
use crate::model::TemplateRecord;
use crate::output::format_minutes;
use crate::query::pipeline::display_label;
use crate::ui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

/// Details modal widget that displays every field of a record
pub struct DetailsModal<'a> {
    record: &'a TemplateRecord,
    theme: &'a Theme,
}

impl<'a> DetailsModal<'a> {
    /// Create a new details modal
    #[must_use]
    pub const fn new(record: &'a TemplateRecord, theme: &'a Theme) -> Self {
        Self { record, theme }
    }

    fn field(&self, label: &'static str, value: Span<'static>) -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("{label:<12}"), self.theme.dimmed_style()),
            value,
        ])
    }

    fn list_or_none(&self, values: &[String], label: fn(&str) -> String) -> Span<'static> {
        if values.is_empty() {
            Span::styled(
                "(none)",
                self.theme.dimmed_style().add_modifier(Modifier::ITALIC),
            )
        } else {
            let joined = values
                .iter()
                .map(|v| label(v))
                .collect::<Vec<_>>()
                .join(", ");
            Span::styled(joined, self.theme.tag_style())
        }
    }

    /// Build content lines for the modal
    fn build_content(&self) -> Vec<Line<'static>> {
        let record = self.record;
        let mut lines = vec![
            Line::styled(
                record.title.clone(),
                self.theme.normal_style().add_modifier(Modifier::BOLD),
            ),
            Line::styled(record.id.clone(), self.theme.dimmed_style()),
            Line::default(),
        ];

        if !record.description.is_empty() {
            lines.push(Line::from(record.description.clone()));
            lines.push(Line::default());
        }

        let apps = if record.apps.is_empty() {
            Span::styled(
                "(none)",
                self.theme.dimmed_style().add_modifier(Modifier::ITALIC),
            )
        } else {
            Span::styled(record.app_names(), self.theme.app_style())
        };
        lines.push(self.field("Apps:", apps));
        lines.push(self.field(
            "Categories:",
            self.list_or_none(&record.categories, str::to_string),
        ));
        lines.push(self.field("Use cases:", self.list_or_none(&record.use_cases, display_label)));
        lines.push(Line::default());

        lines.push(self.field(
            "Complexity:",
            Span::styled(
                record.complexity.as_str(),
                self.theme.complexity_style(record.complexity),
            ),
        ));
        lines.push(self.field(
            "Popularity:",
            Span::styled(
                format!("★ {:.0}", record.popularity_score),
                self.theme.popularity_style(),
            ),
        ));
        lines.push(self.field(
            "Setup time:",
            Span::raw(format_minutes(record.setup_time_minutes)),
        ));
        let created = record.created_at.map_or_else(
            || "Unknown".to_string(),
            |dt| dt.format("%Y-%m-%d").to_string(),
        );
        lines.push(self.field("Created:", Span::raw(created)));

        lines.push(Line::default());
        lines.push(Line::styled(
            "ctrl-y copy link · any other key closes",
            self.theme.dimmed_style().add_modifier(Modifier::ITALIC),
        ));

        lines
    }
}

impl Widget for DetailsModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup_area = centered_rect(70, 70, area);

        // Clear the background
        Clear.render(popup_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.cursor_style())
            .title(" Template Details ")
            .title_alignment(Alignment::Center);

        Paragraph::new(self.build_content())
            .block(block)
            .wrap(Wrap { trim: false })
            .render(popup_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Complexity;
    use crate::testing::RecordBuilder;
    use crate::ui::widgets::buffer_text;

    #[test]
    fn test_renders_all_fields() {
        let mut record = RecordBuilder::new("crm-sync")
            .title("CRM sync")
            .description("Keep contacts aligned")
            .apps(&["HubSpot", "Gmail"])
            .categories(&["crm"])
            .use_cases(&["lead-gen"])
            .popularity(80.0)
            .setup_minutes(90.0)
            .complexity(Complexity::Advanced)
            .into_record();
        record.created_at = "2024-03-01T12:00:00Z".parse().ok();

        let theme = Theme::default();
        let mut buf = Buffer::empty(Rect::new(0, 0, 120, 40));
        DetailsModal::new(&record, &theme).render(buf.area, &mut buf);
        let text = buffer_text(&buf);

        assert!(text.contains("CRM sync"));
        assert!(text.contains("Keep contacts aligned"));
        assert!(text.contains("HubSpot, Gmail"));
        assert!(text.contains("crm"));
        assert!(text.contains("Lead Gen"));
        assert!(text.contains("advanced"));
        assert!(text.contains("★ 80"));
        assert!(text.contains("1h 30m"));
        assert!(text.contains("2024-03-01"));
    }

    #[test]
    fn test_missing_collections_show_none() {
        let record = RecordBuilder::new("bare").into_record();
        let theme = Theme::default();
        let mut buf = Buffer::empty(Rect::new(0, 0, 100, 40));
        DetailsModal::new(&record, &theme).render(buf.area, &mut buf);
        let text = buffer_text(&buf);
        assert!(text.contains("(none)"));
        assert!(text.contains("Unknown"));
    }
}
