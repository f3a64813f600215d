//! Output formatting for CLI display
//!
//! Formatting helpers for the non-interactive commands. Quiet mode strips
//! everything but the essential value so output can be piped.

use crate::model::{Complexity, TemplateRecord, TemplateRef};
use crate::query::pipeline::display_label;
use colored::{ColoredString, Colorize};

/// Color a complexity level (green, yellow, red)
#[must_use]
pub fn colorize_complexity(complexity: Complexity) -> ColoredString {
    match complexity {
        Complexity::Beginner => complexity.as_str().green(),
        Complexity::Intermediate => complexity.as_str().yellow(),
        Complexity::Advanced => complexity.as_str().red(),
    }
}

/// Format setup time as `5 min` or `1h 30m`
#[must_use]
pub fn format_minutes(minutes: f64) -> String {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let total = minutes.max(0.0).round() as u64;
    if total < 60 {
        format!("{total} min")
    } else if total % 60 == 0 {
        format!("{}h", total / 60)
    } else {
        format!("{}h {}m", total / 60, total % 60)
    }
}

/// Format one search result
///
/// Quiet mode prints only the id.
#[must_use]
pub fn template_line(record: &TemplateRecord, quiet: bool) -> String {
    if quiet {
        return record.id.clone();
    }

    let apps = record.app_names();
    let apps = if apps.is_empty() {
        String::new()
    } else {
        format!(" [{}]", apps.cyan())
    };

    format!(
        "  {}{} {} {} {}",
        record.title.bold(),
        apps,
        colorize_complexity(record.complexity),
        format_minutes(record.setup_time_minutes).dimmed(),
        format!("★ {:.0}", record.popularity_score).yellow(),
    )
}

/// Results as a pretty JSON array
///
/// # Errors
///
/// Returns `serde_json::Error` if serialization fails.
pub fn results_json(records: &[TemplateRef]) -> Result<String, serde_json::Error> {
    let plain: Vec<&TemplateRecord> = records.iter().map(AsRef::as_ref).collect();
    serde_json::to_string_pretty(&plain)
}

/// Summary printed after a result list
#[must_use]
pub fn result_summary(shown: usize, matched: usize, total: usize) -> String {
    if shown < matched {
        format!("Showing {shown} of {matched} matching templates ({total} total)")
    } else {
        format!("{matched} of {total} templates match")
    }
}

/// Format a use case or category with its raw value
///
/// Quiet mode prints only the raw value.
#[must_use]
pub fn option_line(value: &str, quiet: bool) -> String {
    if quiet {
        value.to_string()
    } else {
        format!("  {} ({})", display_label(value), value.dimmed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordBuilder;

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(5.0), "5 min");
        assert_eq!(format_minutes(59.6), "1h");
        assert_eq!(format_minutes(90.0), "1h 30m");
        assert_eq!(format_minutes(-3.0), "0 min");
    }

    #[test]
    fn test_quiet_template_line_is_id() {
        let record = RecordBuilder::new("slack-1").title("Slack notification").build();
        assert_eq!(template_line(&record, true), "slack-1");
        assert!(template_line(&record, false).contains("Slack notification"));
    }

    #[test]
    fn test_results_json() {
        let records = vec![RecordBuilder::new("a").build(), RecordBuilder::new("b").build()];
        let json = results_json(&records).unwrap();
        let parsed: Vec<TemplateRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1].id, "b");
    }

    #[test]
    fn test_result_summary() {
        assert_eq!(result_summary(3, 3, 10), "3 of 10 templates match");
        assert_eq!(
            result_summary(2, 5, 10),
            "Showing 2 of 5 matching templates (10 total)"
        );
    }

    #[test]
    fn test_quiet_option_line() {
        assert_eq!(option_line("lead-generation", true), "lead-generation");
        assert!(option_line("lead-generation", false).contains("Lead Generation"));
    }
}
