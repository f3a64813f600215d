//! Testing utilities for templar
//!
//! Builders for template records so tests only spell out the fields they
//! care about.
//!
//! Only available when compiled with `cfg(test)`.

use crate::model::{AppRef, Complexity, RecordSet, TemplateRecord, TemplateRef};
use std::sync::Arc;

/// Fluent builder for a [`TemplateRecord`]
///
/// The title defaults to `"Template {id}"`.
pub struct RecordBuilder {
    record: TemplateRecord,
}

impl RecordBuilder {
    /// Create a new builder for the record with the given id
    pub fn new(id: &str) -> Self {
        Self {
            record: TemplateRecord::new(id, format!("Template {id}")),
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.record.title = title.to_string();
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.record.description = description.to_string();
        self
    }

    /// Apps by name; slugs are the lowercased names
    pub fn apps(mut self, names: &[&str]) -> Self {
        self.record.apps = names
            .iter()
            .map(|name| AppRef::new(*name, name.to_lowercase()))
            .collect();
        self
    }

    pub fn categories(mut self, categories: &[&str]) -> Self {
        self.record.categories = categories.iter().map(ToString::to_string).collect();
        self
    }

    pub fn use_cases(mut self, use_cases: &[&str]) -> Self {
        self.record.use_cases = use_cases.iter().map(ToString::to_string).collect();
        self
    }

    pub const fn popularity(mut self, score: f64) -> Self {
        self.record.popularity_score = score;
        self
    }

    pub const fn setup_minutes(mut self, minutes: f64) -> Self {
        self.record.setup_time_minutes = minutes;
        self
    }

    pub const fn complexity(mut self, complexity: Complexity) -> Self {
        self.record.complexity = complexity;
        self
    }

    /// Finish as a shared handle
    pub fn build(self) -> TemplateRef {
        Arc::new(self.record)
    }

    /// Finish as an owned record
    pub fn into_record(self) -> TemplateRecord {
        self.record
    }
}

/// Collect built records into a shared record set
pub fn record_set(records: Vec<TemplateRef>) -> RecordSet {
    records.into()
}

/// A small catalog covering every field the pipeline looks at
///
/// | id | title                  | popularity | use cases            | categories          |
/// |----|------------------------|-----------:|----------------------|---------------------|
/// | 1  | Slack notification     | 90         | sales, marketing     | communication       |
/// | 2  | Email digest           | 70         | marketing            | email, productivity |
/// | 3  | CRM sync               | 80         | sales                | crm, email          |
/// | 4  | Invoice reminders      | 40         | finance              | email, finance      |
/// | 5  | Standup bot            | 60         | (none)               | communication       |
pub fn sample_catalog() -> RecordSet {
    record_set(vec![
        RecordBuilder::new("1")
            .title("Slack notification")
            .apps(&["Slack"])
            .popularity(90.0)
            .setup_minutes(5.0)
            .complexity(Complexity::Beginner)
            .use_cases(&["sales", "marketing"])
            .categories(&["communication"])
            .build(),
        RecordBuilder::new("2")
            .title("Email digest")
            .description("Send a weekly email summary")
            .apps(&["Gmail"])
            .popularity(70.0)
            .setup_minutes(15.0)
            .complexity(Complexity::Intermediate)
            .use_cases(&["marketing"])
            .categories(&["email", "productivity"])
            .build(),
        RecordBuilder::new("3")
            .title("CRM sync")
            .description("Mirror contacts and email threads into the CRM")
            .apps(&["HubSpot", "Gmail"])
            .popularity(80.0)
            .setup_minutes(30.0)
            .complexity(Complexity::Advanced)
            .use_cases(&["sales"])
            .categories(&["crm", "email"])
            .build(),
        RecordBuilder::new("4")
            .title("Invoice reminders")
            .description("Email customers about overdue invoices")
            .apps(&["Stripe"])
            .popularity(40.0)
            .setup_minutes(10.0)
            .complexity(Complexity::Beginner)
            .use_cases(&["finance"])
            .categories(&["email", "finance"])
            .build(),
        RecordBuilder::new("5")
            .title("Standup bot")
            .apps(&["Slack"])
            .popularity(60.0)
            .setup_minutes(20.0)
            .complexity(Complexity::Intermediate)
            .categories(&["communication"])
            .build(),
    ])
}
