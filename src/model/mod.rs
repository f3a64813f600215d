//! Template record types
//!
//! A `TemplateRecord` is an immutable catalog entry. Records are loaded once
//! by the dataset loader and shared as [`TemplateRef`] handles, so every
//! stage of the query pipeline can pass them around without copying.
//!
//! Collections that are absent or `null` in the source data (`apps`,
//! `categories`, `use_cases`) deserialize as empty.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Shared handle to an immutable record
pub type TemplateRef = Arc<TemplateRecord>;

/// Shared, read-only sequence of records
///
/// Identity of the allocation (`Arc::ptr_eq`) is what the search index uses
/// to decide whether it must be rebuilt.
pub type RecordSet = Arc<[TemplateRef]>;

/// An app connected by a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppRef {
    /// Display name (searchable)
    pub name: String,
    /// Stable machine identifier
    #[serde(default)]
    pub slug: String,
    /// Icon location
    #[serde(default)]
    pub icon_url: String,
    /// Brand color (e.g. `#4A154B`)
    #[serde(default)]
    pub color: String,
}

impl AppRef {
    /// Create an app reference with only a name and slug
    #[must_use]
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slug: slug.into(),
            icon_url: String::new(),
            color: String::new(),
        }
    }
}

/// How hard a template is to set up
///
/// Ordering is meaningful: `Beginner < Intermediate < Advanced`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum Complexity {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Complexity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Complexity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            other => Err(format!("unknown complexity '{other}'")),
        }
    }
}

/// Treat an explicit `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A single automation template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateRecord {
    /// Unique identifier
    pub id: String,
    /// Short title (searchable)
    pub title: String,
    /// Longer description (searchable)
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Apps connected by this template, in display order
    #[serde(default, deserialize_with = "null_as_default")]
    pub apps: Vec<AppRef>,
    /// Category tags; matching treats these as a set
    #[serde(default, deserialize_with = "null_as_default")]
    pub categories: Vec<String>,
    /// Setup difficulty
    #[serde(default)]
    pub complexity: Complexity,
    /// Higher is more popular
    #[serde(default)]
    pub popularity_score: f64,
    /// Lower is faster
    #[serde(default)]
    pub setup_time_minutes: f64,
    /// Use cases this template serves
    #[serde(default, deserialize_with = "null_as_default")]
    pub use_cases: Vec<String>,
    /// Creation timestamp (display only)
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl TemplateRecord {
    /// Create a record with the required fields and empty collections
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            apps: Vec::new(),
            categories: Vec::new(),
            complexity: Complexity::default(),
            popularity_score: 0.0,
            setup_time_minutes: 0.0,
            use_cases: Vec::new(),
            created_at: None,
        }
    }

    /// Whether this record belongs to the given use case
    #[must_use]
    pub fn has_use_case(&self, use_case: &str) -> bool {
        self.use_cases.iter().any(|uc| uc == use_case)
    }

    /// Whether this record carries the given category
    #[must_use]
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    /// Comma-separated app names for display
    #[must_use]
    pub fn app_names(&self) -> String {
        self.apps
            .iter()
            .map(|app| app.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Wrap owned records into a shared [`RecordSet`]
#[must_use]
pub fn into_record_set(records: Vec<TemplateRecord>) -> RecordSet {
    records.into_iter().map(Arc::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complexity_ordering() {
        assert!(Complexity::Beginner < Complexity::Intermediate);
        assert!(Complexity::Intermediate < Complexity::Advanced);
    }

    #[test]
    fn test_complexity_from_str() {
        assert_eq!("Advanced".parse::<Complexity>(), Ok(Complexity::Advanced));
        assert!("expert".parse::<Complexity>().is_err());
    }

    #[test]
    fn test_deserialize_full_record() {
        let json = r##"{
            "id": "slack-1",
            "title": "Slack notification",
            "description": "Post a message",
            "apps": [{"name": "Slack", "slug": "slack", "icon_url": "https://x/slack.png", "color": "#4A154B"}],
            "categories": ["communication"],
            "complexity": "intermediate",
            "popularity_score": 87,
            "setup_time_minutes": 5,
            "use_cases": ["marketing"],
            "created_at": "2024-03-01T12:00:00Z"
        }"##;

        let record: TemplateRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.complexity, Complexity::Intermediate);
        assert_eq!(record.apps[0].slug, "slack");
        assert!((record.popularity_score - 87.0).abs() < f64::EPSILON);
        assert!(record.created_at.is_some());
    }

    #[test]
    fn test_absent_collections_are_empty() {
        let json = r#"{"id": "x", "title": "Bare"}"#;
        let record: TemplateRecord = serde_json::from_str(json).unwrap();

        assert!(record.apps.is_empty());
        assert!(record.categories.is_empty());
        assert!(record.use_cases.is_empty());
        assert!(!record.has_use_case("marketing"));
    }

    #[test]
    fn test_null_collections_are_empty() {
        let json = r#"{
            "id": "x",
            "title": "Bare",
            "description": null,
            "use_cases": null,
            "categories": null,
            "apps": null
        }"#;
        let record: TemplateRecord = serde_json::from_str(json).unwrap();

        assert!(record.description.is_empty());
        assert!(record.apps.is_empty());
        assert!(record.categories.is_empty());
        assert!(record.use_cases.is_empty());
    }

    #[test]
    fn test_app_names() {
        let mut record = TemplateRecord::new("a", "A");
        record.apps = vec![AppRef::new("Gmail", "gmail"), AppRef::new("Sheets", "sheets")];
        assert_eq!(record.app_names(), "Gmail, Sheets");
    }
}
