//! Query state and sort keys

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Result ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Most popular first
    #[default]
    Popularity,
    /// Fastest setup first
    SetupTime,
    /// Easiest first
    Complexity,
}

impl SortKey {
    pub const ALL: [Self; 3] = [Self::Popularity, Self::SetupTime, Self::Complexity];

    /// Value used in the query string
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Popularity => "popularity",
            Self::SetupTime => "setup_time",
            Self::Complexity => "complexity",
        }
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Popularity => "Most popular",
            Self::SetupTime => "Quickest setup",
            Self::Complexity => "Easiest first",
        }
    }

    /// The key after this one, wrapping around
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Popularity => Self::SetupTime,
            Self::SetupTime => Self::Complexity,
            Self::Complexity => Self::Popularity,
        }
    }

    /// Parse a query-string value, falling back to the default when unknown
    #[must_use]
    pub fn parse_lenient(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "popularity" => Ok(Self::Popularity),
            "setup_time" | "setup-time" | "setuptime" => Ok(Self::SetupTime),
            "complexity" => Ok(Self::Complexity),
            other => Err(format!(
                "unknown sort key '{other}' (expected popularity, setup_time or complexity)"
            )),
        }
    }
}

/// Everything the user has asked for in one view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    /// Text as typed, updated on every keystroke
    pub raw_query: String,
    /// Text the pipeline actually searches with
    pub debounced_query: String,
    pub selected_use_case: Option<String>,
    /// Every selected category must be present on a record
    pub selected_categories: BTreeSet<String>,
    pub sort_key: SortKey,
}

impl QueryState {
    /// State seeded with a query and sort, both already committed
    #[must_use]
    pub fn seeded(query: impl Into<String>, sort_key: SortKey) -> Self {
        let query = query.into();
        Self {
            debounced_query: query.clone(),
            raw_query: query,
            sort_key,
            ..Self::default()
        }
    }

    /// Whether "clear all" would change anything
    #[must_use]
    pub fn can_clear(&self) -> bool {
        !self.raw_query.is_empty()
            || !self.selected_categories.is_empty()
            || self.sort_key != SortKey::default()
    }

    /// Whether typed text has not been committed yet
    #[must_use]
    pub fn is_query_pending(&self) -> bool {
        self.raw_query != self.debounced_query
    }
}
