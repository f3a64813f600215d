//! Pure pipeline stages
//!
//! Each stage takes records by reference and returns new handles; nothing
//! here mutates a record or fails.

use super::state::SortKey;
use crate::model::{TemplateRecord, TemplateRef};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

/// Records tagged with `use_case`, or all of them when `None`
#[must_use]
pub fn partition_by_use_case(records: &[TemplateRef], use_case: Option<&str>) -> Vec<TemplateRef> {
    match use_case {
        Some(uc) => records
            .iter()
            .filter(|r| r.has_use_case(uc))
            .cloned()
            .collect(),
        None => records.to_vec(),
    }
}

/// Records carrying every category in `selected`
#[must_use]
pub fn filter_by_categories(
    records: Vec<TemplateRef>,
    selected: &BTreeSet<String>,
) -> Vec<TemplateRef> {
    if selected.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|r| selected.iter().all(|c| r.has_category(c)))
        .collect()
}

/// Stable sort by `key`
pub fn sort_records(records: &mut [TemplateRef], key: SortKey) {
    records.sort_by(|a, b| compare(a, b, key));
}

/// NaN sorts after every number in either direction
fn compare(a: &TemplateRecord, b: &TemplateRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::Popularity => or_nan(b.popularity_score, f64::NEG_INFINITY)
            .total_cmp(&or_nan(a.popularity_score, f64::NEG_INFINITY)),
        SortKey::SetupTime => or_nan(a.setup_time_minutes, f64::INFINITY)
            .total_cmp(&or_nan(b.setup_time_minutes, f64::INFINITY)),
        SortKey::Complexity => a.complexity.cmp(&b.complexity),
    }
}

const fn or_nan(value: f64, fallback: f64) -> f64 {
    if value.is_nan() { fallback } else { value }
}

/// Distinct use cases in order of first appearance
#[must_use]
pub fn unique_use_cases(records: &[TemplateRef]) -> Vec<String> {
    first_seen(records.iter().flat_map(|r| r.use_cases.iter()))
}

/// Distinct categories in order of first appearance
#[must_use]
pub fn unique_categories(records: &[TemplateRef]) -> Vec<String> {
    first_seen(records.iter().flat_map(|r| r.categories.iter()))
}

fn first_seen<'a>(values: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    for value in values {
        if !value.is_empty() && seen.insert(value.as_str()) {
            unique.push(value.clone());
        }
    }
    unique
}

/// Title-case each space or hyphen separated part: `lead-generation` → `Lead Generation`
#[must_use]
pub fn display_label(value: &str) -> String {
    value
        .split([' ', '-'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
