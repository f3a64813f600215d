//! Synthetic catalog expansion
//!
//! Builds a large catalog from a small base one, for exercising the list and
//! the search index at realistic sizes. Record `i` copies base record
//! `i % base.len()` with a unique id and title and fresh popularity, setup
//! time, and creation date. Output is reproducible for a given seed.

use super::error::{DatasetError, Result};
use crate::model::TemplateRecord;
use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;
use std::path::Path;

/// Default number of generated records
pub const DEFAULT_COUNT: usize = 2000;

/// Default seed for reproducible output
pub const DEFAULT_SEED: u64 = 0x7e3a_91c4;

/// Expand `base` into `count` records
///
/// # Errors
///
/// Returns `DatasetError::Invalid` if `base` is empty and `count` is not zero.
pub fn expand(base: &[TemplateRecord], count: usize, seed: u64) -> Result<Vec<TemplateRecord>> {
    if base.is_empty() && count > 0 {
        return Err(DatasetError::Invalid(
            "cannot expand an empty base catalog".to_string(),
        ));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let now = Utc::now();

    let records = (0..count)
        .map(|i| {
            let template = &base[i % base.len()];
            let mut record = template.clone();
            record.id = format!("{}-{i}", template.id);
            record.title = format!("{} #{i}", template.title);
            record.popularity_score = f64::from(rng.gen_range(0..100_u32));
            record.setup_time_minutes = f64::from(rng.gen_range(1..=60_u32));
            record.created_at = Some(now - Duration::minutes(rng.gen_range(1..=525_600)));
            record
        })
        .collect();

    Ok(records)
}

/// Write records as pretty-printed JSON
///
/// # Errors
///
/// Returns `DatasetError` if serialization or the file write fails.
pub fn write_json(records: &[TemplateRecord], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, json).map_err(DatasetError::WriteError)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Vec<TemplateRecord> {
        vec![TemplateRecord::new("a", "Alpha"), TemplateRecord::new("b", "Beta")]
    }

    #[test]
    fn test_expand_ids_and_titles() {
        let records = expand(&base(), 5, DEFAULT_SEED).unwrap();

        assert_eq!(records.len(), 5);
        assert_eq!(records[0].id, "a-0");
        assert_eq!(records[3].id, "b-3");
        assert_eq!(records[4].title, "Alpha #4");
    }

    #[test]
    fn test_expand_value_ranges() {
        let records = expand(&base(), 200, 7).unwrap();
        assert!(records.iter().all(|r| (0.0..100.0).contains(&r.popularity_score)));
        assert!(records.iter().all(|r| (1.0..=60.0).contains(&r.setup_time_minutes)));
        assert!(records.iter().all(|r| r.created_at.is_some_and(|t| t < Utc::now())));
    }

    #[test]
    fn test_expand_is_reproducible() {
        let first = expand(&base(), 20, 42).unwrap();
        let second = expand(&base(), 20, 42).unwrap();
        let scores = |rs: &[TemplateRecord]| rs.iter().map(|r| r.popularity_score).collect::<Vec<_>>();
        assert_eq!(scores(&first), scores(&second));
    }

    #[test]
    fn test_expand_empty_base() {
        assert!(expand(&[], 3, 1).is_err());
        assert!(expand(&[], 0, 1).unwrap().is_empty());
    }

    #[test]
    fn test_write_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("large.json");
        let records = expand(&base(), 4, 1).unwrap();

        write_json(&records, &path).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        let parsed = super::super::parse_records(&text).unwrap();
        assert_eq!(parsed.len(), 4);
    }
}
