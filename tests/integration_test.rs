//! Integration tests for templar
//!
//! These tests drive the public API end to end: datasets written to
//! temporary files, engines mounted over them, and query strings persisted
//! through a file-backed location.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use templar::config::TemplarConfig;
use templar::dataset::generate::{expand, write_json};
use templar::dataset::{DataSource, DatasetError, DatasetLoader, EmbeddedSource, JsonFileSource};
use templar::model::{Complexity, TemplateRef};
use templar::query::{FileLocation, Location, MemoryLocation, QueryEngine, SortKey};
use tempfile::TempDir;

const CATALOG: &str = r#"[
  {
    "id": "slack-alert",
    "title": "Slack notification",
    "description": "Post new leads to a channel",
    "apps": [{"name": "Slack", "slug": "slack"}],
    "categories": ["communication", "crm"],
    "complexity": "beginner",
    "popularity_score": 90,
    "setup_time_minutes": 5,
    "use_cases": ["sales", "marketing"]
  },
  {
    "id": "email-digest",
    "title": "Weekly email digest",
    "apps": [{"name": "Gmail", "slug": "gmail"}],
    "categories": ["email"],
    "complexity": "intermediate",
    "popularity_score": 70,
    "setup_time_minutes": 15,
    "use_cases": ["marketing"]
  },
  {
    "id": "crm-sync",
    "title": "CRM contact sync",
    "description": "Mirror email contacts into the CRM",
    "apps": [{"name": "HubSpot"}, {"name": "Gmail"}],
    "categories": ["crm", "email"],
    "complexity": "advanced",
    "popularity_score": 80,
    "setup_time_minutes": 30,
    "use_cases": ["sales"]
  },
  {
    "id": "bare",
    "title": "Standup bot",
    "popularity_score": 60,
    "setup_time_minutes": 20
  }
]"#;

fn write_catalog(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("templates.json");
    fs::write(&path, CATALOG).unwrap();
    path
}

fn ids(records: &[TemplateRef]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
}

#[test]
fn test_json_file_loads_with_absent_collections() {
    let dir = TempDir::new().unwrap();
    let loader = DatasetLoader::new(JsonFileSource::new(write_catalog(dir.path())));

    let records = loader.load().unwrap();
    assert_eq!(records.len(), 4);

    let bare = records.iter().find(|r| r.id == "bare").unwrap();
    assert!(bare.apps.is_empty());
    assert!(bare.categories.is_empty());
    assert!(bare.use_cases.is_empty());
    assert_eq!(bare.complexity, Complexity::Beginner);

    // Second load hands back the same allocation
    let again = loader.load().unwrap();
    assert!(Arc::ptr_eq(&records, &again));
}

#[test]
fn test_bad_dataset_fails_once_and_stays_failed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();

    let loader = DatasetLoader::new(JsonFileSource::new(&path));
    assert!(matches!(loader.load(), Err(DatasetError::ParseError(_))));

    // Fixing the file does not help this loader
    fs::write(&path, CATALOG).unwrap();
    assert!(matches!(loader.load(), Err(DatasetError::PreviouslyFailed(_))));

    // A fresh loader is the retry path
    let remounted = DatasetLoader::new(JsonFileSource::new(&path));
    assert_eq!(remounted.load().unwrap().len(), 4);
}

#[test]
fn test_missing_dataset_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nope.json");
    let loader = DatasetLoader::new(JsonFileSource::new(&path));

    let err = loader.load().unwrap_err();
    assert!(matches!(err, DatasetError::ReadError { .. }));
    assert!(err.to_string().contains("nope.json"));
}

#[test]
fn test_default_view_sorted_by_popularity() {
    let dir = TempDir::new().unwrap();
    let records = DatasetLoader::new(JsonFileSource::new(write_catalog(dir.path())))
        .load()
        .unwrap();

    let engine = QueryEngine::mount_with_defaults(records, MemoryLocation::default()).unwrap();
    assert_eq!(
        ids(engine.results()),
        vec!["slack-alert", "crm-sync", "email-digest", "bare"]
    );
    assert!(!engine.can_clear());
}

#[test]
fn test_full_pipeline_over_file() {
    let dir = TempDir::new().unwrap();
    let records = DatasetLoader::new(JsonFileSource::new(write_catalog(dir.path())))
        .load()
        .unwrap();

    let mut engine =
        QueryEngine::mount_with_defaults(records, MemoryLocation::new("?sort=setup_time")).unwrap();

    engine.select_use_case(Some("sales".to_string()));
    assert_eq!(ids(engine.results()), vec!["slack-alert", "crm-sync"]);

    engine.toggle_category("email");
    assert_eq!(ids(engine.results()), vec!["crm-sync"]);

    engine.select_use_case(Some("marketing".to_string()));
    assert!(engine.state().selected_categories.is_empty());
    assert_eq!(ids(engine.results()), vec!["slack-alert", "email-digest"]);

    engine.select_use_case(Some("finance".to_string()));
    assert!(engine.results().is_empty());
}

#[test]
fn test_query_string_persists_through_file_location() {
    let dir = TempDir::new().unwrap();
    let location_path = dir.path().join("state").join("location");
    let records = DatasetLoader::new(EmbeddedSource).load().unwrap();

    {
        let mut engine = QueryEngine::mount_with_defaults(
            Arc::clone(&records),
            FileLocation::new(&location_path),
        )
        .unwrap();
        engine.set_raw_query("slack & gmail");
        engine.set_sort_key(SortKey::Complexity);
    }

    let saved = FileLocation::new(&location_path).read().unwrap();
    assert_eq!(saved, "q=slack+%26+gmail&sort=complexity");

    let engine =
        QueryEngine::mount_with_defaults(records, FileLocation::new(&location_path)).unwrap();
    assert_eq!(engine.state().raw_query, "slack & gmail");
    assert_eq!(engine.state().debounced_query, "slack & gmail");
    assert_eq!(engine.state().sort_key, SortKey::Complexity);
}

#[test]
fn test_generated_catalog_round_trips_through_loader() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("big").join("templates.json");

    let base = EmbeddedSource.fetch().unwrap();
    let records = expand(&base, 2000, 7).unwrap();
    write_json(&records, &out).unwrap();

    let loaded = DatasetLoader::new(JsonFileSource::new(&out)).load().unwrap();
    assert_eq!(loaded.len(), 2000);

    let unique: HashSet<&str> = loaded.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(unique.len(), 2000);
    assert!(loaded.iter().all(|r| (0.0..100.0).contains(&r.popularity_score)));
    assert!(loaded.iter().all(|r| (1.0..=60.0).contains(&r.setup_time_minutes)));

    let engine = QueryEngine::mount_with_defaults(loaded, MemoryLocation::new("q=slack")).unwrap();
    assert!(!engine.results().is_empty());
    assert!(engine.results().len() < 2000);
}

#[test]
fn test_config_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("templar").join("config.toml");

    let missing = TemplarConfig::load_from(&path).unwrap();
    assert_eq!(missing, TemplarConfig::default());

    let config = TemplarConfig {
        debounce_ms: 350,
        default_sort: SortKey::SetupTime,
        clear_resets_use_case: true,
        row_height: 9,
        ..TemplarConfig::default()
    };
    config.save_to(&path).unwrap();

    let loaded = TemplarConfig::load_from(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.row_height(), 3);
    assert!(loaded.engine_options().clear_resets_use_case);
}
