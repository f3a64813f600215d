//! Data sources the loader can fetch from

use super::error::{DatasetError, Result};
use crate::model::TemplateRecord;
use std::fs;
use std::path::{Path, PathBuf};

/// Sample catalog compiled into the binary
const EMBEDDED_CATALOG: &str = include_str!("../../data/templates.json");

/// A place template records come from
///
/// `fetch` is called at most once per [`DatasetLoader`](super::DatasetLoader).
pub trait DataSource {
    /// Human-readable description for logs and errors
    fn describe(&self) -> String;

    /// Materialize every record
    ///
    /// # Errors
    ///
    /// Returns `DatasetError` if the records cannot be read or parsed.
    fn fetch(&self) -> Result<Vec<TemplateRecord>>;
}

/// Parse a JSON array of templates
///
/// # Errors
///
/// Returns `DatasetError::ParseError` if the text is not a JSON array of
/// template records.
pub fn parse_records(json: &str) -> Result<Vec<TemplateRecord>> {
    serde_json::from_str(json).map_err(Into::into)
}

/// Reads a JSON dataset from disk
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataSource for JsonFileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<Vec<TemplateRecord>> {
        let text = fs::read_to_string(&self.path).map_err(|source| DatasetError::ReadError {
            path: self.describe(),
            source,
        })?;
        parse_records(&text)
    }
}

/// The bundled sample catalog
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedSource;

impl DataSource for EmbeddedSource {
    fn describe(&self) -> String {
        "embedded sample catalog".to_string()
    }

    fn fetch(&self) -> Result<Vec<TemplateRecord>> {
        parse_records(EMBEDDED_CATALOG)
    }
}

/// Records that are already in memory
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    records: Vec<TemplateRecord>,
}

impl StaticSource {
    #[must_use]
    pub const fn new(records: Vec<TemplateRecord>) -> Self {
        Self { records }
    }
}

impl DataSource for StaticSource {
    fn describe(&self) -> String {
        format!("{} in-memory records", self.records.len())
    }

    fn fetch(&self) -> Result<Vec<TemplateRecord>> {
        Ok(self.records.clone())
    }
}

/// Either a configured file or the embedded catalog
///
/// Lets the composition root pick a source at runtime without boxing.
#[derive(Debug, Clone)]
pub enum AnySource {
    File(JsonFileSource),
    Embedded(EmbeddedSource),
}

impl AnySource {
    /// File source when a path is given, embedded catalog otherwise
    #[must_use]
    pub fn from_path(path: Option<&Path>) -> Self {
        path.map_or(Self::Embedded(EmbeddedSource), |p| {
            Self::File(JsonFileSource::new(p))
        })
    }
}

impl DataSource for AnySource {
    fn describe(&self) -> String {
        match self {
            Self::File(source) => source.describe(),
            Self::Embedded(source) => source.describe(),
        }
    }

    fn fetch(&self) -> Result<Vec<TemplateRecord>> {
        match self {
            Self::File(source) => source.fetch(),
            Self::Embedded(source) => source.fetch(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_embedded_catalog_parses() {
        let records = EmbeddedSource.fetch().unwrap();
        assert!(records.len() >= 10);
        assert!(records.iter().any(|r| r.title.contains("Slack")));
    }

    #[test]
    fn test_json_file_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"id": "a", "title": "Alpha"}}]"#).unwrap();

        let source = JsonFileSource::new(file.path());
        let records = source.fetch().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Alpha");
    }

    #[test]
    fn test_json_file_source_missing_file() {
        let source = JsonFileSource::new("/definitely/not/here.json");
        let err = source.fetch().unwrap_err();
        assert!(matches!(err, DatasetError::ReadError { .. }));
    }

    #[test]
    fn test_null_collections_parse_as_empty() {
        let records = parse_records(
            r#"[{"id":"x","title":"Bare","use_cases":null,"categories":null,"apps":null}]"#,
        )
        .unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].use_cases.is_empty());
        assert!(records[0].categories.is_empty());
        assert!(records[0].apps.is_empty());
    }

    #[test]
    fn test_static_source_hands_back_its_records() {
        let source = StaticSource::new(vec![
            TemplateRecord::new("a", "Alpha"),
            TemplateRecord::new("b", "Beta"),
        ]);
        assert_eq!(source.describe(), "2 in-memory records");

        let records = source.fetch().unwrap();
        let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_any_source_selection() {
        assert!(matches!(AnySource::from_path(None), AnySource::Embedded(_)));
        assert!(matches!(
            AnySource::from_path(Some(Path::new("x.json"))),
            AnySource::File(_)
        ));
    }
}
