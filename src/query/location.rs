//! Shareable query-string state
//!
//! The engine mirrors `{raw_query, sort_key}` into a [`Location`] as
//! `q=<percent-encoded text>&sort=<key>`. `sort` is always written and `q`
//! is left out when empty. The location is read once at mount and only
//! ever replaced afterwards.

use super::state::SortKey;
use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use thiserror::Error;
use tracing::warn;
use url::form_urlencoded;

/// Errors from reading or writing a location
#[derive(Debug, Error)]
pub enum LocationError {
    /// The backing file could not be read or written
    #[error("Location I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, LocationError>;

/// The `q` and `sort` parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pub q: String,
    pub sort: SortKey,
}

impl QueryParams {
    #[must_use]
    pub fn new(q: impl Into<String>, sort: SortKey) -> Self {
        Self { q: q.into(), sort }
    }

    /// Parse a query string, with or without a leading `?`
    ///
    /// Unknown parameters are ignored and an unknown `sort` falls back to
    /// the default. When a parameter repeats, the first occurrence wins.
    #[must_use]
    pub fn parse(query_string: &str) -> Self {
        let trimmed = query_string.trim().trim_start_matches('?');
        let mut q = None;
        let mut sort = None;
        for (key, value) in form_urlencoded::parse(trimmed.as_bytes()) {
            match &*key {
                "q" if q.is_none() => q = Some(value.into_owned()),
                "sort" if sort.is_none() => {
                    let parsed = value.parse::<SortKey>().unwrap_or_else(|_| {
                        warn!(value = %value, "ignoring unknown sort key in query string");
                        SortKey::default()
                    });
                    sort = Some(parsed);
                }
                _ => {}
            }
        }
        Self {
            q: q.unwrap_or_default(),
            sort: sort.unwrap_or_default(),
        }
    }

    /// Encode as `q=...&sort=...`, omitting `q` when empty
    #[must_use]
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if !self.q.is_empty() {
            serializer.append_pair("q", &self.q);
        }
        serializer.append_pair("sort", self.sort.as_str());
        serializer.finish()
    }
}

/// Where the shareable query string lives
pub trait Location {
    /// Current query string (without a leading `?`)
    ///
    /// # Errors
    ///
    /// Returns `LocationError` if the backing store cannot be read.
    fn read(&self) -> Result<String>;

    /// Replace the current query string without adding a history entry
    ///
    /// # Errors
    ///
    /// Returns `LocationError` if the backing store cannot be written.
    fn replace(&mut self, query_string: &str) -> Result<()>;
}

#[derive(Debug, Default)]
struct MemoryInner {
    current: String,
    reads: usize,
    replaces: usize,
}

/// In-memory location
///
/// Clones share state, so a caller can hand one to the engine and keep
/// another to inspect what was written.
#[derive(Debug, Clone, Default)]
pub struct MemoryLocation {
    inner: Rc<RefCell<MemoryInner>>,
}

impl MemoryLocation {
    /// Create a location holding `query_string`
    #[must_use]
    pub fn new(query_string: &str) -> Self {
        Self {
            inner: Rc::new(RefCell::new(MemoryInner {
                current: query_string.trim_start_matches('?').to_string(),
                ..MemoryInner::default()
            })),
        }
    }

    /// The query string as last written
    #[must_use]
    pub fn current(&self) -> String {
        self.inner.borrow().current.clone()
    }

    #[must_use]
    pub fn reads(&self) -> usize {
        self.inner.borrow().reads
    }

    #[must_use]
    pub fn replaces(&self) -> usize {
        self.inner.borrow().replaces
    }
}

impl Location for MemoryLocation {
    fn read(&self) -> Result<String> {
        let mut inner = self.inner.borrow_mut();
        inner.reads += 1;
        Ok(inner.current.clone())
    }

    fn replace(&mut self, query_string: &str) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        inner.replaces += 1;
        query_string.clone_into(&mut inner.current);
        Ok(())
    }
}

/// Location persisted to a single file
///
/// A missing file reads as an empty query string.
#[derive(Debug, Clone)]
pub struct FileLocation {
    path: PathBuf,
}

impl FileLocation {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default file in the user cache directory
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::cache_dir().map(|dir| dir.join("templar").join("location"))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> LocationError {
        LocationError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl Location for FileLocation {
    fn read(&self) -> Result<String> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(text.trim().trim_start_matches('?').to_string()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn replace(&mut self, query_string: &str) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        fs::write(&self.path, query_string).map_err(|e| self.io_error(e))
    }
}
