//! Dataset loading
//!
//! The [`DatasetLoader`] owns a [`DataSource`] and fetches from it exactly
//! once. Every later call to [`DatasetLoader::load`] hands back the same
//! shared [`RecordSet`] allocation, so consumers that key caches on record
//! set identity stay valid for the life of the loader.
//!
//! A failed fetch is sticky: the loader remembers the failure and reports it
//! again instead of retrying. Construct a new loader to try again.
//!
//! ```
//! use templar::dataset::{DatasetLoader, EmbeddedSource};
//!
//! let loader = DatasetLoader::new(EmbeddedSource);
//! let first = loader.load().unwrap();
//! let second = loader.load().unwrap();
//! assert!(std::sync::Arc::ptr_eq(&first, &second));
//! ```

mod error;
pub mod generate;
mod source;

pub use error::{DatasetError, Result};
pub use source::{
    AnySource, DataSource, EmbeddedSource, JsonFileSource, StaticSource, parse_records,
};

use crate::model::{RecordSet, into_record_set};
use once_cell::unsync::OnceCell;
use std::sync::Arc;
use tracing::{error, info};

/// Loads a dataset once and serves it from memory afterwards
pub struct DatasetLoader<S: DataSource> {
    source: S,
    outcome: OnceCell<std::result::Result<RecordSet, String>>,
}

impl<S: DataSource> DatasetLoader<S> {
    /// Create a loader; nothing is fetched until the first `load`
    #[must_use]
    pub const fn new(source: S) -> Self {
        Self {
            source,
            outcome: OnceCell::new(),
        }
    }

    /// Return the dataset, fetching it on the first call only
    ///
    /// # Errors
    ///
    /// The first call returns the source's error if the fetch fails. Every
    /// later call on the same loader returns `DatasetError::PreviouslyFailed`.
    pub fn load(&self) -> Result<RecordSet> {
        if let Some(outcome) = self.outcome.get() {
            return outcome
                .as_ref()
                .map(Arc::clone)
                .map_err(|msg| DatasetError::PreviouslyFailed(msg.clone()));
        }

        let source = self.source.describe();
        match self.source.fetch() {
            Ok(records) => {
                info!(%source, count = records.len(), "loaded template dataset");
                let set = into_record_set(records);
                let _ = self.outcome.set(Ok(Arc::clone(&set)));
                Ok(set)
            }
            Err(e) => {
                error!(%source, error = %e, "failed to load template dataset");
                let _ = self.outcome.set(Err(e.to_string()));
                Err(e)
            }
        }
    }

    /// Whether a load has completed (successfully or not)
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.outcome.get().is_some()
    }

    /// Description of the underlying source
    #[must_use]
    pub fn describe(&self) -> String {
        self.source.describe()
    }
}
