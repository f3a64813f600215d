//! Fuzzy text search over template records
//!
//! [`SearchIndex`] answers free-text queries against one record set.
//! [`IndexCache`] holds the index for the most recent record set and only
//! rebuilds it when it is handed a different allocation; two record sets
//! with identical contents but different identities still cause a rebuild.

mod index;

pub use index::{Field, SearchHit, SearchIndex};

use crate::model::RecordSet;
use std::sync::Arc;
use tracing::debug;

/// Keeps the index for the last record set it saw
#[derive(Debug, Default)]
pub struct IndexCache {
    index: Option<SearchIndex>,
    builds: usize,
}

impl IndexCache {
    /// Create an empty cache
    #[must_use]
    pub const fn new() -> Self {
        Self {
            index: None,
            builds: 0,
        }
    }

    /// Index over `records`, rebuilt only if `records` is a new allocation
    pub fn get_or_build(&mut self, records: &RecordSet) -> &SearchIndex {
        let fresh = self
            .index
            .as_ref()
            .is_some_and(|index| Arc::ptr_eq(index.records(), records));
        if !fresh {
            self.index = None;
        }

        let builds = &mut self.builds;
        self.index.get_or_insert_with(|| {
            *builds += 1;
            debug!(records = records.len(), builds = *builds, "rebuilt search index");
            SearchIndex::build(records)
        })
    }

    /// How many times an index has been built
    #[must_use]
    pub const fn builds(&self) -> usize {
        self.builds
    }
}
