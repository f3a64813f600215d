//! The query engine
//!
//! Owns one view's [`QueryState`] and turns it into a result list by running
//! the pipeline stages in a fixed order: use-case partition, text search,
//! category filter, sort. Text search always uses the debounced query.
//!
//! Every change to the typed query or the sort key replaces the location's
//! query string. The location is read exactly once, in [`QueryEngine::mount`].

use super::debounce::{Clock, Debouncer, SystemClock};
use super::location::{Location, QueryParams, Result};
use super::pipeline::{
    filter_by_categories, partition_by_use_case, sort_records, unique_categories,
    unique_use_cases,
};
use super::state::{QueryState, SortKey};
use crate::model::{RecordSet, TemplateRef};
use crate::search::IndexCache;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Default quiescence window for typed input
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);

/// Tunables for an engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    pub debounce: Duration,
    /// Whether "clear all" also returns to all use cases
    pub clear_resets_use_case: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            clear_resets_use_case: false,
        }
    }
}

/// Query engine over one resident record set
pub struct QueryEngine<L: Location, C: Clock = SystemClock> {
    records: RecordSet,
    state: QueryState,
    options: EngineOptions,
    debouncer: Debouncer<String, C>,
    location: L,
    partition: RecordSet,
    index: IndexCache,
    use_cases: Vec<String>,
    categories: Vec<String>,
    results: Vec<TemplateRef>,
}

impl<L: Location> QueryEngine<L> {
    /// Mount with the wall clock
    ///
    /// # Errors
    ///
    /// Returns `LocationError` if the location cannot be read.
    pub fn mount_with_defaults(records: RecordSet, location: L) -> Result<Self> {
        Self::mount(records, location, SystemClock, EngineOptions::default())
    }
}

impl<L: Location, C: Clock> QueryEngine<L, C> {
    /// Create the engine, seeding the query and sort from the location
    ///
    /// The seeded query is committed immediately, so the first results
    /// already reflect it.
    ///
    /// # Errors
    ///
    /// Returns `LocationError` if the location cannot be read.
    pub fn mount(records: RecordSet, location: L, clock: C, options: EngineOptions) -> Result<Self> {
        let params = QueryParams::parse(&location.read()?);
        debug!(q = %params.q, sort = %params.sort, "mounted query engine");

        let use_cases = unique_use_cases(&records);
        let partition = Arc::clone(&records);
        let categories = unique_categories(&partition);

        let mut engine = Self {
            state: QueryState::seeded(params.q, params.sort),
            options,
            debouncer: Debouncer::new(options.debounce, clock),
            location,
            partition,
            index: IndexCache::new(),
            use_cases,
            categories,
            results: Vec::new(),
            records,
        };
        engine.recompute();
        Ok(engine)
    }

    #[must_use]
    pub const fn state(&self) -> &QueryState {
        &self.state
    }

    #[must_use]
    pub const fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Current results, in display order
    #[must_use]
    pub fn results(&self) -> &[TemplateRef] {
        &self.results
    }

    /// Size of the full record set
    #[must_use]
    pub fn total(&self) -> usize {
        self.records.len()
    }

    /// Every use case in the full record set, first-seen order
    #[must_use]
    pub fn available_use_cases(&self) -> &[String] {
        &self.use_cases
    }

    /// Every category in the current use-case partition, first-seen order
    #[must_use]
    pub fn available_categories(&self) -> &[String] {
        &self.categories
    }

    #[must_use]
    pub const fn location(&self) -> &L {
        &self.location
    }

    /// How many times the search index has been built
    #[must_use]
    pub const fn index_builds(&self) -> usize {
        self.index.builds()
    }

    /// Query string for the current state
    #[must_use]
    pub fn share_string(&self) -> String {
        QueryParams::new(self.state.raw_query.clone(), self.state.sort_key).encode()
    }

    /// Whether "clear all" should be offered
    #[must_use]
    pub fn can_clear(&self) -> bool {
        self.state.can_clear()
    }

    /// Time until pending input is committed, if any is pending
    #[must_use]
    pub fn time_until_debounce(&self) -> Option<Duration> {
        self.debouncer.remaining()
    }

    /// Record a keystroke-level change to the query text
    ///
    /// Results do not change until the debounce window elapses (see
    /// [`tick`](Self::tick)) or the input is flushed.
    pub fn set_raw_query(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text == self.state.raw_query {
            return;
        }
        self.state.raw_query.clone_from(&text);
        self.debouncer.schedule(text);
        self.sync_location();
    }

    /// Commit pending input whose window has elapsed
    ///
    /// Returns `true` if results were recomputed.
    pub fn tick(&mut self) -> bool {
        self.debouncer
            .poll()
            .is_some_and(|query| self.commit_query(query))
    }

    /// Commit pending input now
    ///
    /// Returns `true` if results were recomputed.
    pub fn flush(&mut self) -> bool {
        self.debouncer
            .flush()
            .is_some_and(|query| self.commit_query(query))
    }

    fn commit_query(&mut self, query: String) -> bool {
        if query == self.state.debounced_query {
            return false;
        }
        self.state.debounced_query = query;
        self.recompute();
        true
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        if key == self.state.sort_key {
            return;
        }
        self.state.sort_key = key;
        self.sync_location();
        self.recompute();
    }

    /// Advance to the next sort key and return it
    pub fn cycle_sort(&mut self) -> SortKey {
        let next = self.state.sort_key.next();
        self.set_sort_key(next);
        next
    }

    /// Select a use case, or all of them with `None`
    ///
    /// Changing the use case clears the category selection.
    pub fn select_use_case(&mut self, use_case: Option<String>) {
        if use_case == self.state.selected_use_case {
            return;
        }
        self.state.selected_use_case = use_case;
        self.state.selected_categories.clear();
        self.repartition();
        self.recompute();
    }

    /// Add or remove a category from the selection
    pub fn toggle_category(&mut self, category: &str) {
        if !self.state.selected_categories.remove(category) {
            self.state
                .selected_categories
                .insert(category.to_string());
        }
        self.recompute();
    }

    /// Reset query, categories, and sort to their defaults
    pub fn clear_all(&mut self) {
        self.debouncer.cancel();
        self.state.raw_query.clear();
        self.state.debounced_query.clear();
        self.state.selected_categories.clear();
        self.state.sort_key = SortKey::default();
        if self.options.clear_resets_use_case && self.state.selected_use_case.take().is_some() {
            self.repartition();
        }
        self.sync_location();
        self.recompute();
    }

    fn repartition(&mut self) {
        self.partition = match self.state.selected_use_case.as_deref() {
            Some(uc) => partition_by_use_case(&self.records, Some(uc)).into(),
            None => Arc::clone(&self.records),
        };
        self.categories = unique_categories(&self.partition);
    }

    fn sync_location(&mut self) {
        let query_string = self.share_string();
        if let Err(e) = self.location.replace(&query_string) {
            warn!(error = %e, "failed to update location");
        }
    }

    fn recompute(&mut self) {
        let index = self.index.get_or_build(&self.partition);
        let searched = index.search(&self.state.debounced_query);
        let searched_len = searched.len();
        let mut results = filter_by_categories(searched, &self.state.selected_categories);
        sort_records(&mut results, self.state.sort_key);

        debug!(
            partition = self.partition.len(),
            searched = searched_len,
            results = results.len(),
            query = %self.state.debounced_query,
            sort = %self.state.sort_key,
            "recomputed results"
        );
        self.results = results;
    }
}
