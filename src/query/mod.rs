//! Query state, pipeline, and the engine that runs it
//!
//! ```
//! use templar::dataset::{DatasetLoader, EmbeddedSource};
//! use templar::query::{MemoryLocation, QueryEngine, SortKey};
//!
//! let records = DatasetLoader::new(EmbeddedSource).load().unwrap();
//! let location = MemoryLocation::new("?q=slack&sort=setup_time");
//! let engine = QueryEngine::mount_with_defaults(records, location).unwrap();
//!
//! assert_eq!(engine.state().sort_key, SortKey::SetupTime);
//! assert!(!engine.results().is_empty());
//! ```

pub mod debounce;
mod engine;
pub mod location;
pub mod pipeline;
mod state;

pub use debounce::{Clock, Debouncer, ManualClock, SystemClock};
pub use engine::{DEFAULT_DEBOUNCE, EngineOptions, QueryEngine};
pub use location::{FileLocation, Location, LocationError, MemoryLocation, QueryParams};
pub use state::{QueryState, SortKey};
