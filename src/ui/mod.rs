//! Terminal browser
//!
//! A ratatui front end over [`QueryEngine`](crate::query::QueryEngine):
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ Search (n of total)                          │
//! ├────────────┬─────────────────────────────────┤
//! │ Use cases  │ Templates (virtualized)         │
//! ├────────────┤                                 │
//! │ Categories │                                 │
//! ├────────────┴─────────────────────────────────┤
//! │ Status: link · sort · filters · clear hint   │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! The widgets only read engine output. All edits flow through
//! [`events`] into [`AppState`] and from there into the engine in
//! [`Browser::apply`].

mod app;
mod error;
pub mod events;
mod selection;
mod state;
mod theme;
pub mod widgets;
mod window;

pub use app::{BrowseOptions, Browser, run};
pub use error::{Result, UiError, copy_to_clipboard};
pub use events::EventResult;
pub use selection::{SelectCallback, Selection};
pub use state::{AppState, FocusPane, MessageLevel, Mode, StatusMessage, TextField};
pub use theme::Theme;
pub use window::VirtualWindow;
