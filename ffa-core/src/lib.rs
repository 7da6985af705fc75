//! ffa core library
//!
//! Ingests food lists and macro tracking exports from disk and keeps them in a
//! shared in-memory snapshot that is refreshed when the files change.

pub mod bootstrap;
pub mod models;
pub mod parse;
pub mod router;
pub mod state;
pub mod watcher;

pub use bootstrap::{bootstrap, BootstrapError, BootstrapReport};
pub use models::{Food, MacroDay, MacroInfo};
pub use parse::{parse_foods, parse_macro_days, ParseError};
pub use router::{Category, ChangeRouter, RouteOutcome, Routes};
pub use state::{Snapshot, StateReader, StateStore, StateWriter};
pub use watcher::{DirectoryWatcher, WatchError, WatchHandle, WatcherState, DEFAULT_EXTENSION};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
