//! In-memory state shared between the file ingestion pipeline and readers.
//!
//! The store is constructed once and passed around as `Arc<StateStore>`. Writers
//! only ever swap in fully built sequences, so a reader holding a [`Snapshot`]
//! can never see a half-written list.

use serde::Serialize;
use std::sync::{Arc, PoisonError, RwLock};

use crate::models::{Food, MacroDay};

/// The foods and macro days visible to readers at one instant.
///
/// The two fields are replaced independently, so a snapshot may pair a fresh
/// food list with older targets.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Snapshot {
    pub foods: Arc<Vec<Food>>,
    pub targets: Arc<Vec<MacroDay>>,
}

/// Read access to the current snapshot.
pub trait StateReader: Send + Sync {
    fn current_state(&self) -> Snapshot;
}

/// Write access used by the ingestion pipeline.
pub trait StateWriter: Send + Sync {
    fn replace_foods(&self, foods: Vec<Food>);
    fn replace_targets(&self, targets: Vec<MacroDay>);
}

/// Snapshot holder guarded by a single lock covering both fields.
#[derive(Debug, Default)]
pub struct StateStore {
    inner: RwLock<Snapshot>,
}

impl StateStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

// A panic while holding the lock cannot leave a torn value behind: writes are a
// single `Arc` assignment. Poisoning is therefore ignored.
impl StateReader for StateStore {
    fn current_state(&self) -> Snapshot {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl StateWriter for StateStore {
    fn replace_foods(&self, foods: Vec<Food>) {
        let foods = Arc::new(foods);
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .foods = foods;
    }

    fn replace_targets(&self, targets: Vec<MacroDay>) {
        let targets = Arc::new(targets);
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .targets = targets;
    }
}
