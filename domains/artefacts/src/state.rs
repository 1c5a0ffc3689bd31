//! Shared artefact cache state
//!
//! `ArtefactStore` is the process-wide handle to the current `CacheStore`.
//! Writers go through `dispatch`, which runs the reducer and swaps in the
//! result; readers take an `Arc` snapshot that later writes never change.

use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::reducer::{reduce, CacheEvent};
use crate::domain::store::{ArtefactCacheEntry, CacheStore, SelectedArtefact};

#[derive(Debug, Clone, Default)]
pub struct ArtefactStore {
    current: Arc<RwLock<Arc<CacheStore>>>,
}

impl ArtefactStore {
    #[mutants::skip] // Equivalent to Default::default()
    pub fn new() -> Self {
        Self::default()
    }

    /// The current store value
    pub fn snapshot(&self) -> Arc<CacheStore> {
        // The value behind the lock is only ever replaced whole, so a lock
        // poisoned by a panicking reducer still holds a consistent store.
        let current = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*current)
    }

    /// Apply `event` and publish the resulting store
    pub(crate) fn dispatch(&self, event: CacheEvent) -> Arc<CacheStore> {
        let kind = event.to_string();
        let artefact_id = event.artefact_id().map(str::to_owned);

        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let next = Arc::new(reduce(&current, event));
        *current = Arc::clone(&next);
        drop(current);

        tracing::debug!(
            event = %kind,
            artefact_id = artefact_id.as_deref().unwrap_or("-"),
            entries = next.len(),
            "Artefact cache updated"
        );
        next
    }

    pub fn entry(&self, artefact_id: &str) -> Option<Arc<ArtefactCacheEntry>> {
        self.snapshot().entry(artefact_id).cloned()
    }

    pub fn user_artefact_ids(&self) -> Vec<String> {
        self.snapshot().user_artefact_ids().to_vec()
    }

    pub fn selection(&self) -> Option<SelectedArtefact> {
        self.snapshot().selection()
    }
}
