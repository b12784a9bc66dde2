//! In-memory event store.
//!
//! Used by tests and suitable for ephemeral deployments where history need
//! not survive a restart.

use std::sync::{Mutex, PoisonError};

use crate::types::{Event, StoredEvent};

use super::{EventStore, Result, page_newest_first};

/// An in-memory [`EventStore`] backed by a mutex-guarded vector.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    records: Vec<StoredEvent>,
    next_seq: u64,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        MemoryStore::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned lock only means another request panicked mid-insert;
        // the vector itself is always in a consistent state.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl EventStore for MemoryStore {
    fn insert(&self, event: &Event) -> Result<StoredEvent> {
        let mut inner = self.lock();
        let stored = StoredEvent {
            id: inner.next_seq.to_string(),
            event: event.clone(),
        };
        inner.next_seq += 1;
        inner.records.push(stored.clone());
        Ok(stored)
    }

    fn count(&self) -> Result<u64> {
        Ok(self.lock().records.len() as u64)
    }

    fn find_page(&self, skip: u64, limit: u64) -> Result<Vec<StoredEvent>> {
        Ok(page_newest_first(&self.lock().records, skip, limit))
    }
}
