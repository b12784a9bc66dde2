//! Storage layer for the webhook ledger.
//!
//! The ledger treats its store as an abstract append-only + queryable
//! collection of event records. [`EventStore`] is the boundary the HTTP
//! handlers depend on; two implementations are provided:
//!
//! - [`MemoryStore`] - in-process, for tests and ephemeral deployments
//! - [`FileStore`] - crash-tolerant JSON Lines file
//!
//! Events are immutable once inserted; no update or delete paths exist.
//! Read ordering is always by event timestamp descending, ties broken by
//! descending insertion order, computed at query time rather than carried
//! over from arrival order.

pub mod log;
pub mod memory;

pub use log::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;

use crate::types::{Event, StoredEvent};

/// Errors reported by the storage layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Abstract append + query collection of event records.
///
/// Implementations must be safe to share across request handlers; all
/// coordination between concurrent inserts and reads is the store's
/// responsibility.
pub trait EventStore: Send + Sync {
    /// Appends an event, returning it together with its store-assigned
    /// identifier. Redelivered events are appended again; deduplication is
    /// not a store concern.
    fn insert(&self, event: &Event) -> Result<StoredEvent>;

    /// Returns the total number of stored events.
    fn count(&self) -> Result<u64>;

    /// Returns one page of events ordered newest-first by timestamp,
    /// skipping `skip` records and returning at most `limit`.
    ///
    /// A `skip` past the end of the history yields an empty page.
    fn find_page(&self, skip: u64, limit: u64) -> Result<Vec<StoredEvent>>;
}

/// Sorts records newest-first and extracts one page.
///
/// Records are held in insertion order; a stable sort by timestamp followed
/// by reverse iteration yields timestamp-descending order with ties broken
/// by descending insertion order.
pub(crate) fn page_newest_first(
    records: &[StoredEvent],
    skip: u64,
    limit: u64,
) -> Vec<StoredEvent> {
    let mut sorted: Vec<&StoredEvent> = records.iter().collect();
    sorted.sort_by_key(|r| r.event.timestamp);

    let skip = usize::try_from(skip).unwrap_or(usize::MAX);
    let limit = usize::try_from(limit).unwrap_or(usize::MAX);

    sorted
        .iter()
        .rev()
        .skip(skip)
        .take(limit)
        .map(|r| (*r).clone())
        .collect()
}


#[cfg(test)]
mod tests {
    use super::test_support::event_at;
    use super::*;

    fn stored(seq: u64, offset_secs: i64) -> StoredEvent {
        StoredEvent {
            id: seq.to_string(),
            event: event_at(offset_secs),
        }
    }

    #[test]
    fn page_orders_newest_first() {
        let records = vec![stored(0, 10), stored(1, 30), stored(2, 20)];

        let page = page_newest_first(&records, 0, 10);

        let ids: Vec<&str> = page.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "0"]);
    }

    #[test]
    fn page_skip_and_limit_apply_after_sorting() {
        let records: Vec<StoredEvent> = (0..5).map(|i| stored(i, i as i64)).collect();

        let page = page_newest_first(&records, 1, 2);

        let ids: Vec<&str> = page.iter().map(|r| r.id.as_str()).collect();
        // Newest-first is 4,3,2,1,0; skip 1, take 2
        assert_eq!(ids, vec!["3", "2"]);
    }

    #[test]
    fn page_ties_break_by_descending_insertion() {
        let records = vec![stored(0, 5), stored(1, 5), stored(2, 5)];

        let page = page_newest_first(&records, 0, 10);

        let ids: Vec<&str> = page.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1", "0"]);
    }

    #[test]
    fn page_past_end_is_empty() {
        let records = vec![stored(0, 1)];
        assert!(page_newest_first(&records, 10, 10).is_empty());
    }
}
