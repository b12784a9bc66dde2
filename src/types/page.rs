//! Pagination envelope for the read API.

use serde::{Deserialize, Serialize};

use super::StoredEvent;

/// One page of stored events plus pagination metadata.
///
/// `results` is ordered newest-first by event timestamp. A `page` past the
/// end of the history yields an empty `results` with otherwise-valid
/// metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPage {
    /// 1-based page number that was requested.
    pub page: u64,

    /// Maximum number of results per page.
    pub limit: u64,

    /// Total number of stored events across all pages.
    pub total_count: u64,

    /// Total number of pages at this `limit` (`ceil(total_count / limit)`).
    pub total_pages: u64,

    /// The events on this page, newest first.
    pub results: Vec<StoredEvent>,
}
