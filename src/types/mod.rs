//! Core domain types for the webhook ledger.
//!
//! This module contains the canonical event record and the pagination
//! envelope used by the read API.

pub mod event;
pub mod page;

// Re-export commonly used types at the module level
pub use event::{Event, EventAction, StoredEvent};
pub use page::EventPage;
