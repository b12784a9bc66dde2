//! The canonical event record.
//!
//! Every tracked repository action (a push, a pull request being opened, a
//! pull request being merged) is normalized into one [`Event`] shape before
//! it is persisted. The normalizer either produces a fully-populated record
//! or nothing; a partial record is never stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of repository action an event records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventAction {
    /// Commits were pushed to a branch.
    Push,
    /// A pull request was opened.
    PullRequest,
    /// A pull request was merged.
    Merge,
}

impl fmt::Display for EventAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EventAction::Push => "PUSH",
            EventAction::PullRequest => "PULL_REQUEST",
            EventAction::Merge => "MERGE",
        };
        write!(f, "{}", s)
    }
}

/// A normalized repository event.
///
/// Created exactly once, at ingestion time, by the normalizer; immutable
/// thereafter. The `timestamp` is assigned at normalization time from a
/// caller-supplied clock reading, never taken from the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Platform-assigned identifier of the triggering commit or pull request.
    ///
    /// For pushes this is the post-push commit SHA (empty if the payload
    /// omitted it); for pull requests it is the stringified PR id. Not
    /// guaranteed unique across event kinds.
    pub request_id: String,

    /// Username responsible for the action.
    pub author: String,

    /// The tracked action this event records.
    pub action: EventAction,

    /// Source branch. Empty when not applicable (pushes carry no source
    /// branch concept).
    pub from_branch: String,

    /// Destination/target branch.
    pub to_branch: String,

    /// UTC instant assigned when the event was normalized.
    pub timestamp: DateTime<Utc>,
}

/// A persisted event together with its store-assigned identifier.
///
/// The identifier is surfaced to API callers as a plain string. The event
/// fields are flattened so the wire shape is a single flat object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredEvent {
    /// Store-assigned identifier (stringified append sequence number).
    pub id: String,

    /// The event record itself.
    #[serde(flatten)]
    pub event: Event,
}
