//! GitHub webhook payload normalizer.
//!
//! This module maps raw webhook JSON payloads into the canonical [`Event`]
//! record. The platform multiplexes many lifecycle states onto few event
//! types; only three business-relevant transitions are tracked:
//!
//! - a push (`push` event)
//! - a pull request being opened (`pull_request` with action `opened`)
//! - a pull request being merged (`pull_request` with action `closed` and
//!   `merged` set)
//!
//! # Normalization Strategy
//!
//! 1. The event type is determined from the `X-GitHub-Event` header
//! 2. The payload is deserialized according to the event type
//! 3. Unknown event types and filtered sub-actions return `Ok(None)`
//!    (ignored, not error)
//! 4. Malformed payloads (missing required fields, invalid JSON) return
//!    `Err` with details
//!
//! Absence handling is deliberate per field: raw structs use `Option<T>`
//! where the platform may legitimately omit a field (`after`, `merged`) and
//! required types where absence means the payload is malformed
//! (`pusher.name`, `pull_request.id`).
//!
//! The caller supplies the clock reading for the event timestamp, keeping
//! normalization a pure function of `(event_type, payload, now)`.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use crate::types::{Event, EventAction};

/// Error type for normalization failures.
///
/// Missing required nested fields surface as `Json` errors via serde, the
/// same as structurally invalid payloads.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// JSON deserialization failed (includes missing required fields).
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Normalizes a webhook delivery into a canonical event.
///
/// # Arguments
///
/// * `event_type` - The value of the `X-GitHub-Event` header
/// * `payload` - The raw JSON payload bytes
/// * `now` - The instant to stamp on the produced event
///
/// # Returns
///
/// * `Ok(Some(event))` - The delivery maps to a tracked action
/// * `Ok(None)` - Unknown event type or filtered sub-action (ignored)
/// * `Err(e)` - Malformed payload for a recognized event type
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use hook_ledger::types::EventAction;
/// use hook_ledger::webhooks::normalize_webhook;
///
/// let payload = br#"{
///     "after": "abc123",
///     "pusher": { "name": "alice" },
///     "ref": "refs/heads/main"
/// }"#;
///
/// let event = normalize_webhook("push", payload, Utc::now())
///     .unwrap()
///     .unwrap();
/// assert_eq!(event.action, EventAction::Push);
/// assert_eq!(event.to_branch, "main");
/// ```
pub fn normalize_webhook(
    event_type: &str,
    payload: &[u8],
    now: DateTime<Utc>,
) -> Result<Option<Event>, NormalizeError> {
    match event_type {
        "push" => normalize_push(payload, now).map(Some),
        "pull_request" => normalize_pull_request(payload, now),
        // Unknown event types are ignored (not an error)
        _ => Ok(None),
    }
}

// ============================================================================
// Raw payload structures for deserialization
//
// These match GitHub's webhook JSON structure, restricted to the fields the
// ledger reads. Optionality is chosen per field: absence of an Option field
// is tolerated, absence of anything else is a malformed payload.
// ============================================================================

/// Raw `push` event payload.
#[derive(Debug, Deserialize)]
struct RawPushPayload {
    /// Commit SHA after the push. The platform may omit it (e.g. branch
    /// deletion), in which case the event carries an empty request id.
    after: Option<String>,
    pusher: RawPusher,
    #[serde(rename = "ref")]
    git_ref: String,
}

#[derive(Debug, Deserialize)]
struct RawPusher {
    name: String,
}

/// Raw `pull_request` event payload.
#[derive(Debug, Deserialize)]
struct RawPullRequestPayload {
    action: String,
    pull_request: RawPullRequest,
}

#[derive(Debug, Deserialize)]
struct RawPullRequest {
    id: u64,
    user: RawUser,
    head: RawBranchRef,
    base: RawBranchRef,
    /// Only present on `closed` deliveries; absent means not merged.
    #[serde(default)]
    merged: bool,
}

#[derive(Debug, Deserialize)]
struct RawUser {
    login: String,
}

#[derive(Debug, Deserialize)]
struct RawBranchRef {
    #[serde(rename = "ref")]
    branch: String,
}

/// Extracts the branch name from a fully-qualified git ref.
///
/// `refs/heads/main` becomes `main`. A ref without `/` is returned as-is.
fn branch_from_ref(git_ref: &str) -> &str {
    match git_ref.rsplit_once('/') {
        Some((_, branch)) => branch,
        None => git_ref,
    }
}

fn normalize_push(payload: &[u8], now: DateTime<Utc>) -> Result<Event, NormalizeError> {
    let raw: RawPushPayload = serde_json::from_slice(payload)?;

    Ok(Event {
        request_id: raw.after.unwrap_or_default(),
        author: raw.pusher.name,
        action: EventAction::Push,
        // Pushes carry no source branch concept
        from_branch: String::new(),
        to_branch: branch_from_ref(&raw.git_ref).to_string(),
        timestamp: now,
    })
}

fn normalize_pull_request(
    payload: &[u8],
    now: DateTime<Utc>,
) -> Result<Option<Event>, NormalizeError> {
    let raw: RawPullRequestPayload = serde_json::from_slice(payload)?;

    let action = match raw.action.as_str() {
        "opened" => EventAction::PullRequest,
        "closed" if raw.pull_request.merged => EventAction::Merge,
        // Every other sub-action (closed-without-merge, reopened,
        // synchronize, ...) is deliberately dropped
        _ => return Ok(None),
    };

    let pr = raw.pull_request;
    Ok(Some(Event {
        request_id: pr.id.to_string(),
        author: pr.user.login,
        action,
        from_branch: pr.head.branch,
        to_branch: pr.base.branch,
        timestamp: now,
    }))
}
