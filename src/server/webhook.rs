//! Webhook ingestion endpoint handler.
//!
//! Accepts GitHub webhook deliveries, normalizes them into canonical events,
//! and appends tracked events to the store. Deliveries outside the tracked
//! set are acknowledged without a write.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::AppState;
use crate::store::StoreError;
use crate::webhooks::{NormalizeError, normalize_webhook};

/// Header name for GitHub event type.
const HEADER_EVENT: &str = "x-github-event";

/// Errors that can occur when processing a webhook.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The payload was malformed for a recognized event type.
    #[error("failed to normalize payload: {0}")]
    Normalize(#[from] NormalizeError),

    /// The store rejected the write.
    #[error("failed to store event: {0}")]
    Store(#[from] StoreError),
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        // No input validation layer precedes this handler, so malformed
        // input surfaces as an internal error alongside store failures.
        let error = match &self {
            WebhookError::Normalize(_) => "processing error",
            WebhookError::Store(_) => "database error",
        };

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": error, "details": self.to_string() })),
        )
            .into_response()
    }
}

/// Webhook ingestion handler.
///
/// # Request
///
/// - Method: POST
/// - Header `X-GitHub-Event`: event type (e.g. "push", "pull_request").
///   A missing header is treated as an unrecognized event type.
/// - Body: JSON webhook payload
///
/// # Response
///
/// - 201 Created `{"status":"stored"}`: a tracked event was persisted
/// - 200 OK `{"message":"Event ignored"}`: delivery outside the tracked set
/// - 500 Internal Server Error `{"error","details"}`: malformed payload or
///   store failure
///
/// Redelivery of the same webhook stores a duplicate event; deduplication
/// is out of scope.
pub async fn receiver_handler(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, WebhookError> {
    let event_type = headers
        .get(HEADER_EVENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    debug!(event_type, "received webhook");

    match normalize_webhook(event_type, &body, Utc::now()) {
        Ok(Some(event)) => {
            let stored = app_state.store().insert(&event)?;
            info!(
                id = %stored.id,
                action = %event.action,
                author = %event.author,
                to_branch = %event.to_branch,
                "event stored"
            );
            Ok((StatusCode::CREATED, Json(json!({ "status": "stored" }))).into_response())
        }
        Ok(None) => {
            debug!(event_type, "event ignored");
            Ok((StatusCode::OK, Json(json!({ "message": "Event ignored" }))).into_response())
        }
        Err(e) => {
            warn!(event_type, error = %e, "failed to normalize webhook");
            Err(e.into())
        }
    }
}
