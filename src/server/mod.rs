//! HTTP server for the webhook ledger.
//!
//! This module implements the HTTP server that:
//! - Accepts webhook deliveries, normalizes them, and persists tracked events
//! - Serves the stored history through a paginated read API
//! - Provides health checks for liveness probes
//!
//! # Endpoints
//!
//! - `POST /webhook/receiver` - Accepts webhook deliveries (201 stored,
//!   200 ignored)
//! - `GET /webhook/events?page=&limit=` - Returns a page of stored events,
//!   newest first
//! - `GET /health` - Returns 200 if server is running

use std::sync::Arc;

pub mod events;
pub mod health;
pub mod webhook;

pub use events::events_handler;
pub use health::health_handler;
pub use webhook::receiver_handler;

use crate::store::EventStore;

/// Shared application state.
///
/// This is passed to all handlers via Axum's `State` extractor. The store
/// is an explicit dependency injected at construction; handlers hold no
/// other state.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn EventStore>,
}

impl AppState {
    /// Creates a new `AppState` around a store handle.
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        AppState { store }
    }

    /// Returns the store collaborator.
    pub fn store(&self) -> &dyn EventStore {
        self.store.as_ref()
    }
}

/// Builds the axum Router with all endpoints.
pub fn build_router(app_state: AppState) -> axum::Router {
    use axum::routing::{get, post};

    axum::Router::new()
        .route("/webhook/receiver", post(receiver_handler))
        .route("/webhook/events", get(events_handler))
        .route("/health", get(health_handler))
        .with_state(app_state)
}
