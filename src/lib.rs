//! Hook Ledger - a GitHub webhook activity ledger.
//!
//! This library receives webhook deliveries, normalizes the payloads the
//! ledger tracks (pushes, pull request opens, merges) into a canonical event
//! record, persists them append-only, and serves the stored history through
//! a paginated read API.

pub mod config;
pub mod server;
pub mod store;
pub mod types;
pub mod webhooks;
