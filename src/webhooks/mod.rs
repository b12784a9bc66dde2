//! Webhook handling for GitHub events.
//!
//! This module provides the normalizer that maps raw webhook deliveries
//! into canonical event records, or an ignore outcome for deliveries the
//! ledger does not track.

pub mod normalize;


pub use normalize::{NormalizeError, normalize_webhook};
