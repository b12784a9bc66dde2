//! Paginated event listing endpoint handler.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::debug;

use super::AppState;
use crate::store::StoreError;
use crate::types::EventPage;

/// Default page number when the query parameter is absent.
const DEFAULT_PAGE: u64 = 1;
/// Default page size when the query parameter is absent.
const DEFAULT_LIMIT: u64 = 10;

/// Query parameters for the listing endpoint.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    page: Option<u64>,
    limit: Option<u64>,
}

/// Errors that can occur when listing events.
#[derive(Debug, Error)]
pub enum QueryError {
    /// `page` or `limit` was zero. Zero values would make the page-count
    /// computation divide by zero, so they are rejected rather than clamped.
    #[error("page and limit must be positive integers")]
    InvalidPagination,

    /// The store failed to serve the query.
    #[error("failed to query events: {0}")]
    Store(#[from] StoreError),
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            QueryError::InvalidPagination => (StatusCode::BAD_REQUEST, "invalid pagination"),
            QueryError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "database error"),
        };

        (
            status,
            Json(json!({ "error": error, "details": self.to_string() })),
        )
            .into_response()
    }
}

/// Event listing handler.
///
/// # Request
///
/// - Method: GET
/// - Query parameters: `page` (default 1), `limit` (default 10), both
///   positive integers. Non-numeric values are rejected by the extractor
///   with 400; zero values are rejected here with 400.
///
/// # Response
///
/// - 200 OK with an [`EventPage`] envelope; a `page` past the end of the
///   history yields empty `results` with otherwise-valid metadata
/// - 400 Bad Request `{"error","details"}` on invalid pagination input
/// - 500 Internal Server Error `{"error","details"}` on store failure
pub async fn events_handler(
    State(app_state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<EventPage>, QueryError> {
    let page = params.page.unwrap_or(DEFAULT_PAGE);
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);

    if page == 0 || limit == 0 {
        return Err(QueryError::InvalidPagination);
    }

    let skip = (page - 1)
        .checked_mul(limit)
        .ok_or(QueryError::InvalidPagination)?;

    let total_count = app_state.store().count()?;
    let total_pages = total_count.div_ceil(limit);
    let results = app_state.store().find_page(skip, limit)?;

    debug!(page, limit, total_count, returned = results.len(), "listed events");

    Ok(Json(EventPage {
        page,
        limit,
        total_count,
        total_pages,
        results,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_pagination_maps_to_400() {
        let response = QueryError::InvalidPagination.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn store_error_maps_to_500() {
        let err = QueryError::Store(StoreError::Io(std::io::Error::other("connection reset")));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn total_pages_uses_ceiling_division() {
        assert_eq!(25u64.div_ceil(10), 3);
        assert_eq!(30u64.div_ceil(10), 3);
        assert_eq!(0u64.div_ceil(10), 0);
        assert_eq!(1u64.div_ceil(10), 1);
    }
}
