//! Search history handler.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::HistoryParams;
use crate::app_state::AppState;
use crate::error::{ErrorResponse, GatewayError};
use crate::persistence::SearchRecord;

/// `GET /api/history` — Most recent searches, newest first.
///
/// # Errors
///
/// Returns [`GatewayError::StoreUnavailable`] if the ledger cannot be read.
#[utoipa::path(
    get,
    path = "/api/history",
    tag = "History",
    summary = "Recent searches",
    description = "Returns the most recent successful current-conditions lookups, newest first.",
    params(HistoryParams),
    responses(
        (status = 200, description = "Recent searches", body = Vec<SearchRecord>),
        (status = 400, description = "Malformed limit", body = ErrorResponse),
        (status = 500, description = "Search history unavailable", body = ErrorResponse),
    )
)]
pub async fn get_history(
    State(state): State<AppState>,
    params: Result<Query<HistoryParams>, QueryRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let Query(params) = params.map_err(|e| GatewayError::invalid_query(e.body_text()))?;
    let records = state.ledger.recent(params.clamped_limit()).await?;
    Ok(Json(records))
}

/// History routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/history", get(get_history))
}
