//! System endpoints: health check.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::app_state::AppState;

/// Reachability of the search history store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum DatabaseStatus {
    /// The store answered a probe query.
    Connected,
    /// The probe failed.
    Disconnected,
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always `"OK"` while the process is serving requests.
    pub status: String,
    /// Search history store reachability.
    pub database: DatabaseStatus,
    /// Crate version.
    pub version: String,
    /// Current server time (RFC 3339).
    pub timestamp: String,
}

/// `GET /api/health` — Service health status.
///
/// Always answers 200; a store outage shows up as `"Disconnected"`.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service status, search history store reachability, version and current timestamp.",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let database = match state.ledger.ping().await {
        Ok(()) => DatabaseStatus::Connected,
        Err(e) => {
            tracing::warn!(error = %e, "health probe: store unreachable");
            DatabaseStatus::Disconnected
        }
    };

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "OK".to_string(),
            database,
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }),
    )
}

/// System routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_handler))
}
