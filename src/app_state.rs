//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::persistence::SearchLedger;
use crate::service::WeatherService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Weather service for provider lookups.
    pub weather_service: Arc<WeatherService>,
    /// Search ledger for history reads and health checks.
    pub ledger: Arc<dyn SearchLedger>,
}
