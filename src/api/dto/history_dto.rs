//! Search history query parameters.

use serde::Deserialize;
use utoipa::IntoParams;

/// Default number of history records returned.
pub const DEFAULT_HISTORY_LIMIT: u32 = 10;

/// Upper bound on `limit`.
pub const MAX_HISTORY_LIMIT: u32 = 100;

/// Query string for `/api/history`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HistoryParams {
    /// Number of records to return (1-100). Defaults to 10.
    #[serde(default)]
    pub limit: Option<u32>,
}

impl HistoryParams {
    /// Returns `limit` clamped to `1..=100`, or the default.
    #[must_use]
    pub fn clamped_limit(&self) -> u32 {
        self.limit
            .unwrap_or(DEFAULT_HISTORY_LIMIT)
            .clamp(1, MAX_HISTORY_LIMIT)
    }
}
