//! Weather provider abstraction.
//!
//! [`WeatherProvider`] is the seam between the gateway and the external
//! weather service. The production implementation is
//! [`OpenWeatherClient`]; tests inject stubs.

pub mod openweather;
pub mod payload;

use std::fmt::Debug;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::domain::LocationQuery;
use crate::error::GatewayError;

pub use openweather::OpenWeatherClient;
pub use payload::{CurrentPayload, ForecastPayload};

/// Source of raw current-conditions and forecast payloads.
///
/// Implementations make a single outbound attempt per call and report
/// failures already classified into [`GatewayError`].
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Fetches current conditions for `query`.
    ///
    /// # Errors
    ///
    /// Returns the classified provider failure (see
    /// [`classify_provider_status`]).
    async fn current(&self, query: &LocationQuery) -> Result<CurrentPayload, GatewayError>;

    /// Fetches the multi-day, 3-hourly forecast for `query`.
    ///
    /// # Errors
    ///
    /// Returns the classified provider failure (see
    /// [`classify_provider_status`]).
    async fn forecast(&self, query: &LocationQuery) -> Result<ForecastPayload, GatewayError>;
}

/// Maps a non-success provider status to the gateway error taxonomy.
///
/// `404` means the location is unknown, `401` means the API key was
/// rejected; everything else is treated as the provider being unavailable.
/// `message` is the provider's own error text, forwarded as `details`.
#[must_use]
pub fn classify_provider_status(status: StatusCode, message: Option<String>) -> GatewayError {
    match status {
        StatusCode::NOT_FOUND => GatewayError::NotFound { details: message },
        StatusCode::UNAUTHORIZED => GatewayError::UpstreamConfig { details: message },
        _ => GatewayError::UpstreamUnavailable { details: message },
    }
}
