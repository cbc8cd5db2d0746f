//! Weather service: provider lookups, normalization and history recording.

use std::sync::Arc;

use crate::domain::{ForecastEntry, LocationQuery, Overview, WeatherReading};
use crate::error::GatewayError;
use crate::provider::WeatherProvider;

use super::history_writer::HistoryWriter;
use super::normalize::{current_reading, daily_forecast};

/// Orchestration layer for weather lookups.
///
/// Stateless coordinator: owns the [`WeatherProvider`] for outbound calls
/// and a [`HistoryWriter`] for recording searches. Every lookup follows
/// the pattern: call provider → normalize → (current only) enqueue
/// history → return result.
#[derive(Debug, Clone)]
pub struct WeatherService {
    provider: Arc<dyn WeatherProvider>,
    history: HistoryWriter,
}

impl WeatherService {
    /// Creates a new `WeatherService`.
    #[must_use]
    pub fn new(provider: Arc<dyn WeatherProvider>, history: HistoryWriter) -> Self {
        Self { provider, history }
    }

    /// Returns current conditions for `query` and records the search.
    ///
    /// Recording happens off the response path; a ledger failure never
    /// changes the result.
    ///
    /// # Errors
    ///
    /// Returns the classified provider failure: [`GatewayError::NotFound`],
    /// [`GatewayError::UpstreamConfig`] or
    /// [`GatewayError::UpstreamUnavailable`].
    pub async fn get_current(&self, query: &LocationQuery) -> Result<WeatherReading, GatewayError> {
        let payload = self.provider.current(query).await?;
        let reading = current_reading(payload);
        self.history.enqueue(&reading);

        tracing::info!(%query, city = %reading.city, "current conditions served");
        Ok(reading)
    }

    /// Returns up to five daily forecast entries for `query`, oldest first.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`WeatherService::get_current`].
    pub async fn get_forecast(
        &self,
        query: &LocationQuery,
    ) -> Result<Vec<ForecastEntry>, GatewayError> {
        let payload = self.provider.forecast(query).await?;
        let entries = daily_forecast(payload);

        tracing::info!(%query, days = entries.len(), "forecast served");
        Ok(entries)
    }

    /// Fetches current conditions and the forecast concurrently.
    ///
    /// The current reading is recorded like [`WeatherService::get_current`].
    ///
    /// # Errors
    ///
    /// Returns whichever provider call fails first.
    pub async fn get_overview(&self, query: &LocationQuery) -> Result<Overview, GatewayError> {
        let (current, forecast) =
            tokio::try_join!(self.provider.current(query), self.provider.forecast(query))?;

        let current = current_reading(current);
        self.history.enqueue(&current);

        Ok(Overview {
            current,
            forecast: daily_forecast(forecast),
        })
    }
}
