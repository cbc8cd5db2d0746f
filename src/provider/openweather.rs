//! OpenWeatherMap HTTP client.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use super::payload::{CurrentPayload, ForecastPayload, ProviderErrorPayload};
use super::{WeatherProvider, classify_provider_status};
use crate::domain::LocationQuery;
use crate::error::GatewayError;

/// Public OpenWeatherMap API root.
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// [`WeatherProvider`] backed by the OpenWeatherMap REST API.
///
/// All requests ask for metric units. The API key is sent as the `appid`
/// query parameter and is never logged.
#[derive(Clone)]
pub struct OpenWeatherClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenWeatherClient {
    /// Creates a client for `base_url` with a per-request `timeout`.
    ///
    /// A missing or blank `api_key` is accepted here; every lookup then
    /// fails with [`GatewayError::UpstreamConfig`] without calling out.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Internal`] if the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Internal(format!("failed to build http client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    fn request_url(
        &self,
        endpoint: &str,
        query: &LocationQuery,
        api_key: &str,
    ) -> Result<Url, GatewayError> {
        let mut params: Vec<(&str, String)> = match query {
            LocationQuery::City(name) => vec![("q", name.clone())],
            LocationQuery::Coordinates { lat, lon } => {
                vec![("lat", lat.to_string()), ("lon", lon.to_string())]
            }
        };
        params.push(("appid", api_key.to_string()));
        params.push(("units", "metric".to_string()));

        Url::parse_with_params(&format!("{}/{endpoint}", self.base_url), &params)
            .map_err(|e| GatewayError::Internal(format!("invalid provider url: {e}")))
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &LocationQuery,
    ) -> Result<T, GatewayError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(GatewayError::UpstreamConfig {
                details: Some("WEATHER_API_KEY is not set".to_string()),
            });
        };
        let url = self.request_url(endpoint, query, api_key)?;

        let response = self.http.get(url).send().await.map_err(|e| {
            let e = e.without_url();
            tracing::warn!(endpoint, %query, error = %e, "weather provider request failed");
            GatewayError::UpstreamUnavailable { details: None }
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            let e = e.without_url();
            tracing::warn!(endpoint, %query, error = %e, "failed to read provider response");
            GatewayError::UpstreamUnavailable { details: None }
        })?;

        if !status.is_success() {
            let message = serde_json::from_str::<ProviderErrorPayload>(&body)
                .ok()
                .and_then(|p| p.message);
            tracing::debug!(endpoint, %query, %status, ?message, "provider returned error");
            return Err(classify_provider_status(status, message));
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(endpoint, %query, error = %e, "failed to decode provider response");
            GatewayError::UpstreamUnavailable {
                details: Some(format!("unexpected provider response: {e}")),
            }
        })
    }
}

impl fmt::Debug for OpenWeatherClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherClient")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current(&self, query: &LocationQuery) -> Result<CurrentPayload, GatewayError> {
        self.fetch("weather", query).await
    }

    async fn forecast(&self, query: &LocationQuery) -> Result<ForecastPayload, GatewayError> {
        self.fetch("forecast", query).await
    }
}
