//! Normalized weather readings returned to API clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Current conditions for one location.
///
/// Values keep the provider's precision; rounding is a presentation
/// concern (see [`crate::presentation`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WeatherReading {
    /// Canonical city name as reported by the provider.
    pub city: String,
    /// ISO 3166 country code. Empty when the provider has none.
    pub country: String,
    /// Air temperature in °C.
    pub temperature: f64,
    /// Perceived temperature in °C.
    pub feels_like: f64,
    /// Relative humidity in percent.
    pub humidity: u32,
    /// Atmospheric pressure in hPa.
    pub pressure: u32,
    /// Short condition text, e.g. `"light rain"`.
    pub description: String,
    /// Provider icon code, e.g. `"10d"`.
    pub icon: String,
    /// Wind speed in m/s.
    pub wind_speed: f64,
}

/// One day of the multi-day forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ForecastEntry {
    /// Forecast timestamp (UTC).
    pub date: DateTime<Utc>,
    /// Canonical city name.
    pub city: String,
    /// ISO 3166 country code.
    pub country: String,
    /// Air temperature in °C.
    pub temperature: f64,
    /// Perceived temperature in °C.
    pub feels_like: f64,
    /// Relative humidity in percent.
    pub humidity: u32,
    /// Atmospheric pressure in hPa.
    pub pressure: u32,
    /// Short condition text.
    pub description: String,
    /// Provider icon code.
    pub icon: String,
    /// Wind speed in m/s.
    pub wind_speed: f64,
}

/// Current conditions and forecast for the same location, fetched together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Overview {
    /// Current conditions.
    pub current: WeatherReading,
    /// Up to five daily forecast entries, oldest first.
    pub forecast: Vec<ForecastEntry>,
}
