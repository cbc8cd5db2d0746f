//! OpenWeatherMap wire format (`/weather` and `/forecast`, metric units).
//!
//! Only the fields the gateway reads are modelled; everything else in the
//! provider response is ignored.

use serde::Deserialize;

/// `main` block: thermodynamic values.
#[derive(Debug, Clone, Deserialize)]
pub struct MainPayload {
    /// Temperature in °C.
    pub temp: f64,
    /// Perceived temperature in °C.
    pub feels_like: f64,
    /// Relative humidity in percent.
    pub humidity: u32,
    /// Pressure in hPa.
    pub pressure: u32,
}

/// One entry of the `weather` array.
#[derive(Debug, Clone, Deserialize)]
pub struct ConditionPayload {
    /// Condition text, e.g. `"light rain"`.
    pub description: String,
    /// Icon code, e.g. `"10d"`.
    pub icon: String,
}

/// `wind` block.
#[derive(Debug, Clone, Deserialize)]
pub struct WindPayload {
    /// Wind speed in m/s.
    pub speed: f64,
}

/// `sys` block of the current-conditions response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SysPayload {
    /// ISO 3166 country code. Absent for some coordinate lookups.
    #[serde(default)]
    pub country: String,
}

/// Body of `GET /weather`.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentPayload {
    /// City name.
    #[serde(default)]
    pub name: String,
    /// Country block.
    #[serde(default)]
    pub sys: SysPayload,
    /// Thermodynamic values.
    pub main: MainPayload,
    /// Conditions, most significant first.
    #[serde(default)]
    pub weather: Vec<ConditionPayload>,
    /// Wind.
    pub wind: WindPayload,
}

/// One 3-hourly step of the forecast list.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastItemPayload {
    /// Unix timestamp (seconds, UTC).
    pub dt: i64,
    /// Thermodynamic values.
    pub main: MainPayload,
    /// Conditions, most significant first.
    #[serde(default)]
    pub weather: Vec<ConditionPayload>,
    /// Wind.
    pub wind: WindPayload,
}

/// `city` block of the forecast response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastCityPayload {
    /// City name.
    #[serde(default)]
    pub name: String,
    /// ISO 3166 country code.
    #[serde(default)]
    pub country: String,
}

/// Body of `GET /forecast`.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastPayload {
    /// 3-hourly steps.
    #[serde(default)]
    pub list: Vec<ForecastItemPayload>,
    /// Location the forecast is for.
    #[serde(default)]
    pub city: ForecastCityPayload,
}

/// Error body returned by the provider, e.g.
/// `{"cod":"404","message":"city not found"}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderErrorPayload {
    /// Human-readable failure reason.
    #[serde(default)]
    pub message: Option<String>,
}
