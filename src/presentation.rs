//! Presentation helpers for rendering layers.
//!
//! The API returns raw provider precision; anything that displays readings
//! (web front-end, CLI, widgets) rounds and decorates them here so every
//! renderer shows the same thing. `GET /api/display` serves an
//! [`Overview`] already passed through these helpers.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{ForecastEntry, Overview, WeatherReading};

const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// Provider icon image size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconSize {
    /// 50×50 image, used in forecast lists.
    Small,
    /// 100×100 image, used for current conditions.
    Large,
}

/// Builds the provider's icon image URL for `icon` (e.g. `"10d"`).
#[must_use]
pub fn icon_url(icon: &str, size: IconSize) -> String {
    match size {
        IconSize::Small => format!("{ICON_BASE_URL}/{icon}.png"),
        IconSize::Large => format!("{ICON_BASE_URL}/{icon}@2x.png"),
    }
}

/// Maps a provider icon code to a text glyph for terminal-style output.
#[must_use]
pub fn icon_glyph(icon: &str) -> &'static str {
    match icon {
        "01d" => "☀️",
        "01n" => "🌙",
        "02d" => "⛅",
        "02n" | "03d" | "03n" | "04d" | "04n" => "☁️",
        "09d" | "09n" => "🌧️",
        "10d" | "10n" => "🌦️",
        "11d" | "11n" => "⛈️",
        "13d" | "13n" => "❄️",
        "50d" | "50n" => "🌫️",
        _ => "🌡️",
    }
}

/// Rounds a temperature to the nearest whole degree for display.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn display_temperature(celsius: f64) -> i64 {
    celsius.round() as i64
}

/// Broad condition family, for picking a background or colour scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ConditionTheme {
    /// Clear sky.
    Clear,
    /// Any cloud cover.
    Clouds,
    /// Rain or drizzle.
    Rain,
    /// Thunderstorms.
    Thunderstorm,
    /// Snow.
    Snow,
    /// Mist, fog, haze and anything unrecognised.
    Other,
}

impl ConditionTheme {
    /// Classifies a provider description such as `"light rain"`.
    ///
    /// Thunderstorms win over rain, so `"thunderstorm with light rain"`
    /// is a thunderstorm.
    #[must_use]
    pub fn classify(description: &str) -> Self {
        let d = description.to_ascii_lowercase();
        if d.contains("thunderstorm") {
            Self::Thunderstorm
        } else if d.contains("snow") || d.contains("sleet") {
            Self::Snow
        } else if d.contains("rain") || d.contains("drizzle") {
            Self::Rain
        } else if d.contains("cloud") {
            Self::Clouds
        } else if d.contains("clear") {
            Self::Clear
        } else {
            Self::Other
        }
    }
}

/// A [`WeatherReading`] prepared for display.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DisplayReading {
    /// `"City, CC"`, or just the city when the country is unknown.
    pub location: String,
    /// Rounded temperature in °C.
    pub temperature: i64,
    /// Rounded perceived temperature in °C.
    pub feels_like: i64,
    /// Relative humidity in percent.
    pub humidity: u32,
    /// Pressure in hPa.
    pub pressure: u32,
    /// Wind speed in m/s, one decimal.
    pub wind_speed: String,
    /// Condition text.
    pub description: String,
    /// Large icon URL.
    pub icon_url: String,
    /// Text glyph for the icon.
    pub glyph: String,
    /// Condition family.
    pub theme: ConditionTheme,
}

impl From<&WeatherReading> for DisplayReading {
    fn from(reading: &WeatherReading) -> Self {
        let location = if reading.country.is_empty() {
            reading.city.clone()
        } else {
            format!("{}, {}", reading.city, reading.country)
        };
        Self {
            location,
            temperature: display_temperature(reading.temperature),
            feels_like: display_temperature(reading.feels_like),
            humidity: reading.humidity,
            pressure: reading.pressure,
            wind_speed: format!("{:.1}", reading.wind_speed),
            description: reading.description.clone(),
            icon_url: icon_url(&reading.icon, IconSize::Large),
            glyph: icon_glyph(&reading.icon).to_string(),
            theme: ConditionTheme::classify(&reading.description),
        }
    }
}

/// A [`ForecastEntry`] prepared for a forecast strip.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DisplayForecastDay {
    /// Short day label, e.g. `"Mon, Jan 15"`.
    pub day: String,
    /// Rounded temperature in °C.
    pub temperature: i64,
    /// Rounded perceived temperature in °C.
    pub feels_like: i64,
    /// Condition text.
    pub description: String,
    /// Small icon URL.
    pub icon_url: String,
}

impl From<&ForecastEntry> for DisplayForecastDay {
    fn from(entry: &ForecastEntry) -> Self {
        Self {
            day: entry.date.format("%a, %b %-d").to_string(),
            temperature: display_temperature(entry.temperature),
            feels_like: display_temperature(entry.feels_like),
            description: entry.description.clone(),
            icon_url: icon_url(&entry.icon, IconSize::Small),
        }
    }
}

/// An [`Overview`] prepared for display.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DisplayOverview {
    /// Current conditions.
    pub current: DisplayReading,
    /// One entry per forecast day, oldest first.
    pub forecast: Vec<DisplayForecastDay>,
}

impl From<&Overview> for DisplayOverview {
    fn from(overview: &Overview) -> Self {
        Self {
            current: DisplayReading::from(&overview.current),
            forecast: overview.forecast.iter().map(DisplayForecastDay::from).collect(),
        }
    }
}
