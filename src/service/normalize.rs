//! Reshapes provider payloads into the gateway's normalized readings.

use chrono::{DateTime, Utc};

use crate::domain::{ForecastEntry, WeatherReading};
use crate::provider::payload::{ConditionPayload, CurrentPayload, ForecastPayload};

/// Forecast steps per day at the provider's 3-hour granularity.
pub const FORECAST_STEP: usize = 8;

/// Maximum number of daily forecast entries returned.
pub const MAX_FORECAST_DAYS: usize = 5;

const UNKNOWN_CONDITION: &str = "Unknown";

/// Maps a current-conditions payload to a [`WeatherReading`].
///
/// Numeric values are copied unchanged. The first entry of the provider's
/// `weather` array supplies the description and icon.
#[must_use]
pub fn current_reading(payload: CurrentPayload) -> WeatherReading {
    let (description, icon) = primary_condition(&payload.weather);
    WeatherReading {
        city: payload.name,
        country: payload.sys.country,
        temperature: payload.main.temp,
        feels_like: payload.main.feels_like,
        humidity: payload.main.humidity,
        pressure: payload.main.pressure,
        description,
        icon,
        wind_speed: payload.wind.speed,
    }
}

/// Selects one forecast step per day from a 3-hourly forecast.
///
/// Steps are ordered by timestamp, then every [`FORECAST_STEP`]th step is
/// kept, up to [`MAX_FORECAST_DAYS`] entries. Steps with an unrepresentable
/// timestamp are skipped.
#[must_use]
pub fn daily_forecast(payload: ForecastPayload) -> Vec<ForecastEntry> {
    let ForecastPayload { mut list, city } = payload;
    list.sort_by_key(|item| item.dt);

    list.into_iter()
        .step_by(FORECAST_STEP)
        .take(MAX_FORECAST_DAYS)
        .filter_map(|item| {
            let date = DateTime::<Utc>::from_timestamp(item.dt, 0)?;
            let (description, icon) = primary_condition(&item.weather);
            Some(ForecastEntry {
                date,
                city: city.name.clone(),
                country: city.country.clone(),
                temperature: item.main.temp,
                feels_like: item.main.feels_like,
                humidity: item.main.humidity,
                pressure: item.main.pressure,
                description,
                icon,
                wind_speed: item.wind.speed,
            })
        })
        .collect()
}

fn primary_condition(conditions: &[ConditionPayload]) -> (String, String) {
    conditions.first().map_or_else(
        || (UNKNOWN_CONDITION.to_string(), String::new()),
        |c| (c.description.clone(), c.icon.clone()),
    )
}
