//! Location query parameters.

use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::LocationQuery;
use crate::error::GatewayError;

/// Query string for `/api/weather`, `/api/forecast` and `/api/overview`.
///
/// Supply either `city` or both `lat` and `lon`. Coordinates are kept as
/// strings so malformed numbers produce the gateway's JSON error body.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WeatherParams {
    /// City name, e.g. `London` or `London,GB`.
    #[serde(default)]
    pub city: Option<String>,
    /// Latitude in decimal degrees.
    #[serde(default)]
    pub lat: Option<String>,
    /// Longitude in decimal degrees.
    #[serde(default)]
    pub lon: Option<String>,
}

impl WeatherParams {
    /// Validates the parameters into a [`LocationQuery`].
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidQuery`] if neither a city nor a valid
    /// coordinate pair is present.
    pub fn to_query(&self) -> Result<LocationQuery, GatewayError> {
        LocationQuery::from_raw(
            self.city.as_deref(),
            self.lat.as_deref(),
            self.lon.as_deref(),
        )
    }
}
