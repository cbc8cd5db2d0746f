//! Validated location query.
//!
//! [`LocationQuery`] is the only way the service layer accepts a location.
//! Construction from raw request parameters rejects incomplete or
//! out-of-range input, so an invalid query never reaches the provider.

use std::fmt;

use crate::error::GatewayError;

const MISSING_LOCATION: &str = "Please provide city or coordinates";

/// A location to look weather up for: a city name or a coordinate pair.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    /// Free-form city name, e.g. `"London"` or `"London,GB"`.
    City(String),
    /// Geographic coordinates in decimal degrees.
    Coordinates {
        /// Latitude, -90..=90.
        lat: f64,
        /// Longitude, -180..=180.
        lon: f64,
    },
}

impl LocationQuery {
    /// Builds a query from raw request parameters.
    ///
    /// Blank values count as absent. When both `lat` and `lon` are
    /// present the coordinates are used and `city` is ignored; otherwise a
    /// non-blank `city` is required.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidQuery`] when neither form is present,
    /// when a coordinate is not a finite number, or when it is out of range.
    pub fn from_raw(
        city: Option<&str>,
        lat: Option<&str>,
        lon: Option<&str>,
    ) -> Result<Self, GatewayError> {
        match (non_blank(lat), non_blank(lon)) {
            (Some(lat), Some(lon)) => {
                let lat = parse_coordinate("lat", lat, 90.0)?;
                let lon = parse_coordinate("lon", lon, 180.0)?;
                Ok(Self::Coordinates { lat, lon })
            }
            _ => non_blank(city)
                .map(|c| Self::City(c.to_string()))
                .ok_or_else(|| GatewayError::invalid_query(MISSING_LOCATION)),
        }
    }

    /// Builds a city query from a path segment.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidQuery`] if `name` is blank.
    pub fn city(name: &str) -> Result<Self, GatewayError> {
        Self::from_raw(Some(name), None, None)
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::City(name) => write!(f, "{name}"),
            Self::Coordinates { lat, lon } => write!(f, "{lat},{lon}"),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_coordinate(name: &str, raw: &str, bound: f64) -> Result<f64, GatewayError> {
    let value: f64 = raw
        .parse()
        .map_err(|_| GatewayError::invalid_query(format!("invalid {name}: {raw}")))?;
    if !value.is_finite() || value.abs() > bound {
        return Err(GatewayError::invalid_query(format!(
            "{name} must be between -{bound} and {bound}"
        )));
    }
    Ok(value)
}
