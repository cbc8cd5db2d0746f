//! Domain layer: location queries and normalized weather readings.
//!
//! These types are provider-agnostic. The provider layer deserializes its
//! own wire format and the service layer maps it into these shapes.

pub mod location;
pub mod reading;

pub use location::LocationQuery;
pub use reading::{ForecastEntry, Overview, WeatherReading};
