//! OpenAPI document for the REST API.

use utoipa::OpenApi;

use super::handlers::{history, system, weather};

/// Aggregated OpenAPI specification.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "weather-gateway",
        description = "Current conditions, daily forecast and search history backed by an OpenWeatherMap-compatible provider."
    ),
    paths(
        weather::get_weather,
        weather::get_weather_by_city,
        weather::get_forecast,
        weather::get_overview,
        weather::get_display,
        history::get_history,
        system::health_handler,
    ),
    tags(
        (name = "Weather", description = "Provider lookups"),
        (name = "History", description = "Recorded searches"),
        (name = "System", description = "Service status"),
    )
)]
pub struct ApiDoc;
