//! Weather lookup handlers: current conditions, forecast, overview and
//! its display form.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::WeatherParams;
use crate::app_state::AppState;
use crate::domain::{ForecastEntry, LocationQuery, Overview, WeatherReading};
use crate::error::{ErrorResponse, GatewayError};
use crate::presentation::DisplayOverview;

/// `GET /api/weather` — Current conditions by city or coordinates.
///
/// # Errors
///
/// Returns [`GatewayError`] on a missing location, unknown city, or
/// provider failure.
#[utoipa::path(
    get,
    path = "/api/weather",
    tag = "Weather",
    summary = "Current conditions",
    description = "Looks up current conditions for a city, or for a latitude/longitude pair. Successful lookups are recorded in the search history.",
    params(WeatherParams),
    responses(
        (status = 200, description = "Current conditions", body = WeatherReading),
        (status = 400, description = "Neither city nor coordinates given", body = ErrorResponse),
        (status = 404, description = "City not found", body = ErrorResponse),
        (status = 500, description = "Provider or configuration failure", body = ErrorResponse),
    )
)]
pub async fn get_weather(
    State(state): State<AppState>,
    params: Result<Query<WeatherParams>, QueryRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let query = location_from(params)?;
    let reading = state.weather_service.get_current(&query).await?;
    Ok(Json(reading))
}

/// `GET /api/weather/{city}` — Current conditions by city path segment.
///
/// # Errors
///
/// Returns [`GatewayError`] on an unknown city or provider failure.
#[utoipa::path(
    get,
    path = "/api/weather/{city}",
    tag = "Weather",
    summary = "Current conditions for a city",
    description = "Path form of the current-conditions lookup.",
    params(
        ("city" = String, Path, description = "City name"),
    ),
    responses(
        (status = 200, description = "Current conditions", body = WeatherReading),
        (status = 400, description = "Blank city", body = ErrorResponse),
        (status = 404, description = "City not found", body = ErrorResponse),
        (status = 500, description = "Provider or configuration failure", body = ErrorResponse),
    )
)]
pub async fn get_weather_by_city(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<impl IntoResponse, GatewayError> {
    let query = LocationQuery::city(&city)?;
    let reading = state.weather_service.get_current(&query).await?;
    Ok(Json(reading))
}

/// `GET /api/forecast` — Daily forecast by city or coordinates.
///
/// # Errors
///
/// Returns [`GatewayError`] on a missing location, unknown city, or
/// provider failure.
#[utoipa::path(
    get,
    path = "/api/forecast",
    tag = "Weather",
    summary = "Five-day forecast",
    description = "Returns one forecast entry per day, at most five, in chronological order.",
    params(WeatherParams),
    responses(
        (status = 200, description = "Daily forecast", body = Vec<ForecastEntry>),
        (status = 400, description = "Neither city nor coordinates given", body = ErrorResponse),
        (status = 404, description = "City not found", body = ErrorResponse),
        (status = 500, description = "Provider or configuration failure", body = ErrorResponse),
    )
)]
pub async fn get_forecast(
    State(state): State<AppState>,
    params: Result<Query<WeatherParams>, QueryRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let query = location_from(params)?;
    let entries = state.weather_service.get_forecast(&query).await?;
    Ok(Json(entries))
}

/// `GET /api/overview` — Current conditions and forecast in one response.
///
/// # Errors
///
/// Returns [`GatewayError`] on a missing location, unknown city, or
/// provider failure.
#[utoipa::path(
    get,
    path = "/api/overview",
    tag = "Weather",
    summary = "Current conditions and forecast",
    description = "Fetches current conditions and the daily forecast concurrently. Fails if either lookup fails.",
    params(WeatherParams),
    responses(
        (status = 200, description = "Current conditions and forecast", body = Overview),
        (status = 400, description = "Neither city nor coordinates given", body = ErrorResponse),
        (status = 404, description = "City not found", body = ErrorResponse),
        (status = 500, description = "Provider or configuration failure", body = ErrorResponse),
    )
)]
pub async fn get_overview(
    State(state): State<AppState>,
    params: Result<Query<WeatherParams>, QueryRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let query = location_from(params)?;
    let overview = state.weather_service.get_overview(&query).await?;
    Ok(Json(overview))
}

/// `GET /api/display` — Overview rounded and decorated for rendering.
///
/// # Errors
///
/// Returns [`GatewayError`] on a missing location, unknown city, or
/// provider failure.
#[utoipa::path(
    get,
    path = "/api/display",
    tag = "Weather",
    summary = "Display-ready overview",
    description = "Same lookup as /api/overview, with temperatures rounded, icon URLs and glyphs filled in and a condition theme per reading.",
    params(WeatherParams),
    responses(
        (status = 200, description = "Display-ready overview", body = DisplayOverview),
        (status = 400, description = "Neither city nor coordinates given", body = ErrorResponse),
        (status = 404, description = "City not found", body = ErrorResponse),
        (status = 500, description = "Provider or configuration failure", body = ErrorResponse),
    )
)]
pub async fn get_display(
    State(state): State<AppState>,
    params: Result<Query<WeatherParams>, QueryRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let query = location_from(params)?;
    let overview = state.weather_service.get_overview(&query).await?;
    Ok(Json(DisplayOverview::from(&overview)))
}

fn location_from(
    params: Result<Query<WeatherParams>, QueryRejection>,
) -> Result<LocationQuery, GatewayError> {
    let Query(params) = params.map_err(|e| GatewayError::invalid_query(e.body_text()))?;
    params.to_query()
}

/// Weather routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/weather", get(get_weather))
        .route("/weather/{city}", get(get_weather_by_city))
        .route("/forecast", get(get_forecast))
        .route("/overview", get(get_overview))
        .route("/display", get(get_display))
}
