//! Gateway error types with HTTP status code mapping.
//!
//! [`GatewayError`] is the central error type for the gateway. Each variant
//! maps to a specific HTTP status code and a flat JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": "City not found",
///   "details": "city not found"
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
    /// Message reported by the weather provider, when one was returned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// | Variant               | Cause    | HTTP Status               |
/// |-----------------------|----------|---------------------------|
/// | `InvalidQuery`        | client   | 400 Bad Request           |
/// | `NotFound`            | client   | 404 Not Found             |
/// | `UpstreamConfig`      | operator | 500 Internal Server Error |
/// | `UpstreamUnavailable` | provider | 500 Internal Server Error |
/// | `StoreUnavailable`    | database | 500 Internal Server Error |
/// | `Internal`            | gateway  | 500 Internal Server Error |
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Neither a city nor a valid coordinate pair was supplied.
    #[error("{0}")]
    InvalidQuery(String),

    /// The provider does not know the requested location.
    #[error("City not found")]
    NotFound {
        /// Provider message, if any.
        details: Option<String>,
    },

    /// The provider rejected the API key, or no key is configured.
    #[error("Weather provider rejected the configured API key")]
    UpstreamConfig {
        /// Provider message, if any.
        details: Option<String>,
    },

    /// Any other provider failure: non-success status, network error or
    /// an undecodable body. Safe to retry client-side.
    #[error("Failed to fetch weather data")]
    UpstreamUnavailable {
        /// Provider message, if any.
        details: Option<String>,
    },

    /// The search history store could not be reached.
    #[error("Failed to fetch search history")]
    StoreUnavailable(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Shorthand for an [`GatewayError::InvalidQuery`] with the given message.
    #[must_use]
    pub fn invalid_query(message: impl Into<String>) -> Self {
        Self::InvalidQuery(message.into())
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::UpstreamConfig { .. }
            | Self::UpstreamUnavailable { .. }
            | Self::StoreUnavailable(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the provider's own message for upstream failures.
    #[must_use]
    pub fn details(&self) -> Option<&str> {
        match self {
            Self::NotFound { details }
            | Self::UpstreamConfig { details }
            | Self::UpstreamUnavailable { details } => details.as_deref(),
            Self::InvalidQuery(_) | Self::StoreUnavailable(_) | Self::Internal(_) => None,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            Self::UpstreamConfig { details } => {
                tracing::error!(details = ?details, "weather provider rejected api key");
            }
            Self::UpstreamUnavailable { details } => {
                tracing::warn!(details = ?details, "weather provider unavailable");
            }
            Self::StoreUnavailable(cause) => {
                tracing::error!(%cause, "search history store unavailable");
            }
            Self::Internal(cause) => tracing::error!(%cause, "internal error"),
            Self::InvalidQuery(_) | Self::NotFound { .. } => {}
        }

        let body = ErrorResponse {
            error: self.to_string(),
            details: self.details().map(str::to_owned),
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

impl From<sqlx::Error> for GatewayError {
    fn from(err: sqlx::Error) -> Self {
        Self::StoreUnavailable(err.to_string())
    }
}
