//! Database models for the search history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A stored row from the `weather_searches` table.
///
/// Rows are append-only: once written they are never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SearchRecord {
    /// Auto-increment row ID.
    pub id: i64,
    /// City name as reported by the provider.
    pub city: String,
    /// Temperature in °C at the time of the search.
    pub temperature: f64,
    /// Condition text at the time of the search.
    pub description: String,
    /// Server-side insertion timestamp.
    pub search_date: DateTime<Utc>,
}
