//! REST endpoint handlers organized by resource.

pub mod history;
pub mod system;
pub mod weather;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(weather::routes())
        .merge(history::routes())
        .merge(system::routes())
}
