//! # weather-gateway
//!
//! HTTP gateway in front of an OpenWeatherMap-compatible weather provider.
//!
//! The gateway validates location queries, forwards them to the provider,
//! normalizes current conditions and a five-day forecast into stable JSON
//! shapes, and records every successful current-conditions lookup in a
//! PostgreSQL search ledger.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── WeatherService (service/)
//!     │     ├── WeatherProvider ──► OpenWeatherMap (provider/)
//!     │     └── HistoryWriter ──┐
//!     │                         │ mpsc queue
//!     └── SearchLedger (persistence/) ◄─┘
//!           └── PostgreSQL
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod presentation;
pub mod provider;
pub mod service;
