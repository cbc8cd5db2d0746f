//! Service layer: business logic orchestration.
//!
//! [`WeatherService`] performs provider lookups and normalization, and
//! hands successful current lookups to the [`HistoryWriter`].

pub mod history_writer;
pub mod normalize;
pub mod retention;
pub mod weather_service;

pub use history_writer::{HistoryWriter, HistoryWriterHandle};
pub use weather_service::WeatherService;
