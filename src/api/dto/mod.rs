//! Data Transfer Objects for REST request parameters.
//!
//! Response bodies reuse the domain and persistence types directly.

pub mod history_dto;
pub mod weather_dto;

pub use history_dto::*;
pub use weather_dto::*;
