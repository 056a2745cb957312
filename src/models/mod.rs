//! Data models for surfcast
//!
//! - Beach: user-owned location with facing and coordinates
//! - Forecast: raw points, enriched points and time buckets

pub mod beach;
pub mod forecast;

// Re-export all public types for convenient access
pub use beach::{Beach, Position};
pub use forecast::{EnrichedForecastPoint, ForecastPoint, TimeForecast};
