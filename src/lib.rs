//! `surfcast` - Marine forecast aggregation for user-owned beaches
//!
//! Fetches forecast points for each beach, tags them with the beach they
//! belong to and a rating, and regroups everything by timestamp.

pub mod config;
pub mod error;
pub mod forecast;
pub mod models;
pub mod rating;
pub mod source;
pub mod telemetry;

// Re-export core types for public API
pub use crate::config::SurfcastConfig;
pub use error::{ErrorResponse, SurfcastError};
pub use forecast::{ForecastService, group_by_time};
pub use models::{Beach, EnrichedForecastPoint, ForecastPoint, Position, TimeForecast};
pub use rating::{ConstantRating, RatingScorer};
pub use source::{ForecastPointSource, InMemoryPointSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, SurfcastError>;
