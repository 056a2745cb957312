//! Pluggable rating for enriched forecast points

use crate::models::{Beach, ForecastPoint};

/// Rating used when no scorer is configured
pub const DEFAULT_RATING: f64 = 1.0;

/// Scores a forecast point for the beach it belongs to.
///
/// The value is only a default: a `rating` field already present on the raw
/// point replaces it during enrichment.
pub trait RatingScorer: Send + Sync {
    fn rate(&self, beach: &Beach, point: &ForecastPoint) -> f64;
}

/// Gives every point the same rating
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantRating(pub f64);

impl Default for ConstantRating {
    fn default() -> Self {
        Self(DEFAULT_RATING)
    }
}

impl RatingScorer for ConstantRating {
    fn rate(&self, _beach: &Beach, _point: &ForecastPoint) -> f64 {
        self.0
    }
}
