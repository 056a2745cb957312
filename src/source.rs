//! Forecast-point sources
//!
//! The aggregator only depends on [`ForecastPointSource`]. Real providers
//! live outside this crate; [`InMemoryPointSource`] serves preloaded points.

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::debug;

use crate::models::ForecastPoint;
use crate::{Result, SurfcastError};

/// Supplies the forecast points for a coordinate pair.
///
/// Implementations own timeouts and retries; failures should be reported as
/// [`SurfcastError::SourceFetch`].
#[async_trait]
pub trait ForecastPointSource: Send + Sync {
    async fn fetch_points(&self, lat: f64, lng: f64) -> Result<Vec<ForecastPoint>>;
}

/// Coordinates rounded to 4 decimal places, stored as integers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CoordinateKey {
    lat: i64,
    lng: i64,
}

impl CoordinateKey {
    const PRECISION: f64 = 10_000.0;

    fn new(lat: f64, lng: f64) -> Option<Self> {
        if !lat.is_finite() || !lng.is_finite() {
            return None;
        }
        // Valid coordinates are far inside the i64 range after scaling
        Some(Self {
            lat: (lat * Self::PRECISION).round() as i64,
            lng: (lng * Self::PRECISION).round() as i64,
        })
    }
}

/// Point source backed by a fixed table of coordinates
#[derive(Debug, Default, Clone)]
pub struct InMemoryPointSource {
    points: HashMap<CoordinateKey, Vec<ForecastPoint>>,
}

impl InMemoryPointSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the points served for a coordinate pair, replacing earlier ones
    pub fn insert(&mut self, lat: f64, lng: f64, points: Vec<ForecastPoint>) -> Result<()> {
        let key = CoordinateKey::new(lat, lng).ok_or_else(|| {
            SurfcastError::validation(format!("invalid coordinates: lat={lat}, lng={lng}"))
        })?;
        self.points.insert(key, points);
        Ok(())
    }

    /// Builder variant of [`InMemoryPointSource::insert`]
    pub fn with_points(mut self, lat: f64, lng: f64, points: Vec<ForecastPoint>) -> Result<Self> {
        self.insert(lat, lng, points)?;
        Ok(self)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[async_trait]
impl ForecastPointSource for InMemoryPointSource {
    async fn fetch_points(&self, lat: f64, lng: f64) -> Result<Vec<ForecastPoint>> {
        let key = CoordinateKey::new(lat, lng).ok_or_else(|| {
            SurfcastError::source_fetch(format!("invalid coordinates: lat={lat}, lng={lng}"))
        })?;

        match self.points.get(&key) {
            Some(points) => {
                debug!("Serving {} stored points for {:.4}, {:.4}", points.len(), lat, lng);
                Ok(points.clone())
            }
            None => Err(SurfcastError::source_fetch(format!(
                "no forecast available for {lat:.4}, {lng:.4}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_serves_points_for_rounded_coordinates() {
        let source = InMemoryPointSource::new()
            .with_points(-33.792_726, 151.289_824, vec![ForecastPoint::new("t1")])
            .unwrap();

        let points = source.fetch_points(-33.792_71, 151.289_81).await.unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].time, "t1");
    }

    #[tokio::test]
    async fn test_unknown_coordinates_fail() {
        let source = InMemoryPointSource::new();
        let err = source.fetch_points(1.0, 2.0).await.unwrap_err();
        assert!(matches!(err, SurfcastError::SourceFetch { .. }));
        assert!(err.to_string().contains("1.0000, 2.0000"));
    }

    #[tokio::test]
    async fn test_non_finite_coordinates_fail() {
        let source = InMemoryPointSource::new();
        let err = source.fetch_points(f64::NAN, 2.0).await.unwrap_err();
        assert!(matches!(err, SurfcastError::SourceFetch { .. }));
    }

    #[test]
    fn test_insert_replaces_previous_points() {
        let mut source = InMemoryPointSource::new();
        source.insert(1.0, 2.0, vec![ForecastPoint::new("t1")]).unwrap();
        source
            .insert(1.0, 2.0, vec![ForecastPoint::new("t2"), ForecastPoint::new("t3")])
            .unwrap();
        assert_eq!(source.len(), 1);
        assert!(source.insert(f64::INFINITY, 0.0, vec![]).is_err());
    }
}
