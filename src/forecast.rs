//! Beach forecast aggregation
//!
//! Fetches the forecast points of every beach, merges each point with the
//! beach it belongs to and regroups everything by timestamp, so a caller gets
//! one bucket per moment holding every beach's conditions at that moment.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, error, info, instrument};

use crate::config::SurfcastConfig;
use crate::models::{Beach, EnrichedForecastPoint, ForecastPoint, TimeForecast};
use crate::rating::{ConstantRating, RatingScorer};
use crate::source::ForecastPointSource;
use crate::{Result, SurfcastError};

/// Aggregates beach forecasts from a point source
pub struct ForecastService {
    source: Arc<dyn ForecastPointSource>,
    scorer: Arc<dyn RatingScorer>,
}

impl ForecastService {
    /// Service rating every point with [`ConstantRating::default`]
    pub fn new(source: Arc<dyn ForecastPointSource>) -> Self {
        Self::with_scorer(source, Arc::new(ConstantRating::default()))
    }

    pub fn with_scorer(source: Arc<dyn ForecastPointSource>, scorer: Arc<dyn RatingScorer>) -> Self {
        Self { source, scorer }
    }

    /// Service using the configured default rating
    pub fn from_config(source: Arc<dyn ForecastPointSource>, config: &SurfcastConfig) -> Self {
        Self::with_scorer(
            source,
            Arc::new(ConstantRating(config.forecast.default_rating)),
        )
    }

    /// Fetch, enrich and group the forecast of every beach.
    ///
    /// Beaches are fetched one after another in input order. The first
    /// failure aborts the batch: nothing is returned for any beach and the
    /// error is reported as [`SurfcastError::ForecastProcessing`].
    #[instrument(skip_all, fields(beaches = beaches.len()))]
    pub async fn process_forecast_for_beaches(&self, beaches: &[Beach]) -> Result<Vec<TimeForecast>> {
        match self.collect_points(beaches).await {
            Ok(points) => {
                let total = points.len();
                let forecast = group_by_time(points);
                info!(
                    "Processed {} forecast points into {} time buckets",
                    total,
                    forecast.len()
                );
                Ok(forecast)
            }
            Err(e) => {
                error!("Forecast processing failed: {}", e);
                Err(SurfcastError::forecast_processing(e.message()))
            }
        }
    }

    async fn collect_points(&self, beaches: &[Beach]) -> Result<Vec<EnrichedForecastPoint>> {
        let mut points = Vec::new();

        for beach in beaches {
            let raw = self.source.fetch_points(beach.lat, beach.lng).await?;
            debug!(
                "Fetched {} points for beach {} ({})",
                raw.len(),
                beach.name,
                beach.format_coordinates()
            );
            points.extend(self.enrich_beach_data(beach, raw)?);
        }

        Ok(points)
    }

    fn enrich_beach_data(
        &self,
        beach: &Beach,
        points: Vec<ForecastPoint>,
    ) -> Result<Vec<EnrichedForecastPoint>> {
        points
            .into_iter()
            .map(|point| {
                let rating = self.scorer.rate(beach, &point);
                EnrichedForecastPoint::enrich(beach, point, rating)
            })
            .collect()
    }
}

/// Bucket points by `time`.
///
/// Buckets come out in order of each timestamp's first appearance and keep
/// their points in input order; nothing is sorted.
#[must_use]
pub fn group_by_time(points: Vec<EnrichedForecastPoint>) -> Vec<TimeForecast> {
    let mut buckets: Vec<TimeForecast> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for point in points {
        if let Some(&i) = index.get(&point.time) {
            buckets[i].forecast.push(point);
            continue;
        }
        index.insert(point.time.clone(), buckets.len());
        buckets.push(TimeForecast {
            time: point.time.clone(),
            forecast: vec![point],
        });
    }

    buckets
}
