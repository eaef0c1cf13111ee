// Aggregation service - Reduce a region's weather series to one scalar
use crate::application::weather_repository::WeatherRepository;
use crate::domain::geometry::{LonLat, centroid};
use chrono::{DateTime, Utc};
use std::sync::Arc;

#[derive(Clone)]
pub struct AggregationService {
    repository: Arc<dyn WeatherRepository>,
}

impl AggregationService {
    pub fn new(repository: Arc<dyn WeatherRepository>) -> Self {
        Self { repository }
    }

    /// Representative value for a polygon over a time window: the mean of
    /// the hourly series at the vertex centroid, rounded to one decimal.
    /// An empty series is normalized to 0. Request bounds are truncated to
    /// day granularity, matching the provider's date parameters.
    pub async fn aggregate(
        &self,
        vertices: &[LonLat],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        field: &str,
    ) -> anyhow::Result<f64> {
        let center = centroid(vertices);
        let samples = self
            .repository
            .fetch_hourly(
                center.lat,
                center.lon,
                start.date_naive(),
                end.date_naive(),
                field,
            )
            .await?;

        if samples.is_empty() {
            return Ok(0.0);
        }

        let mean = samples.iter().map(|s| s.value).sum::<f64>() / samples.len() as f64;
        Ok(round_to_tenth(mean))
    }
}

/// Round half away from zero at one decimal place.
fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
