// Repository trait for hourly weather data access
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

/// One hourly sample from the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlySample {
    pub time: NaiveDateTime,
    pub value: f64,
}

impl HourlySample {
    pub fn new(time: NaiveDateTime, value: f64) -> Self {
        Self { time, value }
    }
}

#[async_trait]
pub trait WeatherRepository: Send + Sync {
    /// Fetch the hourly series of `field` at a coordinate between two
    /// dates (inclusive, day granularity).
    async fn fetch_hourly(
        &self,
        latitude: f64,
        longitude: f64,
        start_date: NaiveDate,
        end_date: NaiveDate,
        field: &str,
    ) -> anyhow::Result<Vec<HourlySample>>;
}
