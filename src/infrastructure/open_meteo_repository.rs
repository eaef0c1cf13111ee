// Open-Meteo archive repository implementation
use crate::application::weather_repository::{HourlySample, WeatherRepository};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct OpenMeteoRepository {
    base_url: String,
    request_timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct ArchiveResponse {
    hourly: HourlyBlock,
}

/// The provider returns parallel arrays: one `time` array plus one value
/// array per requested field, keyed by field name. Values are nullable.
#[derive(Debug, Deserialize)]
struct HourlyBlock {
    #[serde(default)]
    time: Vec<String>,
    #[serde(flatten)]
    fields: HashMap<String, Vec<Option<f64>>>,
}

impl OpenMeteoRepository {
    pub fn new(base_url: String, request_timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            request_timeout,
        }
    }

    fn build_request_url(
        &self,
        latitude: f64,
        longitude: f64,
        start_date: NaiveDate,
        end_date: NaiveDate,
        field: &str,
    ) -> String {
        format!(
            "{}?latitude={}&longitude={}&start_date={}&end_date={}&hourly={}",
            self.base_url,
            latitude,
            longitude,
            start_date.format("%Y-%m-%d"),
            end_date.format("%Y-%m-%d"),
            urlencoding::encode(field)
        )
    }

    fn samples_from_hourly(hourly: &HourlyBlock, field: &str) -> Result<Vec<HourlySample>> {
        let Some(values) = hourly.fields.get(field) else {
            anyhow::bail!("field {} missing from provider response", field);
        };

        let mut samples = Vec::with_capacity(hourly.time.len());
        for (i, time) in hourly.time.iter().enumerate() {
            // Minute-precision timestamps like "2024-05-01T12:00".
            let Ok(time) = NaiveDateTime::parse_from_str(time, "%Y-%m-%dT%H:%M") else {
                continue;
            };
            let value = values.get(i).copied().flatten().unwrap_or(0.0);
            samples.push(HourlySample::new(time, value));
        }

        Ok(samples)
    }
}

#[async_trait]
impl WeatherRepository for OpenMeteoRepository {
    async fn fetch_hourly(
        &self,
        latitude: f64,
        longitude: f64,
        start_date: NaiveDate,
        end_date: NaiveDate,
        field: &str,
    ) -> Result<Vec<HourlySample>> {
        let url = self.build_request_url(latitude, longitude, start_date, end_date, field);
        tracing::debug!("fetching hourly series: {}", url);

        let client = reqwest::Client::new();
        let response = client
            .get(&url)
            .timeout(self.request_timeout)
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to send request to weather provider")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Weather request failed with status {}: {}", status, body);
        }

        let data = response
            .json::<ArchiveResponse>()
            .await
            .context("Failed to parse weather provider response")?;

        Self::samples_from_hourly(&data.hourly, field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> ArchiveResponse {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_build_request_url() {
        let repo = OpenMeteoRepository::new(
            "https://archive-api.open-meteo.com/v1/archive/".to_string(),
            Duration::from_secs(30),
        );
        let url = repo.build_request_url(
            52.52,
            13.41,
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(),
            "temperature_2m",
        );
        assert_eq!(
            url,
            "https://archive-api.open-meteo.com/v1/archive?latitude=52.52&longitude=13.41&start_date=2024-05-01&end_date=2024-05-03&hourly=temperature_2m"
        );
    }

    #[test]
    fn test_parses_hourly_series() {
        let response = parse(
            r#"{
                "latitude": 52.5,
                "longitude": 13.4,
                "hourly_units": {"time": "iso8601", "temperature_2m": "°C"},
                "hourly": {
                    "time": ["2024-05-01T00:00", "2024-05-01T01:00"],
                    "temperature_2m": [10.2, 11.4]
                }
            }"#,
        );
        let samples =
            OpenMeteoRepository::samples_from_hourly(&response.hourly, "temperature_2m").unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].value, 10.2);
        assert_eq!(samples[1].value, 11.4);
    }

    #[test]
    fn test_null_samples_read_as_zero() {
        let response = parse(
            r#"{
                "hourly": {
                    "time": ["2024-05-01T00:00", "2024-05-01T01:00"],
                    "temperature_2m": [null, 11.4]
                }
            }"#,
        );
        let samples =
            OpenMeteoRepository::samples_from_hourly(&response.hourly, "temperature_2m").unwrap();
        assert_eq!(samples[0].value, 0.0);
    }

    #[test]
    fn test_missing_field_is_an_error() {
        let response = parse(
            r#"{
                "hourly": {
                    "time": ["2024-05-01T00:00"],
                    "temperature_2m": [10.2]
                }
            }"#,
        );
        let result = OpenMeteoRepository::samples_from_hourly(&response.hourly, "windspeed_10m");
        assert!(result.is_err());
    }

    #[test]
    fn test_ragged_value_array_pads_with_zero() {
        let response = parse(
            r#"{
                "hourly": {
                    "time": ["2024-05-01T00:00", "2024-05-01T01:00"],
                    "temperature_2m": [10.2]
                }
            }"#,
        );
        let samples =
            OpenMeteoRepository::samples_from_hourly(&response.hourly, "temperature_2m").unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[1].value, 0.0);
    }

    #[test]
    fn test_unparseable_timestamps_are_skipped() {
        let response = parse(
            r#"{
                "hourly": {
                    "time": ["not-a-time", "2024-05-01T01:00"],
                    "temperature_2m": [10.2, 11.4]
                }
            }"#,
        );
        let samples =
            OpenMeteoRepository::samples_from_hourly(&response.hourly, "temperature_2m").unwrap();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].value, 11.4);
    }
}
