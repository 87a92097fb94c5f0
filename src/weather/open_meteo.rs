//! Open-Meteo historical archive client

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, NaiveDateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use super::{WeatherQuery, WeatherSource};
use crate::domain::{WeatherSample, WeatherSeries};
use crate::error::{EngineError, EngineResult};

pub const DEFAULT_BASE_URL: &str = "https://archive-api.open-meteo.com/v1/archive";
const HOURLY_FIELDS: &str = "shortwave_radiation,wind_speed_10m,temperature_2m";

#[derive(Clone)]
pub struct OpenMeteoClient {
    client: Client,
    base_url: String,
}

impl OpenMeteoClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> EngineResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("land-potential/0.1"));
        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| EngineError::InvalidConfiguration(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl WeatherSource for OpenMeteoClient {
    async fn fetch_series(&self, query: &WeatherQuery) -> EngineResult<WeatherSeries> {
        let start = query.start_date.format("%Y-%m-%d").to_string();
        let end = query.end_date.format("%Y-%m-%d").to_string();

        debug!(url = %self.base_url, %start, %end, "fetching hourly weather");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", query.latitude.to_string()),
                ("longitude", query.longitude.to_string()),
                ("start_date", start.clone()),
                ("end_date", end.clone()),
                ("hourly", HOURLY_FIELDS.to_string()),
                ("timezone", "UTC".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            let snippet: String = body.chars().take(200).collect();
            error!(%status, body = %snippet, "Open-Meteo returned error status");
            return Err(EngineError::SourceUnavailable(format!("Open-Meteo HTTP {status}")));
        }

        let payload: ArchiveResponse = serde_json::from_str(&body)?;
        let series = parse_archive(payload)?;

        info!(
            rows = series.len(),
            %start,
            %end,
            latitude = %query.latitude,
            longitude = %query.longitude,
            "fetched hourly weather"
        );
        Ok(series)
    }
}

/// Turn the parallel hourly arrays into a normalized series
pub(crate) fn parse_archive(payload: ArchiveResponse) -> EngineResult<WeatherSeries> {
    let hourly = payload
        .hourly
        .ok_or_else(|| EngineError::SourceUnavailable("no hourly payload".to_string()))?;
    if hourly.time.is_empty() {
        return Err(EngineError::SourceUnavailable("empty hourly payload".to_string()));
    }

    let offset = ChronoDuration::seconds(i64::from(payload.utc_offset_seconds));

    let mut skipped = 0usize;
    let mut samples = Vec::with_capacity(hourly.time.len());
    for (i, raw) in hourly.time.iter().enumerate() {
        let Some(timestamp) = parse_timestamp(raw, offset) else {
            skipped += 1;
            continue;
        };
        samples.push(WeatherSample {
            timestamp,
            shortwave_radiation: non_negative(reading(&hourly.shortwave_radiation, i)),
            wind_speed_10m: non_negative(reading(&hourly.wind_speed_10m, i)),
            temperature_2m: reading(&hourly.temperature_2m, i).filter(|t| t.is_finite()),
        });
    }

    if skipped > 0 {
        warn!(skipped, "dropped weather rows with unparseable timestamps");
    }

    Ok(WeatherSeries::from_samples(samples))
}

fn reading(values: &[Option<f64>], i: usize) -> Option<f64> {
    values.get(i).copied().flatten()
}

fn non_negative(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v >= 0.0)
}

/// Accepts `2023-01-01T00:00` (local to `offset`) or a full RFC 3339 stamp
fn parse_timestamp(raw: &str, offset: ChronoDuration) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .ok()
        .map(|naive| naive.and_utc() - offset)
}

// Open-Meteo archive response structures
#[derive(Debug, Deserialize)]
pub(crate) struct ArchiveResponse {
    #[serde(default)]
    utc_offset_seconds: i32,
    hourly: Option<HourlyBlock>,
}

#[derive(Debug, Deserialize)]
struct HourlyBlock {
    #[serde(default)]
    time: Vec<String>,
    #[serde(default)]
    shortwave_radiation: Vec<Option<f64>>,
    #[serde(default)]
    wind_speed_10m: Vec<Option<f64>>,
    #[serde(default)]
    temperature_2m: Vec<Option<f64>>,
}
