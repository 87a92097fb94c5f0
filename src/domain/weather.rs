use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Geographic location in signed decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoLocation {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// One hourly weather observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    pub timestamp: DateTime<Utc>,
    /// Shortwave irradiance in W/m²
    pub shortwave_radiation: Option<f64>,
    /// Wind speed at 10 m in m/s
    pub wind_speed_10m: Option<f64>,
    pub temperature_2m: Option<f64>,
}

impl WeatherSample {
    /// A row carries no energy information when both drivers are missing
    pub fn is_blank(&self) -> bool {
        self.shortwave_radiation.is_none() && self.wind_speed_10m.is_none()
    }
}

/// Ordered, deduplicated hourly series in UTC.
///
/// Construction goes through [`WeatherSeries::from_samples`], which sorts,
/// keeps the first row of each timestamp and drops blank rows, so
/// timestamps are always strictly increasing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<WeatherSample>", into = "Vec<WeatherSample>")]
pub struct WeatherSeries {
    samples: Vec<WeatherSample>,
}

impl WeatherSeries {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_samples(mut samples: Vec<WeatherSample>) -> Self {
        samples.retain(|s| !s.is_blank());
        // stable sort keeps source order among equal timestamps, so dedup keeps the first
        samples.sort_by_key(|s| s.timestamp);
        samples.dedup_by_key(|s| s.timestamp);
        Self { samples }
    }

    /// Drop samples whose UTC date falls outside `[start, end]`
    pub fn within(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.samples.retain(|s| {
            let day = s.timestamp.date_naive();
            day >= start && day <= end
        });
        self
    }

    pub fn samples(&self) -> &[WeatherSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn timestamps(&self) -> Vec<DateTime<Utc>> {
        self.samples.iter().map(|s| s.timestamp).collect()
    }

    pub fn irradiance(&self) -> Vec<Option<f64>> {
        self.samples.iter().map(|s| s.shortwave_radiation).collect()
    }

    pub fn wind_speed(&self) -> Vec<Option<f64>> {
        self.samples.iter().map(|s| s.wind_speed_10m).collect()
    }
}

impl From<Vec<WeatherSample>> for WeatherSeries {
    fn from(samples: Vec<WeatherSample>) -> Self {
        Self::from_samples(samples)
    }
}

impl From<WeatherSeries> for Vec<WeatherSample> {
    fn from(series: WeatherSeries) -> Self {
        series.samples
    }
}
