//! Weather source adapter.
//!
//! [`WeatherSource`] is the fallible seam to an hourly archive;
//! [`CachedWeatherSource`] adds the TTL cache; [`fetch`] is the infallible
//! adapter the estimator calls, which turns every failure into an empty series.

pub mod open_meteo;

pub use open_meteo::OpenMeteoClient;

use async_trait::async_trait;
use chrono::NaiveDate;
use ordered_float::OrderedFloat;
use std::time::Duration;
use tracing::{debug, warn};

use crate::cache::TtlCache;
use crate::domain::{GeoLocation, WeatherSeries};
use crate::error::EngineResult;

/// Request parameters, also the cache key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeatherQuery {
    pub latitude: OrderedFloat<f64>,
    pub longitude: OrderedFloat<f64>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl WeatherQuery {
    pub fn new(location: GeoLocation, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            latitude: OrderedFloat(location.latitude),
            longitude: OrderedFloat(location.longitude),
            start_date,
            end_date,
        }
    }

    pub fn location(&self) -> GeoLocation {
        GeoLocation::new(self.latitude.into_inner(), self.longitude.into_inner())
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn fetch_series(&self, query: &WeatherQuery) -> EngineResult<WeatherSeries>;
}

/// Caches successful fetches of the wrapped source for a fixed TTL
pub struct CachedWeatherSource<S> {
    inner: S,
    cache: TtlCache<WeatherQuery, WeatherSeries>,
}

impl<S: WeatherSource> CachedWeatherSource<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            cache: TtlCache::new(ttl),
        }
    }

    pub fn cache(&self) -> &TtlCache<WeatherQuery, WeatherSeries> {
        &self.cache
    }
}

#[async_trait]
impl<S: WeatherSource> WeatherSource for CachedWeatherSource<S> {
    async fn fetch_series(&self, query: &WeatherQuery) -> EngineResult<WeatherSeries> {
        self.cache
            .get_or_try_fetch(*query, || {
                debug!(?query, "weather cache miss");
                self.inner.fetch_series(query)
            })
            .await
    }
}

/// Fetch the hourly series for a location and inclusive date range.
///
/// Never fails: an inverted range, an unreachable source, a non-200 answer or
/// a malformed payload all yield an empty series.
pub async fn fetch(
    source: &dyn WeatherSource,
    location: GeoLocation,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> WeatherSeries {
    if start_date > end_date {
        warn!(%start_date, %end_date, "weather range is inverted, no data fetched");
        return WeatherSeries::empty();
    }

    let query = WeatherQuery::new(location, start_date, end_date);
    match source.fetch_series(&query).await {
        Ok(series) => series.within(start_date, end_date),
        Err(e) => {
            warn!(
                error = %e,
                latitude = location.latitude,
                longitude = location.longitude,
                "weather fetch failed, continuing with empty series"
            );
            WeatherSeries::empty()
        }
    }
}
