//! Soil property source (ISRIC SoilGrids)

use async_trait::async_trait;
use itertools::Itertools;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::domain::{GeoLocation, SoilProfile, DEPTH_WEIGHTS, SOIL_PROPERTIES};
use crate::error::{EngineError, EngineResult};

pub const DEFAULT_BASE_URL: &str = "https://rest.isric.org/soilgrids/v2.0/properties/query";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SoilSource: Send + Sync {
    async fn fetch_profile(&self, location: GeoLocation) -> EngineResult<SoilProfile>;
}

#[derive(Clone)]
pub struct SoilGridsClient {
    client: Client,
    base_url: String,
}

impl SoilGridsClient {
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
}

#[async_trait]
impl SoilSource for SoilGridsClient {
    async fn fetch_profile(&self, location: GeoLocation) -> EngineResult<SoilProfile> {
        debug!(url = %self.base_url, ?location, "fetching soil properties");

        let params = [
            ("lat", location.latitude.to_string()),
            ("lon", location.longitude.to_string()),
            ("property", SOIL_PROPERTIES.join(",")),
            ("depth", DEPTH_WEIGHTS.iter().map(|(depth, _)| depth).join(",")),
            ("value", "mean".to_string()),
        ];

        let response = self.client.get(&self.base_url).query(&params).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            let snippet: String = body.chars().take(200).collect();
            error!(%status, body = %snippet, "SoilGrids returned error status");
            return Err(EngineError::SourceUnavailable(format!("SoilGrids HTTP {status}")));
        }

        let payload: SoilGridsResponse = serde_json::from_str(&body)?;
        let profile = parse_layers(payload);
        info!(
            latitude = location.latitude,
            longitude = location.longitude,
            empty = profile.is_empty(),
            "fetched soil properties"
        );
        Ok(profile)
    }
}

/// Serves the fixed reference profile without touching the network
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceSoil;

#[async_trait]
impl SoilSource for ReferenceSoil {
    async fn fetch_profile(&self, _location: GeoLocation) -> EngineResult<SoilProfile> {
        Ok(SoilProfile::reference())
    }
}

/// Fetch the soil profile, substituting the reference profile on any failure
pub async fn fetch_or_reference(source: &dyn SoilSource, location: GeoLocation) -> SoilProfile {
    match source.fetch_profile(location).await {
        Ok(profile) => profile,
        Err(e) => {
            warn!(
                error = %e,
                latitude = location.latitude,
                longitude = location.longitude,
                "soil fetch failed, using reference profile"
            );
            SoilProfile::reference()
        }
    }
}

/// Depths with a null mean are left out
fn parse_layers(payload: SoilGridsResponse) -> SoilProfile {
    payload
        .properties
        .layers
        .into_iter()
        .flat_map(|layer| {
            layer
                .depths
                .into_iter()
                .filter_map(move |d| d.values.mean.map(|mean| (layer.name.clone(), d.label, mean)))
        })
        .filter(|(_, _, mean)| mean.is_finite())
        .fold(SoilProfile::new(), |mut profile, (name, depth, mean)| {
            profile.insert(&name, &depth, mean);
            profile
        })
}

// SoilGrids properties/query response structures
#[derive(Debug, Deserialize)]
struct SoilGridsResponse {
    properties: SoilGridsProperties,
}

#[derive(Debug, Deserialize)]
struct SoilGridsProperties {
    #[serde(default)]
    layers: Vec<SoilLayer>,
}

#[derive(Debug, Deserialize)]
struct SoilLayer {
    name: String,
    #[serde(default)]
    depths: Vec<SoilDepth>,
}

#[derive(Debug, Deserialize)]
struct SoilDepth {
    label: String,
    values: SoilValues,
}

#[derive(Debug, Deserialize)]
struct SoilValues {
    mean: Option<f64>,
}
