//! Estimation engine facade.
//!
//! Owns the weather and soil sources, the crop catalog and the scenario
//! optimizer, and exposes the entry points the HTTP layer calls. None of the
//! entry points fail; every source or data problem has a defined fallback.

use anyhow::Result;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::info;

use crate::agri::{self, CropCatalog, ReferenceSoil, SoilGridsClient, SoilSource};
use crate::config::Config;
use crate::domain::{
    AgriRevenueResult, AnalysisRequest, EnergyResult, GeoLocation, LandAnalysis, PvConfig,
    ScenarioSet, SoilProfile, WindConfig,
};
use crate::energy;
use crate::optimizer::ScenarioOptimizer;
use crate::weather::{self, CachedWeatherSource, OpenMeteoClient, WeatherSource};

#[derive(Clone)]
pub struct PotentialEngine {
    weather: Arc<dyn WeatherSource>,
    soil: Arc<dyn SoilSource>,
    catalog: Arc<CropCatalog>,
    optimizer: ScenarioOptimizer,
}

impl PotentialEngine {
    pub fn new(
        weather: Arc<dyn WeatherSource>,
        soil: Arc<dyn SoilSource>,
        catalog: Arc<CropCatalog>,
        optimizer: ScenarioOptimizer,
    ) -> Self {
        Self {
            weather,
            soil,
            catalog,
            optimizer,
        }
    }

    /// Wire the production sources described by `cfg`
    pub fn from_config(cfg: &Config) -> Result<Self> {
        let open_meteo = OpenMeteoClient::new(&cfg.weather.base_url, cfg.weather.http_timeout())?;
        let weather: Arc<dyn WeatherSource> = Arc::new(CachedWeatherSource::new(
            open_meteo,
            cfg.weather.cache_ttl(),
        ));

        let soil: Arc<dyn SoilSource> = if cfg.soil.use_mock {
            info!("soil source disabled, using reference profile");
            Arc::new(ReferenceSoil)
        } else {
            Arc::new(SoilGridsClient::new(&cfg.soil.base_url, cfg.soil.http_timeout())?)
        };

        let catalog = match &cfg.agri.crop_catalog {
            Some(path) => CropCatalog::load(path)?,
            None => CropCatalog::default(),
        };

        info!(
            weather_url = %cfg.weather.base_url,
            cache_ttl_secs = cfg.weather.cache_ttl_seconds,
            crops = catalog.len(),
            scenario_price = cfg.pricing.scenario_price_per_kwh,
            "potential engine ready"
        );

        Ok(Self::new(
            weather,
            soil,
            Arc::new(catalog),
            ScenarioOptimizer::new(cfg.pricing.scenario_price_per_kwh),
        ))
    }

    pub fn catalog(&self) -> &CropCatalog {
        &self.catalog
    }

    /// Fetch weather for the inclusive date range and run the PV and wind models
    pub async fn estimate_energy_potential(
        &self,
        location: GeoLocation,
        start_date: NaiveDate,
        end_date: NaiveDate,
        area_m2: f64,
        pv: &PvConfig,
        wind: &WindConfig,
    ) -> EnergyResult {
        let series = weather::fetch(self.weather.as_ref(), location, start_date, end_date).await;
        energy::estimate_from_series(&series, area_m2, pv, wind)
    }

    /// Soil profile for a location, or the reference profile if the source fails
    pub async fn fetch_soil(&self, location: GeoLocation) -> SoilProfile {
        agri::fetch_or_reference(self.soil.as_ref(), location).await
    }

    pub fn recommend_crops(&self, soil: &SoilProfile) -> Vec<String> {
        agri::recommend_crops(soil)
    }

    pub fn estimate_agri_revenue(&self, crops: &[String], area_ha: f64) -> AgriRevenueResult {
        agri::estimate_agri_revenue(crops, area_ha, &self.catalog)
    }

    pub fn calculate_mixed_potential(
        &self,
        energy: &EnergyResult,
        agri: &AgriRevenueResult,
        area_ha: f64,
    ) -> ScenarioSet {
        self.optimizer.mix(energy, agri, area_ha)
    }

    /// Full assessment: soil and weather are fetched concurrently, then crops,
    /// agricultural revenue and scenarios are derived
    pub async fn analyze(&self, request: &AnalysisRequest) -> LandAnalysis {
        let area_ha = request.area_ha();

        let (soil, energy) = tokio::join!(
            self.fetch_soil(request.location),
            self.estimate_energy_potential(
                request.location,
                request.start_date,
                request.end_date,
                request.area_m2,
                &request.pv,
                &request.wind,
            )
        );

        let crops = self.recommend_crops(&soil);
        let agri = self.estimate_agri_revenue(&crops, area_ha);
        let scenarios = self.calculate_mixed_potential(&energy, &agri, area_ha);

        info!(
            latitude = request.location.latitude,
            longitude = request.location.longitude,
            area_ha,
            total_energy_kwh = energy.total_energy_kwh,
            best_scenario = %scenarios.best_scenario.name,
            "land analysis complete"
        );

        LandAnalysis {
            location: request.location,
            area_m2: request.area_m2,
            area_ha,
            soil,
            crops,
            energy,
            agri,
            scenarios,
        }
    }
}
