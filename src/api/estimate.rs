//! Estimation endpoints

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use validator::Validate;

use super::{error::ApiError, response::ApiResponse, AppState};
use crate::domain::{
    AgriRevenueResult, AnalysisRequest, EnergyConfigEcho, EnergyResult, GeoLocation, LandAnalysis,
    PvConfig, ScenarioSet, SoilProfile, WindConfig, M2_PER_HECTARE,
};

/// Location, window and plant configuration for energy and full analyses
#[derive(Debug, Deserialize, Validate)]
pub struct EstimateRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[validate(range(min = 0.0))]
    pub area_m2: f64,
    #[serde(default)]
    pub pv: PvConfig,
    #[serde(default)]
    pub wind: WindConfig,
}

impl EstimateRequest {
    fn check_dates(&self) -> Result<(), ApiError> {
        if self.start_date > self.end_date {
            return Err(ApiError::ValidationError(format!(
                "start_date {} is after end_date {}",
                self.start_date, self.end_date
            )));
        }
        Ok(())
    }

    fn into_analysis(self) -> AnalysisRequest {
        AnalysisRequest {
            location: GeoLocation::new(self.latitude, self.longitude),
            start_date: self.start_date,
            end_date: self.end_date,
            area_m2: self.area_m2,
            pv: self.pv,
            wind: self.wind,
        }
    }
}

/// Either an explicit soil profile or a location to fetch one for
#[derive(Debug, Deserialize, Validate)]
pub struct CropRequest {
    #[serde(default)]
    pub soil: Option<SoilProfile>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct CropRecommendation {
    pub soil: SoilProfile,
    pub crops: Vec<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AgriRevenueRequest {
    pub crops: Vec<String>,
    #[validate(range(min = 0.0))]
    pub area_ha: f64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ScenarioRequest {
    #[validate(range(min = 0.0))]
    pub pv_energy_kwh: f64,
    #[validate(range(min = 0.0))]
    pub wind_energy_kwh: f64,
    pub agri: AgriRevenueResult,
    #[validate(range(min = 0.0))]
    pub area_ha: f64,
}

fn validated<T: Validate>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    let Json(body) = payload?;
    body.validate()?;
    Ok(body)
}

/// POST /analysis
pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<EstimateRequest>, JsonRejection>,
) -> Result<ApiResponse<LandAnalysis>, ApiError> {
    let body = validated(payload)?;
    body.check_dates()?;

    let started = Instant::now();
    let analysis = state.engine.analyze(&body.into_analysis()).await;
    Ok(ApiResponse::success(analysis).with_duration(started.elapsed().as_millis() as u64))
}

/// POST /energy/estimate
pub async fn estimate_energy(
    State(state): State<AppState>,
    payload: Result<Json<EstimateRequest>, JsonRejection>,
) -> Result<ApiResponse<EnergyResult>, ApiError> {
    let body = validated(payload)?;
    body.check_dates()?;

    let started = Instant::now();
    let result = state
        .engine
        .estimate_energy_potential(
            GeoLocation::new(body.latitude, body.longitude),
            body.start_date,
            body.end_date,
            body.area_m2,
            &body.pv,
            &body.wind,
        )
        .await;
    Ok(ApiResponse::success(result).with_duration(started.elapsed().as_millis() as u64))
}

/// POST /crops/recommend
pub async fn recommend_crops(
    State(state): State<AppState>,
    payload: Result<Json<CropRequest>, JsonRejection>,
) -> Result<ApiResponse<CropRecommendation>, ApiError> {
    let body = validated(payload)?;

    let soil = match (body.soil, body.latitude, body.longitude) {
        (Some(soil), _, _) => soil,
        (None, Some(lat), Some(lon)) => state.engine.fetch_soil(GeoLocation::new(lat, lon)).await,
        _ => {
            return Err(ApiError::BadRequest(
                "either soil or latitude and longitude is required".to_string(),
            ))
        }
    };

    let crops = state.engine.recommend_crops(&soil);
    let count = crops.len();
    Ok(ApiResponse::success(CropRecommendation { soil, crops }).with_count(count))
}

/// POST /agri/revenue
pub async fn agri_revenue(
    State(state): State<AppState>,
    payload: Result<Json<AgriRevenueRequest>, JsonRejection>,
) -> Result<ApiResponse<AgriRevenueResult>, ApiError> {
    let body = validated(payload)?;
    Ok(ApiResponse::success(
        state.engine.estimate_agri_revenue(&body.crops, body.area_ha),
    ))
}

/// POST /scenarios
pub async fn scenarios(
    State(state): State<AppState>,
    payload: Result<Json<ScenarioRequest>, JsonRejection>,
) -> Result<ApiResponse<ScenarioSet>, ApiError> {
    let body = validated(payload)?;

    let mut energy = EnergyResult::zero(EnergyConfigEcho {
        area_m2: body.area_ha * M2_PER_HECTARE,
        pv: PvConfig::default(),
        wind: WindConfig::default(),
    });
    energy.pv_energy_kwh = body.pv_energy_kwh;
    energy.wind_energy_kwh = body.wind_energy_kwh;
    energy.total_energy_kwh = body.pv_energy_kwh + body.wind_energy_kwh;

    let set = state
        .engine
        .calculate_mixed_potential(&energy, &body.agri, body.area_ha);
    let count = set.scenarios.len();
    Ok(ApiResponse::success(set).with_count(count))
}
