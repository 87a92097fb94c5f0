use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{
    AgriRevenueResult, EnergyResult, GeoLocation, PvConfig, ScenarioSet, SoilProfile, WindConfig,
};

pub const M2_PER_HECTARE: f64 = 10_000.0;

/// Everything needed for a full land assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub location: GeoLocation,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub area_m2: f64,
    #[serde(default)]
    pub pv: PvConfig,
    #[serde(default)]
    pub wind: WindConfig,
}

impl AnalysisRequest {
    pub fn area_ha(&self) -> f64 {
        self.area_m2 / M2_PER_HECTARE
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandAnalysis {
    pub location: GeoLocation,
    pub area_m2: f64,
    pub area_ha: f64,
    /// Profile the crops were derived from (reference profile when the source failed)
    pub soil: SoilProfile,
    pub crops: Vec<String>,
    pub energy: EnergyResult,
    pub agri: AgriRevenueResult,
    pub scenarios: ScenarioSet,
}
