use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// SoilGrids property names the advisor understands
pub const PH_H2O: &str = "phh2o";
pub const CLAY: &str = "clay";
pub const SAND: &str = "sand";
pub const SOC: &str = "soc";
pub const NITROGEN: &str = "nitrogen";

pub const SOIL_PROPERTIES: [&str; 5] = [PH_H2O, CLAY, SAND, SOC, NITROGEN];

/// Depth bands of the top 30 cm and their weight in the weighted average
pub const DEPTH_WEIGHTS: [(&str, f64); 3] = [("0-5cm", 0.25), ("5-15cm", 0.35), ("15-30cm", 0.40)];

/// Soil property by depth: property name -> depth label -> mean value.
///
/// Values stay in SoilGrids mapped units (pH is ×10).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SoilProfile(BTreeMap<String, BTreeMap<String, f64>>);

impl SoilProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of one value
    pub fn with(mut self, property: &str, depth: &str, value: f64) -> Self {
        self.insert(property, depth, value);
        self
    }

    pub fn insert(&mut self, property: &str, depth: &str, value: f64) {
        self.0
            .entry(property.to_string())
            .or_default()
            .insert(depth.to_string(), value);
    }

    pub fn property(&self, name: &str) -> Option<&BTreeMap<String, f64>> {
        self.0.get(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.0.get(name).is_some_and(|d| !d.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|d| d.is_empty())
    }

    /// Reference profile used when the soil source is unavailable
    /// (pH ≈ 6.4, clay ≈ 230 g/kg, sand ≈ 440 g/kg, soc ≈ 10, nitrogen ≈ 700)
    pub fn reference() -> Self {
        Self::new()
            .with(PH_H2O, "0-5cm", 64.0)
            .with(PH_H2O, "5-15cm", 63.0)
            .with(PH_H2O, "15-30cm", 65.0)
            .with(CLAY, "0-5cm", 220.0)
            .with(CLAY, "5-15cm", 230.0)
            .with(CLAY, "15-30cm", 240.0)
            .with(SAND, "0-5cm", 450.0)
            .with(SAND, "5-15cm", 440.0)
            .with(SAND, "15-30cm", 430.0)
            .with(SOC, "0-5cm", 12.0)
            .with(SOC, "5-15cm", 10.0)
            .with(SOC, "15-30cm", 8.0)
            .with(NITROGEN, "0-5cm", 800.0)
            .with(NITROGEN, "5-15cm", 700.0)
            .with(NITROGEN, "15-30cm", 600.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropRevenueDetail {
    pub crop: String,
    pub yield_kg: f64,
    pub price_per_kg: f64,
    pub revenue: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgriRevenueResult {
    pub best_crop: Option<String>,
    pub max_revenue: f64,
    pub details: Vec<CropRevenueDetail>,
}
