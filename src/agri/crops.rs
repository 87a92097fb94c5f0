//! Soil → crop recommendation rules and the crop yield/price catalog

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};

use crate::domain::{SoilProfile, CLAY, DEPTH_WEIGHTS, NITROGEN, PH_H2O, SAND, SOC};
use crate::error::EngineError;

pub const NO_SOIL_DATA: &str = "Unable to get soil data for recommendation";
pub const GENERAL_CROPS: &str = "General crops (adaptable to various soil conditions)";
pub const GENERAL_CROPS_PARTIAL: &str = "General crops suitable for diverse soil conditions";
pub const ACID_TOLERANT: &str = "Acid-tolerant crops (Potatoes, Blueberries, etc.)";
pub const COMMON_CROPS: &str = "Most common crops (Rice, Wheat, Maize, etc.)";
pub const ALKALINE_TOLERANT: &str = "Alkaline-tolerant crops (Asparagus, Beets, etc.)";
pub const CLAY_SOIL: &str = "Clay-soil crops (Rice, Wheat, etc.)";
pub const SANDY_SOIL: &str = "Sandy-soil crops (Groundnut, Millets, etc.)";
pub const LOAM_SOIL: &str = "Loam-soil crops (Most vegetables, grains, etc.)";

/// Weighted average of a property over the top-30 cm depth bands.
///
/// Weights are renormalized over the bands actually present; `None` when
/// the property has no value at any documented band.
pub fn weighted_average(profile: &SoilProfile, property: &str) -> Option<f64> {
    let depths = profile.property(property)?;
    let (sum, weight) = DEPTH_WEIGHTS
        .iter()
        .filter_map(|(depth, w)| depths.get(*depth).map(|v| (v * w, *w)))
        .fold((0.0, 0.0), |(s, tw), (v, w)| (s + v, tw + w));
    (weight > 0.0).then(|| sum / weight)
}

/// Scalar soil values the rules are evaluated on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoilSummary {
    pub ph: f64,
    /// g/kg
    pub clay: f64,
    /// g/kg
    pub sand: f64,
    pub organic_carbon: f64,
    pub nitrogen: f64,
}

impl SoilSummary {
    pub fn from_profile(profile: &SoilProfile) -> Result<Self, EngineError> {
        let ph = weighted_average(profile, PH_H2O).map(|v| v / 10.0);
        let clay = weighted_average(profile, CLAY);
        let sand = weighted_average(profile, SAND);
        let organic_carbon = weighted_average(profile, SOC);
        let nitrogen = weighted_average(profile, NITROGEN);

        match (ph, clay, sand, organic_carbon, nitrogen) {
            (Some(ph), Some(clay), Some(sand), Some(organic_carbon), Some(nitrogen)) => Ok(Self {
                ph,
                clay,
                sand,
                organic_carbon,
                nitrogen,
            }),
            _ => {
                let missing = [
                    ("pH", ph),
                    ("clay", clay),
                    ("sand", sand),
                    ("organic carbon", organic_carbon),
                    ("nitrogen", nitrogen),
                ]
                .into_iter()
                .filter_map(|(name, v)| v.is_none().then_some(name))
                .collect();
                Err(EngineError::InsufficientData(missing))
            }
        }
    }
}

struct CropRule {
    crop: &'static str,
    matches: fn(&SoilSummary) -> bool,
}

const CROP_RULES: [CropRule; 8] = [
    CropRule {
        crop: "Rice",
        matches: |s| (5.5..=7.0).contains(&s.ph) && s.clay > 250.0,
    },
    CropRule {
        crop: "Wheat",
        matches: |s| (6.0..=7.5).contains(&s.ph) && (150.0..=350.0).contains(&s.clay),
    },
    CropRule {
        crop: "Maize",
        matches: |s| (5.8..=7.5).contains(&s.ph) && s.sand > 200.0 && s.organic_carbon > 8.0,
    },
    CropRule {
        crop: "Cotton",
        matches: |s| (6.0..=8.0).contains(&s.ph) && (150.0..=400.0).contains(&s.clay),
    },
    CropRule {
        crop: "Pulses (Chickpeas, Lentils, etc.)",
        matches: |s| (6.0..=7.5).contains(&s.ph) && s.sand > 200.0,
    },
    CropRule {
        crop: "Sugarcane",
        matches: |s| (6.0..=7.5).contains(&s.ph) && s.organic_carbon > 10.0 && s.clay > 200.0,
    },
    CropRule {
        crop: "Millets (Pearl millet, Finger millet, etc.)",
        matches: |s| (5.5..=7.0).contains(&s.ph) && s.sand > 300.0,
    },
    CropRule {
        crop: "Oilseeds (Groundnut, Sunflower, etc.)",
        matches: |s| (6.0..=7.0).contains(&s.ph),
    },
];

/// Recommend crops for a soil profile.
///
/// Full rule evaluation needs all five properties; with some missing a
/// coarser pH/texture recommendation is made, and an empty profile yields a
/// single "no data" label. Never returns an empty list.
pub fn recommend_crops(profile: &SoilProfile) -> Vec<String> {
    if profile.is_empty() {
        return vec![NO_SOIL_DATA.to_string()];
    }

    let summary = match SoilSummary::from_profile(profile) {
        Ok(summary) => summary,
        Err(e) => {
            warn!(error = %e, "using fallback crop recommendations");
            return fallback_recommendations(profile);
        }
    };

    info!(
        ph = summary.ph,
        clay = summary.clay,
        sand = summary.sand,
        organic_carbon = summary.organic_carbon,
        nitrogen = summary.nitrogen,
        "soil parameters"
    );

    let crops: Vec<String> = CROP_RULES
        .iter()
        .filter(|rule| (rule.matches)(&summary))
        .map(|rule| rule.crop.to_string())
        .collect();

    if crops.is_empty() {
        vec![GENERAL_CROPS.to_string()]
    } else {
        crops
    }
}

/// Coarse recommendation from whatever pH and texture data is present
fn fallback_recommendations(profile: &SoilProfile) -> Vec<String> {
    let mut crops = Vec::new();

    if let Some(ph) = weighted_average(profile, PH_H2O).map(|v| v / 10.0) {
        let label = if ph < 5.5 {
            ACID_TOLERANT
        } else if ph <= 7.0 {
            COMMON_CROPS
        } else {
            ALKALINE_TOLERANT
        };
        crops.push(label.to_string());
    }

    if profile.has(CLAY) || profile.has(SAND) {
        let clay = weighted_average(profile, CLAY).unwrap_or(0.0);
        let sand = weighted_average(profile, SAND).unwrap_or(0.0);
        let label = if clay > 400.0 {
            CLAY_SOIL
        } else if sand > 500.0 {
            SANDY_SOIL
        } else {
            LOAM_SOIL
        };
        crops.push(label.to_string());
    }

    if crops.is_empty() {
        crops.push(GENERAL_CROPS_PARTIAL.to_string());
    }
    crops
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropSpec {
    pub yield_kg_per_ha: f64,
    pub price_per_kg: f64,
}

/// Read-only yield/price table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropCatalog {
    #[serde(default = "CropCatalog::default_fallback")]
    fallback: CropSpec,
    crops: BTreeMap<String, CropSpec>,
}

impl CropCatalog {
    fn default_fallback() -> CropSpec {
        CropSpec {
            yield_kg_per_ha: 3000.0,
            price_per_kg: 20.0,
        }
    }

    /// Spec for a crop, or the fallback for unknown names
    pub fn lookup(&self, crop: &str) -> CropSpec {
        self.crops.get(crop).copied().unwrap_or(self.fallback)
    }

    pub fn contains(&self, crop: &str) -> bool {
        self.crops.contains_key(crop)
    }

    pub fn len(&self) -> usize {
        self.crops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read crop catalog {}", path.display()))?;
        let catalog = Self::from_toml_str(&raw)
            .with_context(|| format!("failed to parse crop catalog {}", path.display()))?;
        info!(path = %path.display(), crops = catalog.len(), "loaded crop catalog");
        Ok(catalog)
    }
}

impl Default for CropCatalog {
    fn default() -> Self {
        // yield in kg/ha, price per kg
        let table: [(&str, f64, f64); 15] = [
            ("Rice", 4000.0, 25.0),
            ("Wheat", 3500.0, 22.0),
            ("Maize", 5000.0, 20.0),
            ("Cotton", 2000.0, 60.0),
            ("Sugarcane", 80000.0, 3.0),
            ("Pulses (Chickpeas, Lentils, etc.)", 1500.0, 70.0),
            ("Millets (Pearl millet, Finger millet, etc.)", 2000.0, 30.0),
            ("Oilseeds (Groundnut, Sunflower, etc.)", 2500.0, 50.0),
            (ACID_TOLERANT, 25000.0, 15.0),
            (ALKALINE_TOLERANT, 15000.0, 40.0),
            (CLAY_SOIL, 3800.0, 24.0),
            (SANDY_SOIL, 2200.0, 40.0),
            (LOAM_SOIL, 10000.0, 30.0),
            (GENERAL_CROPS, 5000.0, 25.0),
            (GENERAL_CROPS_PARTIAL, 5000.0, 25.0),
        ];

        Self {
            fallback: Self::default_fallback(),
            crops: table
                .into_iter()
                .map(|(name, yield_kg_per_ha, price_per_kg)| {
                    (
                        name.to_string(),
                        CropSpec {
                            yield_kg_per_ha,
                            price_per_kg,
                        },
                    )
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(profile: SoilProfile, property: &str, value: f64) -> SoilProfile {
        DEPTH_WEIGHTS
            .iter()
            .fold(profile, |p, (depth, _)| p.with(property, depth, value))
    }

    fn soil(ph_x10: f64, clay: f64, sand: f64, soc: f64, nitrogen: f64) -> SoilProfile {
        let p = uniform(SoilProfile::new(), PH_H2O, ph_x10);
        let p = uniform(p, CLAY, clay);
        let p = uniform(p, SAND, sand);
        let p = uniform(p, SOC, soc);
        uniform(p, NITROGEN, nitrogen)
    }

    #[test]
    fn test_weighted_average_reference_values() {
        let profile = SoilProfile::reference();
        let ph = weighted_average(&profile, PH_H2O).unwrap() / 10.0;
        let clay = weighted_average(&profile, CLAY).unwrap();
        let sand = weighted_average(&profile, SAND).unwrap();
        let soc = weighted_average(&profile, SOC).unwrap();

        assert!((ph - 6.405).abs() < 1e-9);
        assert!((clay - 231.5).abs() < 1e-9);
        assert!((sand - 438.5).abs() < 1e-9);
        assert!((soc - 9.7).abs() < 1e-9);
    }

    #[test]
    fn test_weighted_average_renormalizes_partial_bands() {
        let profile = SoilProfile::new()
            .with(CLAY, "0-5cm", 100.0)
            .with(CLAY, "15-30cm", 300.0);
        // (100×0.25 + 300×0.40) / 0.65
        let expected = (25.0 + 120.0) / 0.65;
        assert!((weighted_average(&profile, CLAY).unwrap() - expected).abs() < 1e-9);

        let odd_depth = SoilProfile::new().with(CLAY, "60-100cm", 300.0);
        assert_eq!(weighted_average(&odd_depth, CLAY), None);
    }

    #[test]
    fn test_reference_profile_recommendations() {
        let crops = recommend_crops(&SoilProfile::reference());
        // weighted clay is 231.5, below the Rice threshold of 250
        assert!(!crops.contains(&"Rice".to_string()));
        assert_eq!(
            crops,
            vec![
                "Wheat",
                "Maize",
                "Cotton",
                "Pulses (Chickpeas, Lentils, etc.)",
                "Millets (Pearl millet, Finger millet, etc.)",
                "Oilseeds (Groundnut, Sunflower, etc.)",
            ]
        );
    }

    #[test]
    fn test_clay_rich_soil_recommends_rice() {
        let crops = recommend_crops(&soil(65.0, 300.0, 250.0, 12.0, 700.0));
        assert_eq!(crops[0], "Rice");
        assert!(crops.contains(&"Sugarcane".to_string()));
    }

    #[test]
    fn test_no_rule_fires_gives_general_label() {
        // strongly acidic, very sandy, little clay
        let crops = recommend_crops(&soil(45.0, 50.0, 100.0, 2.0, 100.0));
        assert_eq!(crops, vec![GENERAL_CROPS]);
    }

    #[test]
    fn test_empty_profile() {
        assert_eq!(recommend_crops(&SoilProfile::new()), vec![NO_SOIL_DATA]);
    }

    #[test]
    fn test_missing_properties_use_fallback() {
        let partial = uniform(uniform(SoilProfile::new(), PH_H2O, 48.0), CLAY, 450.0);
        let err = SoilSummary::from_profile(&partial).unwrap_err();
        assert!(matches!(err, EngineError::InsufficientData(ref m) if m.contains(&"sand")));

        assert_eq!(recommend_crops(&partial), vec![ACID_TOLERANT, CLAY_SOIL]);
    }

    #[test]
    fn test_fallback_texture_only() {
        let sandy = uniform(SoilProfile::new(), SAND, 600.0);
        assert_eq!(recommend_crops(&sandy), vec![SANDY_SOIL]);

        let alkaline = uniform(SoilProfile::new(), PH_H2O, 78.0);
        assert_eq!(recommend_crops(&alkaline), vec![ALKALINE_TOLERANT]);
    }

    #[test]
    fn test_fallback_without_usable_properties() {
        let profile = SoilProfile::new().with(NITROGEN, "0-5cm", 500.0);
        assert_eq!(recommend_crops(&profile), vec![GENERAL_CROPS_PARTIAL]);
    }

    #[test]
    fn test_catalog_lookup_and_fallback() {
        let catalog = CropCatalog::default();
        assert_eq!(catalog.lookup("Rice").yield_kg_per_ha, 4000.0);
        assert_eq!(catalog.lookup("Sugarcane").price_per_kg, 3.0);

        let unknown = catalog.lookup("Quinoa");
        assert_eq!(unknown.yield_kg_per_ha, 3000.0);
        assert_eq!(unknown.price_per_kg, 20.0);
        assert!(!catalog.contains(COMMON_CROPS));
    }

    #[test]
    fn test_catalog_from_toml() {
        let catalog = CropCatalog::from_toml_str(
            r#"
            [crops.Rice]
            yield_kg_per_ha = 4200.0
            price_per_kg = 28.0

            [crops.Tea]
            yield_kg_per_ha = 1800.0
            price_per_kg = 150.0
            "#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.lookup("Tea").price_per_kg, 150.0);
        assert_eq!(catalog.lookup("Wheat").yield_kg_per_ha, 3000.0);
    }

    #[test]
    fn test_bundled_catalog_matches_rule_labels() {
        let catalog =
            CropCatalog::from_toml_str(include_str!("../../config/crops.toml")).unwrap();
        for rule in &CROP_RULES {
            assert_eq!(
                catalog.lookup(rule.crop),
                CropCatalog::default().lookup(rule.crop),
                "{}",
                rule.crop
            );
        }
    }
}
