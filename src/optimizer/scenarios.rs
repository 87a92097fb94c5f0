use tracing::debug;

use crate::domain::{
    finite_or_zero, AgriRevenueResult, EnergyResult, Scenario, ScenarioKind, ScenarioSet,
};

/// Fixed-coefficient land-use blends of solar, wind and agricultural revenue.
///
/// Coexistence assumptions:
/// - solar + wind: turbine spacing costs 10% of solar capacity
/// - agrivoltaics: elevated panels keep 60% solar and 70% crop yield
/// - wind + agriculture: turbine footprint costs 5% of crop yield
/// - mixed: 60% solar, 65% crop yield, full wind
#[derive(Debug, Clone, Copy)]
pub struct ScenarioOptimizer {
    /// Price per kWh used for both solar and wind revenue
    pub flat_price: f64,
}

impl Default for ScenarioOptimizer {
    fn default() -> Self {
        Self { flat_price: 6.0 }
    }
}

impl ScenarioOptimizer {
    pub fn new(flat_price: f64) -> Self {
        Self { flat_price }
    }

    /// Build the seven scenarios from an energy estimate and crop revenue.
    ///
    /// The energy result's own revenue is ignored; energy is re-priced at
    /// [`Self::flat_price`]. `area_ha` is informational only.
    pub fn mix(&self, energy: &EnergyResult, agri: &AgriRevenueResult, area_ha: f64) -> ScenarioSet {
        let price = finite_or_zero(self.flat_price);
        let solar_revenue = finite_or_zero(energy.pv_energy_kwh) * price;
        let wind_revenue = finite_or_zero(energy.wind_energy_kwh) * price;
        let agri_revenue = finite_or_zero(agri.max_revenue);

        debug!(area_ha, solar_revenue, wind_revenue, agri_revenue, "mixing land-use scenarios");
        mix_revenues(solar_revenue, wind_revenue, agri_revenue, agri.best_crop.as_deref())
    }
}

/// Seven scenarios in fixed order plus the best one (first wins on ties)
pub fn mix_revenues(
    solar_revenue: f64,
    wind_revenue: f64,
    agri_revenue: f64,
    best_crop: Option<&str>,
) -> ScenarioSet {
    let crop = best_crop.unwrap_or("Unknown");

    let scenarios = vec![
        Scenario {
            kind: ScenarioKind::SolarOnly,
            name: "Solar Only".to_string(),
            revenue: solar_revenue,
            details: "Full area used for Solar PV.".to_string(),
        },
        Scenario {
            kind: ScenarioKind::WindOnly,
            name: "Wind Only".to_string(),
            revenue: wind_revenue,
            details: "Full area used for Wind Turbines.".to_string(),
        },
        Scenario {
            kind: ScenarioKind::AgricultureOnly,
            name: format!("Agriculture Only ({crop})"),
            revenue: agri_revenue,
            details: format!("Full area cultivated with {crop}."),
        },
        Scenario {
            kind: ScenarioKind::SolarWind,
            name: "Solar + Wind".to_string(),
            revenue: solar_revenue * 0.9 + wind_revenue,
            details: "Wind turbines with Solar PV filling the spacing (90% Solar capacity)."
                .to_string(),
        },
        Scenario {
            kind: ScenarioKind::Agrivoltaics,
            name: format!("Agrivoltaics (Solar + {crop})"),
            revenue: solar_revenue * 0.6 + agri_revenue * 0.7,
            details: "Elevated/Spaced Solar panels allowing cultivation (60% Solar, 70% Agri yield)."
                .to_string(),
        },
        Scenario {
            kind: ScenarioKind::WindAgriculture,
            name: format!("Wind + Agriculture ({crop})"),
            revenue: wind_revenue + agri_revenue * 0.95,
            details: "Wind turbines with cultivation in between (95% Agri yield).".to_string(),
        },
        Scenario {
            kind: ScenarioKind::Mixed,
            name: "Mixed (Solar + Wind + Agri)".to_string(),
            revenue: solar_revenue * 0.6 + agri_revenue * 0.65 + wind_revenue,
            details: "Integrated system: Wind turbines, spaced Solar, and crops.".to_string(),
        },
    ];

    let mut best = &scenarios[0];
    for scenario in &scenarios[1..] {
        if scenario.revenue > best.revenue {
            best = scenario;
        }
    }
    let best_scenario = best.clone();

    ScenarioSet {
        scenarios,
        best_scenario,
    }
}
