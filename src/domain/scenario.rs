use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// The seven land-use mixes, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ScenarioKind {
    SolarOnly,
    WindOnly,
    AgricultureOnly,
    SolarWind,
    Agrivoltaics,
    WindAgriculture,
    Mixed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub kind: ScenarioKind,
    pub name: String,
    pub revenue: f64,
    /// Human-readable rationale for the blend
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSet {
    pub scenarios: Vec<Scenario>,
    pub best_scenario: Scenario,
}

impl ScenarioSet {
    pub fn get(&self, kind: ScenarioKind) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.kind == kind)
    }
}
