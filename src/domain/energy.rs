use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Photovoltaic plant configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PvConfig {
    /// Module efficiency (0, 1]
    pub efficiency: f64,
    /// Fraction of theoretical output kept after real-world losses (0, 1]
    pub performance_ratio: f64,
    /// Inverter and wiring efficiency (0, 1]
    pub system_efficiency: f64,
    /// Fraction of the parcel covered by modules (0, 1]
    pub land_coverage: f64,
    /// Flat energy price used for the estimate's revenue
    pub price_per_kwh: f64,
}

impl Default for PvConfig {
    fn default() -> Self {
        Self {
            efficiency: 0.20,
            performance_ratio: 0.80,
            system_efficiency: 0.95,
            land_coverage: 0.60,
            price_per_kwh: 6.0,
        }
    }
}

/// Wind turbine configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindConfig {
    pub rated_power_kw: f64,
    pub rotor_diameter_m: f64,
    pub hub_height_m: f64,
    pub cut_in_ms: f64,
    pub rated_ws_ms: f64,
    pub cut_out_ms: f64,
    /// Power coefficient (0, 1)
    pub cp: f64,
    pub system_efficiency: f64,
}

impl Default for WindConfig {
    fn default() -> Self {
        Self {
            rated_power_kw: 5.0,
            rotor_diameter_m: 7.0,
            hub_height_m: 20.0,
            cut_in_ms: 3.0,
            rated_ws_ms: 12.0,
            cut_out_ms: 25.0,
            cp: 0.35,
            system_efficiency: 0.90,
        }
    }
}

/// Per-hour energy derived from one weather sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourlyEnergyRecord {
    pub timestamp: DateTime<Utc>,
    pub pv_energy_kwh: f64,
    pub wind_energy_kwh: f64,
    pub total_energy_kwh: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBreakdownEntry {
    /// Calendar month as `YYYY-MM`
    pub month: String,
    pub pv_energy_kwh: f64,
    pub wind_energy_kwh: f64,
    pub total_energy_kwh: f64,
    pub revenue: f64,
}

/// Summary statistics over the hourly series
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EnergySummary {
    pub sample_count: usize,
    /// Hours with any generation
    pub productive_hours: usize,
    pub peak_hourly_kwh: f64,
    pub mean_hourly_kwh: f64,
    /// PV share of total energy, 0 when nothing was generated
    pub pv_share: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourlyChartPoint {
    pub timestamp: DateTime<Utc>,
    pub pv_kwh: f64,
    pub wind_kwh: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyChartPoint {
    pub date: NaiveDate,
    pub pv_kwh: f64,
    pub wind_kwh: f64,
    pub total_kwh: f64,
}

/// Chart-ready series for the presentation layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnergyCharts {
    pub hourly: Vec<HourlyChartPoint>,
    pub daily: Vec<DailyChartPoint>,
}

/// Configuration the estimate was computed with
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyConfigEcho {
    pub area_m2: f64,
    pub pv: PvConfig,
    pub wind: WindConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyResult {
    pub total_energy_kwh: f64,
    pub pv_energy_kwh: f64,
    pub wind_energy_kwh: f64,
    pub total_revenue: f64,
    pub monthly_breakdown: Vec<MonthlyBreakdownEntry>,
    pub summary: EnergySummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charts: Option<EnergyCharts>,
    pub config: EnergyConfigEcho,
}

impl EnergyResult {
    /// Defined result for "no weather data available"
    pub fn zero(config: EnergyConfigEcho) -> Self {
        Self {
            total_energy_kwh: 0.0,
            pv_energy_kwh: 0.0,
            wind_energy_kwh: 0.0,
            total_revenue: 0.0,
            monthly_breakdown: Vec::new(),
            summary: EnergySummary::default(),
            charts: None,
            config,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.total_energy_kwh == 0.0 && self.total_revenue == 0.0
    }
}
