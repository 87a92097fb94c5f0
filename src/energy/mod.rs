pub mod aggregate;
pub mod charts;
pub mod pv;
pub mod wind;

pub use aggregate::{aggregate, hourly_records, monthly_breakdown, summarize};
pub use charts::build_charts;
pub use pv::pv_energy;
pub use wind::{wind_energy, wind_power_w, AIR_DENSITY};

use tracing::{debug, warn};

use crate::domain::{
    finite_or_zero, EnergyConfigEcho, EnergyResult, PvConfig, WeatherSeries, WindConfig,
};

/// Estimate PV and wind energy for an already-fetched weather series.
///
/// An empty series is the defined "no weather data" case and yields an
/// all-zero result. Chart failures drop the charts only.
pub fn estimate_from_series(
    series: &WeatherSeries,
    area_m2: f64,
    pv: &PvConfig,
    wind: &WindConfig,
) -> EnergyResult {
    let area_m2 = finite_or_zero(area_m2);
    let config = EnergyConfigEcho {
        area_m2,
        pv: *pv,
        wind: *wind,
    };

    if series.is_empty() {
        warn!("no weather data available, energy estimate is zero");
        return EnergyResult::zero(config);
    }

    let pv_kwh = pv_energy(&series.irradiance(), area_m2, pv);
    let wind_kwh = wind_energy(&series.wind_speed(), wind);
    let records = hourly_records(&series.timestamps(), &pv_kwh, &wind_kwh);

    let mut result = aggregate(&records, config);
    result.charts = match build_charts(&records) {
        Ok(charts) => Some(charts),
        Err(e) => {
            warn!(error = %e, "chart series unavailable");
            None
        }
    };

    debug!(
        rows = records.len(),
        total_kwh = result.total_energy_kwh,
        pv_kwh = result.pv_energy_kwh,
        wind_kwh = result.wind_energy_kwh,
        "energy estimate complete"
    );
    sanitize(result)
}

/// Normalize every number that crosses the JSON boundary
fn sanitize(mut result: EnergyResult) -> EnergyResult {
    result.total_energy_kwh = finite_or_zero(result.total_energy_kwh);
    result.pv_energy_kwh = finite_or_zero(result.pv_energy_kwh);
    result.wind_energy_kwh = finite_or_zero(result.wind_energy_kwh);
    result.total_revenue = finite_or_zero(result.total_revenue);
    for month in &mut result.monthly_breakdown {
        month.pv_energy_kwh = finite_or_zero(month.pv_energy_kwh);
        month.wind_energy_kwh = finite_or_zero(month.wind_energy_kwh);
        month.total_energy_kwh = finite_or_zero(month.total_energy_kwh);
        month.revenue = finite_or_zero(month.revenue);
    }
    result.summary.peak_hourly_kwh = finite_or_zero(result.summary.peak_hourly_kwh);
    result.summary.mean_hourly_kwh = finite_or_zero(result.summary.mean_hourly_kwh);
    result.summary.pv_share = finite_or_zero(result.summary.pv_share);
    result
}
