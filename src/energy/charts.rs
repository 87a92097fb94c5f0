//! Chart-ready series for the presentation layer

use itertools::Itertools;

use crate::domain::{DailyChartPoint, EnergyCharts, HourlyChartPoint, HourlyEnergyRecord};
use crate::error::{EngineError, EngineResult};

/// Build hourly and daily (UTC date) chart series.
///
/// Fails on any non-finite value so a broken chart never reaches the JSON
/// boundary; the caller drops the charts and keeps the rest of the result.
pub fn build_charts(records: &[HourlyEnergyRecord]) -> EngineResult<EnergyCharts> {
    if let Some(bad) = records
        .iter()
        .find(|r| !(r.pv_energy_kwh.is_finite() && r.wind_energy_kwh.is_finite()))
    {
        return Err(EngineError::ComputationFailure(format!(
            "non-finite energy at {}",
            bad.timestamp
        )));
    }

    let hourly = records
        .iter()
        .map(|r| HourlyChartPoint {
            timestamp: r.timestamp,
            pv_kwh: r.pv_energy_kwh,
            wind_kwh: r.wind_energy_kwh,
        })
        .collect();

    let days = records
        .iter()
        .sorted_by_key(|r| r.timestamp)
        .chunk_by(|r| r.timestamp.date_naive());
    let daily = days
        .into_iter()
        .map(|(date, group)| {
            let (pv, wind) = group.fold((0.0, 0.0), |(pv, wind), r| {
                (pv + r.pv_energy_kwh, wind + r.wind_energy_kwh)
            });
            DailyChartPoint {
                date,
                pv_kwh: pv,
                wind_kwh: wind,
                total_kwh: pv + wind,
            }
        })
        .collect();

    Ok(EnergyCharts { hourly, daily })
}
