//! Hourly → monthly aggregation and revenue

use chrono::{DateTime, Datelike, Utc};
use itertools::Itertools;

use crate::domain::{
    finite_or_zero, EnergyConfigEcho, EnergyResult, EnergySummary, HourlyEnergyRecord,
    MonthlyBreakdownEntry,
};

/// Zip aligned timestamp, PV and wind series into hourly records
pub fn hourly_records(
    timestamps: &[DateTime<Utc>],
    pv_kwh: &[f64],
    wind_kwh: &[f64],
) -> Vec<HourlyEnergyRecord> {
    timestamps
        .iter()
        .zip(pv_kwh)
        .zip(wind_kwh)
        .map(|((&timestamp, &pv), &wind)| HourlyEnergyRecord {
            timestamp,
            pv_energy_kwh: pv,
            wind_energy_kwh: wind,
            total_energy_kwh: pv + wind,
        })
        .collect()
}

/// One entry per calendar month (UTC) that has at least one record, oldest first
pub fn monthly_breakdown(
    records: &[HourlyEnergyRecord],
    price_per_kwh: f64,
) -> Vec<MonthlyBreakdownEntry> {
    let months = records
        .iter()
        .sorted_by_key(|r| r.timestamp)
        .chunk_by(|r| (r.timestamp.year(), r.timestamp.month()));

    months
        .into_iter()
        .map(|((year, month), group)| {
            let (pv, wind, total) = group.fold((0.0, 0.0, 0.0), |(pv, wind, total), r| {
                (
                    pv + r.pv_energy_kwh,
                    wind + r.wind_energy_kwh,
                    total + r.total_energy_kwh,
                )
            });
            MonthlyBreakdownEntry {
                month: format!("{year:04}-{month:02}"),
                pv_energy_kwh: pv,
                wind_energy_kwh: wind,
                total_energy_kwh: total,
                revenue: total * price_per_kwh,
            }
        })
        .collect()
}

pub fn summarize(records: &[HourlyEnergyRecord]) -> EnergySummary {
    if records.is_empty() {
        return EnergySummary::default();
    }

    let total: f64 = records.iter().map(|r| r.total_energy_kwh).sum();
    let pv: f64 = records.iter().map(|r| r.pv_energy_kwh).sum();

    EnergySummary {
        sample_count: records.len(),
        productive_hours: records.iter().filter(|r| r.total_energy_kwh > 0.0).count(),
        peak_hourly_kwh: records
            .iter()
            .map(|r| r.total_energy_kwh)
            .fold(0.0, f64::max),
        mean_hourly_kwh: total / records.len() as f64,
        pv_share: if total > 0.0 { pv / total } else { 0.0 },
    }
}

/// Roll hourly records up into an [`EnergyResult`] without charts.
///
/// Revenue uses the PV configuration's flat price for both PV and wind.
pub fn aggregate(records: &[HourlyEnergyRecord], config: EnergyConfigEcho) -> EnergyResult {
    if records.is_empty() {
        return EnergyResult::zero(config);
    }

    let price = finite_or_zero(config.pv.price_per_kwh);
    let pv: f64 = records.iter().map(|r| r.pv_energy_kwh).sum();
    let wind: f64 = records.iter().map(|r| r.wind_energy_kwh).sum();
    let total: f64 = records.iter().map(|r| r.total_energy_kwh).sum();

    EnergyResult {
        total_energy_kwh: total,
        pv_energy_kwh: pv,
        wind_energy_kwh: wind,
        total_revenue: total * price,
        monthly_breakdown: monthly_breakdown(records, price),
        summary: summarize(records),
        charts: None,
        config,
    }
}
