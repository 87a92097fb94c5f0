//! Photovoltaic yield model

use crate::domain::PvConfig;

/// Hourly PV energy in kWh, aligned 1:1 with the irradiance samples (W/m²).
///
/// Each sample covers one hour, so W/m² / 1000 is kWh/m² for that hour.
/// A non-positive area yields a zero series of matching length; a missing or
/// non-finite sample yields zero for its hour.
pub fn pv_energy(irradiance_wm2: &[Option<f64>], area_m2: f64, cfg: &PvConfig) -> Vec<f64> {
    if area_m2.is_nan() || area_m2 <= 0.0 {
        return vec![0.0; irradiance_wm2.len()];
    }

    let pv_area = area_m2 * cfg.land_coverage;
    let factor = pv_area * cfg.efficiency * cfg.performance_ratio * cfg.system_efficiency;
    if !factor.is_finite() {
        return vec![0.0; irradiance_wm2.len()];
    }

    irradiance_wm2
        .iter()
        .map(|sample| match sample {
            Some(w) if w.is_finite() => (w / 1000.0 * factor).max(0.0),
            _ => 0.0,
        })
        .collect()
}
