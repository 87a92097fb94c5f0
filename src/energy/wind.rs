//! Wind turbine yield model

use std::f64::consts::PI;

use crate::domain::WindConfig;

/// Sea-level air density in kg/m³
pub const AIR_DENSITY: f64 = 1.225;

/// Rotor swept area in m²
pub fn swept_area(rotor_diameter_m: f64) -> f64 {
    PI * (rotor_diameter_m / 2.0).powi(2)
}

/// Instantaneous electrical power in W at wind speed `v` (m/s).
///
/// Below cut-in and above cut-out the turbine is idle. Between rated speed
/// and cut-out the output is capped at rated power; the ramp between cut-in
/// and rated speed follows the cubic law uncapped.
pub fn wind_power_w(v: f64, cfg: &WindConfig) -> f64 {
    if !v.is_finite() || v < cfg.cut_in_ms || v > cfg.cut_out_ms {
        return 0.0;
    }

    let area = swept_area(cfg.rotor_diameter_m);
    let mut power = 0.5 * AIR_DENSITY * area * v.powi(3) * cfg.cp * cfg.system_efficiency;

    if v >= cfg.rated_ws_ms {
        power = power.min(cfg.rated_power_kw * 1000.0);
    }

    if power.is_finite() {
        power.max(0.0)
    } else {
        0.0
    }
}

/// Hourly wind energy in kWh, aligned with the wind-speed samples.
///
/// A turbine with no rotor or no rated power yields a zero series.
pub fn wind_energy(wind_speed_ms: &[Option<f64>], cfg: &WindConfig) -> Vec<f64> {
    let idle = |x: f64| x.is_nan() || x <= 0.0;
    if idle(cfg.rotor_diameter_m) || idle(cfg.rated_power_kw) {
        return vec![0.0; wind_speed_ms.len()];
    }

    wind_speed_ms
        .iter()
        .map(|v| v.map_or(0.0, |v| wind_power_w(v, cfg) / 1000.0))
        .collect()
}
