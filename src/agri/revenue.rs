use tracing::debug;

use super::crops::CropCatalog;
use crate::domain::{finite_or_zero, AgriRevenueResult, CropRevenueDetail};

/// Revenue per recommended crop over `area_ha` hectares.
///
/// Details keep the input order. The best crop is the first one with the
/// strictly highest positive revenue; no crops or no area gives an empty result.
pub fn estimate_agri_revenue(
    crops: &[String],
    area_ha: f64,
    catalog: &CropCatalog,
) -> AgriRevenueResult {
    let area_ha = finite_or_zero(area_ha);
    if crops.is_empty() || area_ha <= 0.0 {
        return AgriRevenueResult::default();
    }

    let details: Vec<CropRevenueDetail> = crops
        .iter()
        .map(|crop| {
            let spec = catalog.lookup(crop);
            let yield_kg = spec.yield_kg_per_ha * area_ha;
            CropRevenueDetail {
                crop: crop.clone(),
                yield_kg,
                price_per_kg: spec.price_per_kg,
                revenue: yield_kg * spec.price_per_kg,
            }
        })
        .collect();

    let mut best_crop = None;
    let mut max_revenue = 0.0;
    for detail in &details {
        if detail.revenue > max_revenue {
            max_revenue = detail.revenue;
            best_crop = Some(detail.crop.clone());
        }
    }

    debug!(crops = details.len(), ?best_crop, max_revenue, "agricultural revenue estimated");
    AgriRevenueResult {
        best_crop,
        max_revenue,
        details,
    }
}
