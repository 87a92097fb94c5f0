//! Soil-driven crop advice and agricultural revenue

pub mod crops;
pub mod revenue;
pub mod soil;

pub use crops::{recommend_crops, weighted_average, CropCatalog, CropSpec, SoilSummary};
pub use revenue::estimate_agri_revenue;
pub use soil::{fetch_or_reference, ReferenceSoil, SoilGridsClient, SoilSource};
