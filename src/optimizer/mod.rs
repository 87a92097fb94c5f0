//! Land-use scenario optimization

pub mod scenarios;

pub use scenarios::{mix_revenues, ScenarioOptimizer};
