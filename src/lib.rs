pub mod agri;
pub mod api;
pub mod cache;
pub mod config;
pub mod domain;
pub mod energy;
pub mod engine;
pub mod error;
pub mod optimizer;
pub mod telemetry;
pub mod weather;

pub use engine::PotentialEngine;
pub use error::{EngineError, EngineResult};
