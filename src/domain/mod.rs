pub mod agri;
pub mod analysis;
pub mod energy;
pub mod scenario;
pub mod weather;

pub use agri::*;
pub use analysis::*;
pub use energy::*;
pub use scenario::*;
pub use weather::*;

/// Replace NaN and infinities so values can cross the JSON boundary
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
