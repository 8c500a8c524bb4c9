//! Numerical utilities shared by the candidate models.

pub mod metrics;
pub mod ols;
pub mod stats;

pub use metrics::mae;
pub use ols::{ols_fit, OLSResult};
pub use stats::{is_flat, mean, std_dev};
