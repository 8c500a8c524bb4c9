//! Accuracy metrics for in-sample model scoring.

use crate::error::{ForecastError, Result};

/// Mean Absolute Error between observed and fitted values.
///
/// # Errors
/// [`ForecastError::EmptyData`] for empty input and
/// [`ForecastError::DimensionMismatch`] when the slices differ in length.
pub fn mae(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    if actual.is_empty() || predicted.is_empty() {
        return Err(ForecastError::EmptyData);
    }
    if actual.len() != predicted.len() {
        return Err(ForecastError::DimensionMismatch {
            expected: actual.len(),
            got: predicted.len(),
        });
    }

    let total: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).abs())
        .sum();
    let score = total / actual.len() as f64;

    if !score.is_finite() {
        return Err(ForecastError::ComputationError(
            "non-finite mean absolute error".into(),
        ));
    }
    Ok(score)
}
