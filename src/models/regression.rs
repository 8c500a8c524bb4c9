//! Least-squares regression of daily usage on (day_index, day_of_week).
//!
//! The `linear` candidate regresses on the two inputs directly; the
//! `polynomial` candidate first expands them into every monomial up to the
//! given degree (for degree 2: d, w, d², d·w, w²) and fits the same way.

use crate::core::DailySeries;
use crate::error::{ForecastError, Result};
use crate::models::{FeaturePoint, UsageModel};
use crate::utils::{ols_fit, OLSResult};

/// OLS usage model over a polynomial expansion of the day features.
#[derive(Debug, Clone)]
pub struct RegressionModel {
    degree: u32,
    name: &'static str,
    ols: Option<OLSResult>,
    fitted: Option<Vec<f64>>,
}

impl RegressionModel {
    /// Plain linear regression on (day_index, day_of_week).
    pub fn linear() -> Self {
        Self {
            degree: 1,
            name: "linear",
            ols: None,
            fitted: None,
        }
    }

    /// Degree-2 polynomial feature expansion feeding a linear fit.
    pub fn polynomial() -> Self {
        Self::with_degree(2, "polynomial")
    }

    /// Polynomial expansion of arbitrary degree under a custom name.
    pub fn with_degree(degree: u32, name: &'static str) -> Self {
        Self {
            degree: degree.max(1),
            name,
            ols: None,
            fitted: None,
        }
    }

    pub fn degree(&self) -> u32 {
        self.degree
    }

    /// Fitted intercept and coefficients.
    pub fn coefficients(&self) -> Option<&OLSResult> {
        self.ols.as_ref()
    }
}

/// Expand `(a, b)` into all monomials of total degree `1..=degree`.
///
/// Within each degree `d` the terms run `a^d, a^(d-1)·b, ..., b^d`.
pub fn polynomial_features(a: f64, b: f64, degree: u32) -> Vec<f64> {
    let mut out = Vec::new();
    for d in 1..=degree {
        for i in (0..=d).rev() {
            out.push(a.powi(i as i32) * b.powi((d - i) as i32));
        }
    }
    out
}

impl UsageModel for RegressionModel {
    fn fit(&mut self, series: &DailySeries) -> Result<()> {
        if series.is_empty() {
            return Err(ForecastError::EmptyData);
        }

        let y = series.quantities();
        let rows: Vec<Vec<f64>> = series
            .observations()
            .iter()
            .map(|o| polynomial_features(o.day_index as f64, f64::from(o.day_of_week), self.degree))
            .collect();
        let width = rows.first().map(|r| r.len()).unwrap_or(0);
        let columns: Vec<Vec<f64>> = (0..width)
            .map(|j| rows.iter().map(|r| r[j]).collect())
            .collect();

        let ols = ols_fit(&y, &columns)?;
        self.fitted = Some(ols.predict_columns(&columns)?);
        self.ols = Some(ols);
        Ok(())
    }

    fn predict_point(&self, point: FeaturePoint) -> Result<f64> {
        let ols = self.ols.as_ref().ok_or(ForecastError::FitRequired)?;
        let row = polynomial_features(point.day_index, f64::from(point.day_of_week), self.degree);
        ols.predict_row(&row)
    }

    fn fitted_values(&self) -> Option<&[f64]> {
        self.fitted.as_deref()
    }

    fn name(&self) -> &str {
        self.name
    }
}
