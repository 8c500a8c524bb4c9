//! Ordinary Least Squares (OLS) regression over a dense design matrix.
//!
//! Regressors are centered and scaled before the normal equations are formed,
//! and the intercept is recovered afterwards, so a constant target always
//! yields zero slopes and an intercept equal to its mean.

use crate::error::{ForecastError, Result};
use crate::utils::stats::population_std_dev;

/// Ridge term added to the diagonal of the standardized normal equations.
const RIDGE: f64 = 1e-8;

/// OLS regression coefficients and intercept, in the original feature scale.
#[derive(Debug, Clone)]
pub struct OLSResult {
    /// Regression coefficients (one per regressor column).
    pub coefficients: Vec<f64>,
    /// Intercept term.
    pub intercept: f64,
}

impl OLSResult {
    /// Predict the target for a single feature row.
    pub fn predict_row(&self, row: &[f64]) -> Result<f64> {
        if row.len() != self.coefficients.len() {
            return Err(ForecastError::DimensionMismatch {
                expected: self.coefficients.len(),
                got: row.len(),
            });
        }
        Ok(self.intercept
            + self
                .coefficients
                .iter()
                .zip(row.iter())
                .map(|(c, x)| c * x)
                .sum::<f64>())
    }

    /// Predict the target for every row of a column-major design matrix.
    pub fn predict_columns(&self, columns: &[Vec<f64>]) -> Result<Vec<f64>> {
        if columns.len() != self.coefficients.len() {
            return Err(ForecastError::DimensionMismatch {
                expected: self.coefficients.len(),
                got: columns.len(),
            });
        }
        let n = columns.first().map(|c| c.len()).unwrap_or(0);

        let mut predictions = vec![self.intercept; n];
        for (coef, column) in self.coefficients.iter().zip(columns.iter()) {
            if column.len() != n {
                return Err(ForecastError::DimensionMismatch {
                    expected: n,
                    got: column.len(),
                });
            }
            for (pred, x) in predictions.iter_mut().zip(column.iter()) {
                *pred += coef * x;
            }
        }
        Ok(predictions)
    }

    /// Get the number of regressors.
    pub fn num_regressors(&self) -> usize {
        self.coefficients.len()
    }
}

/// Fit OLS regression: y = intercept + X @ coefficients
///
/// `columns` is column-major: one vector per regressor, each of length `y.len()`.
/// Uses Cholesky decomposition to solve the standardized normal equations.
pub fn ols_fit(y: &[f64], columns: &[Vec<f64>]) -> Result<OLSResult> {
    let n = y.len();
    if n == 0 {
        return Err(ForecastError::InsufficientData { needed: 1, got: 0 });
    }
    if y.iter().any(|v| !v.is_finite()) {
        return Err(ForecastError::ComputationError(
            "non-finite target value".into(),
        ));
    }

    let y_mean = y.iter().sum::<f64>() / n as f64;
    let k = columns.len();
    if k == 0 {
        return Ok(OLSResult {
            coefficients: vec![],
            intercept: y_mean,
        });
    }

    for column in columns {
        if column.len() != n {
            return Err(ForecastError::DimensionMismatch {
                expected: n,
                got: column.len(),
            });
        }
        if column.iter().any(|v| !v.is_finite()) {
            return Err(ForecastError::ComputationError(
                "non-finite regressor value".into(),
            ));
        }
    }

    // Standardize each column; constant columns keep scale 1 and end up with a
    // zero coefficient because their centered values are all zero.
    let means: Vec<f64> = columns
        .iter()
        .map(|c| c.iter().sum::<f64>() / n as f64)
        .collect();
    let scales: Vec<f64> = columns
        .iter()
        .zip(means.iter())
        .map(|(c, &m)| {
            let s = population_std_dev(c, m);
            if s > 1e-12 {
                s
            } else {
                1.0
            }
        })
        .collect();

    let z: Vec<Vec<f64>> = columns
        .iter()
        .enumerate()
        .map(|(j, c)| c.iter().map(|x| (x - means[j]) / scales[j]).collect())
        .collect();
    let yc: Vec<f64> = y.iter().map(|v| v - y_mean).collect();

    let mut xtx = vec![vec![0.0; k]; k];
    let mut xty = vec![0.0; k];
    for i in 0..k {
        for j in 0..=i {
            let dot: f64 = z[i].iter().zip(z[j].iter()).map(|(a, b)| a * b).sum();
            xtx[i][j] = dot;
            xtx[j][i] = dot;
        }
        xty[i] = z[i].iter().zip(yc.iter()).map(|(a, b)| a * b).sum();
    }
    for i in 0..k {
        xtx[i][i] += RIDGE;
    }

    let beta = solve_symmetric(&xtx, &xty).ok_or_else(|| {
        ForecastError::ComputationError(
            "OLS regression failed: matrix not positive definite".into(),
        )
    })?;

    let coefficients: Vec<f64> = beta
        .iter()
        .zip(scales.iter())
        .map(|(b, s)| b / s)
        .collect();
    let intercept = y_mean
        - coefficients
            .iter()
            .zip(means.iter())
            .map(|(c, m)| c * m)
            .sum::<f64>();

    if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
        return Err(ForecastError::ComputationError(
            "OLS regression produced non-finite coefficients".into(),
        ));
    }

    Ok(OLSResult {
        coefficients,
        intercept,
    })
}

/// Cholesky solve of `a @ x = b` for a symmetric positive definite `a`.
///
/// Returns `None` when a pivot is not strictly positive.
fn solve_symmetric(a: &[Vec<f64>], b: &[f64]) -> Option<Vec<f64>> {
    let n = b.len();
    if n == 0 || a.len() != n {
        return None;
    }

    // Lower factor, row by row: a = l @ l'
    let mut l: Vec<Vec<f64>> = Vec::with_capacity(n);
    for (i, a_row) in a.iter().enumerate() {
        let mut row = vec![0.0; i + 1];
        for j in 0..=i {
            let partner: &[f64] = if j == i { &row } else { &l[j] };
            let partial: f64 = (0..j).map(|k| row[k] * partner[k]).sum();
            let residual = a_row[j] - partial;
            row[j] = if i == j {
                if residual <= 0.0 {
                    return None;
                }
                residual.sqrt()
            } else {
                residual / l[j][j]
            };
        }
        l.push(row);
    }

    // l @ z = b
    let mut z = Vec::with_capacity(n);
    for (i, row) in l.iter().enumerate() {
        let partial: f64 = row[..i].iter().zip(z.iter()).map(|(lij, zj)| lij * zj).sum();
        z.push((b[i] - partial) / row[i]);
    }

    // l' @ x = z
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let partial: f64 = ((i + 1)..n).map(|j| l[j][i] * x[j]).sum();
        x[i] = (z[i] - partial) / l[i][i];
    }

    Some(x)
}
