//! Summary statistics over daily usage windows.

/// Arithmetic mean; `NaN` when there are no values.
pub fn mean(values: &[f64]) -> f64 {
    match values.len() {
        0 => f64::NAN,
        n => values.iter().sum::<f64>() / n as f64,
    }
}

fn squared_deviations(values: &[f64], center: f64) -> f64 {
    values.iter().map(|v| (v - center) * (v - center)).sum()
}

/// Sample variance (n - 1 denominator); `NaN` below two values.
pub fn variance(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return f64::NAN;
    }
    squared_deviations(values, mean(values)) / (n - 1) as f64
}

/// Sample standard deviation. Used as the yardstick for forecast confidence.
pub fn std_dev(values: &[f64]) -> f64 {
    variance(values).sqrt()
}

/// True when every value is the same, up to summation residue.
///
/// The spread counts as zero when it is within `1e-9` of the magnitude of the
/// values, so a run of `0.1`s is flat even though its computed standard
/// deviation is not exactly zero.
pub fn is_flat(values: &[f64]) -> bool {
    let Some(&first) = values.first() else {
        return true;
    };
    if values.iter().all(|&v| v == first) {
        return true;
    }
    let spread = std_dev(values);
    spread.is_finite() && spread <= FLAT_TOLERANCE * mean(values).abs().max(1.0)
}

const FLAT_TOLERANCE: f64 = 1e-9;

/// Population standard deviation around a known mean, for regressor scaling.
pub(crate) fn population_std_dev(values: &[f64], mean: f64) -> f64 {
    match values.len() {
        0 => f64::NAN,
        n => (squared_deviations(values, mean) / n as f64).sqrt(),
    }
}
