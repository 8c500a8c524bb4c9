//! Weekday profile model.
//!
//! Predicts each day as the mean usage observed on the same weekday within the
//! window. Weekdays absent from the window fall back to the overall mean.

use crate::core::DailySeries;
use crate::error::{ForecastError, Result};
use crate::models::{FeaturePoint, UsageModel};

/// Mean usage per weekday.
#[derive(Debug, Clone, Default)]
pub struct WeekdayProfile {
    profile: Option<[f64; 7]>,
    fitted: Option<Vec<f64>>,
}

impl WeekdayProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fitted mean usage indexed by weekday (0 = Monday).
    pub fn profile(&self) -> Option<&[f64; 7]> {
        self.profile.as_ref()
    }
}

impl UsageModel for WeekdayProfile {
    fn fit(&mut self, series: &DailySeries) -> Result<()> {
        if series.is_empty() {
            return Err(ForecastError::EmptyData);
        }

        let mut sums = [0.0; 7];
        let mut counts = [0usize; 7];
        for o in series.observations() {
            let dow = (o.day_of_week % 7) as usize;
            sums[dow] += o.quantity_used;
            counts[dow] += 1;
        }
        let overall = series.total_usage() / series.len() as f64;

        let mut profile = [overall; 7];
        for dow in 0..7 {
            if counts[dow] > 0 {
                profile[dow] = sums[dow] / counts[dow] as f64;
            }
        }

        self.fitted = Some(
            series
                .observations()
                .iter()
                .map(|o| profile[(o.day_of_week % 7) as usize])
                .collect(),
        );
        self.profile = Some(profile);
        Ok(())
    }

    fn predict_point(&self, point: FeaturePoint) -> Result<f64> {
        let profile = self.profile.as_ref().ok_or(ForecastError::FitRequired)?;
        Ok(profile[(point.day_of_week % 7) as usize])
    }

    fn fitted_values(&self) -> Option<&[f64]> {
        self.fitted.as_deref()
    }

    fn name(&self) -> &str {
        "weekday_profile"
    }
}
