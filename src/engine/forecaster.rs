//! N-day usage forecasting with an average fallback.

use crate::core::{Confidence, DailySeries, UsageForecast};
use crate::error::Result;
use crate::models::{FeaturePoint, ModelRegistry, ModelSelector, Selection};
use crate::utils::stats::{is_flat, mean, std_dev};
use chrono::{Datelike, NaiveDate};

/// Confidence thresholds on MAE relative to the window's standard deviation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceThresholds {
    pub high_below: f64,
    pub medium_below: f64,
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        Self {
            high_below: 0.3,
            medium_below: 0.6,
        }
    }
}

/// Bucket an in-sample MAE against the spread of the history.
///
/// A constant history (standard deviation 0) cannot be scored and is always
/// medium. A non-finite standard deviation scores as relative error 1.
pub fn score_confidence(mae: f64, std_dev: f64, thresholds: ConfidenceThresholds) -> Confidence {
    if std_dev == 0.0 {
        return Confidence::Medium;
    }
    let relative_error = if std_dev.is_finite() && std_dev > 0.0 {
        mae / std_dev
    } else {
        1.0
    };

    if relative_error < thresholds.high_below {
        Confidence::High
    } else if relative_error < thresholds.medium_below {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}

/// Turns a daily series into a [`UsageForecast`].
#[derive(Debug)]
pub struct Forecaster<'a> {
    selector: ModelSelector<'a>,
    thresholds: ConfidenceThresholds,
}

impl<'a> Forecaster<'a> {
    pub fn new(
        registry: &'a ModelRegistry,
        min_data_points: usize,
        thresholds: ConfidenceThresholds,
    ) -> Self {
        Self {
            selector: ModelSelector::new(registry, min_data_points),
            thresholds,
        }
    }

    /// Forecast `forecast_days` days after `today`, where `today` is the last
    /// day of `series`.
    pub fn forecast(
        &self,
        series: &DailySeries,
        today: NaiveDate,
        forecast_days: usize,
    ) -> UsageForecast {
        let Some(selection) = self.selector.select(series) else {
            return average_forecast(series, forecast_days);
        };

        match self.extrapolate(&selection, series, today, forecast_days) {
            Ok(predictions) => {
                let quantities = series.quantities();
                // A flat history has no spread to score against
                let confidence = if is_flat(&quantities) {
                    Confidence::Medium
                } else {
                    score_confidence(selection.mae, std_dev(&quantities), self.thresholds)
                };
                UsageForecast::from_model(predictions, confidence, selection.name, selection.mae)
            }
            Err(err) => {
                tracing::warn!(
                    method = %selection.name,
                    error = %err,
                    "selected model failed to extrapolate; using average"
                );
                average_forecast(series, forecast_days)
            }
        }
    }

    fn extrapolate(
        &self,
        selection: &Selection,
        series: &DailySeries,
        today: NaiveDate,
        forecast_days: usize,
    ) -> Result<Vec<f64>> {
        let last_index = series.last_index().unwrap_or(0) as f64;
        let today_weekday = today.weekday().num_days_from_monday() as usize;
        (1..=forecast_days)
            .map(|i| {
                let weekday = ((today_weekday + i % 7) % 7) as u32;
                let point = FeaturePoint::new(last_index + i as f64, weekday);
                selection
                    .model
                    .predict_point(point)
                    .map(|p| if p.is_finite() { p.max(0.0) } else { 0.0 })
            })
            .collect()
    }
}

/// Flat forecast at the mean of the dense window (0 when the window is empty).
pub fn average_forecast(series: &DailySeries, forecast_days: usize) -> UsageForecast {
    let avg = if series.is_empty() {
        0.0
    } else {
        mean(&series.quantities())
    };
    UsageForecast::average(avg, forecast_days)
}
