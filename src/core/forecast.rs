//! Usage forecast result structure.

use serde::Serialize;
use std::fmt;

/// Heuristic confidence bucket attached to a forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Method identifier of the average fallback path.
pub const AVERAGE_METHOD: &str = "average";

/// Point predictions of daily usage for the days after today.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageForecast {
    predictions: Vec<f64>,
    total_predicted: f64,
    confidence: Confidence,
    method: String,
    accuracy: Option<f64>,
}

impl UsageForecast {
    /// Forecast produced by a fitted model with its in-sample MAE.
    ///
    /// Predictions are clamped to be non-negative.
    pub fn from_model(
        predictions: Vec<f64>,
        confidence: Confidence,
        method: impl Into<String>,
        accuracy: f64,
    ) -> Self {
        Self::assemble(predictions, confidence, method.into(), Some(accuracy))
    }

    /// Flat forecast repeating `daily_usage` for `horizon` days.
    pub fn average(daily_usage: f64, horizon: usize) -> Self {
        Self::assemble(
            vec![daily_usage; horizon],
            Confidence::Low,
            AVERAGE_METHOD.to_string(),
            None,
        )
    }

    fn assemble(
        predictions: Vec<f64>,
        confidence: Confidence,
        method: String,
        accuracy: Option<f64>,
    ) -> Self {
        let predictions: Vec<f64> = predictions
            .into_iter()
            .map(|p| if p.is_finite() { p.max(0.0) } else { 0.0 })
            .collect();
        let total_predicted = predictions.iter().sum();
        Self {
            predictions,
            total_predicted,
            confidence,
            method,
            accuracy,
        }
    }

    /// Daily predictions, day 1 first.
    pub fn predictions(&self) -> &[f64] {
        &self.predictions
    }

    /// Sum of all predictions.
    pub fn total_predicted(&self) -> f64 {
        self.total_predicted
    }

    pub fn confidence(&self) -> Confidence {
        self.confidence
    }

    /// Name of the model that produced the forecast, or `"average"`.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// In-sample MAE of the selected model; `None` on the fallback path.
    pub fn accuracy(&self) -> Option<f64> {
        self.accuracy
    }

    /// Number of forecast days.
    pub fn horizon(&self) -> usize {
        self.predictions.len()
    }

    pub fn is_fallback(&self) -> bool {
        self.accuracy.is_none()
    }

    /// Mean predicted daily usage; 0 for an empty horizon.
    pub fn mean_daily_usage(&self) -> f64 {
        if self.predictions.is_empty() {
            0.0
        } else {
            self.total_predicted / self.predictions.len() as f64
        }
    }
}
