//! Engine configuration.
//!
//! Every field has a default, so an empty TOML document yields
//! [`EngineConfig::default`]. Unknown keys are rejected.

use crate::core::MAX_DAYS_BACK;
use crate::error::{ForecastError, Result};
use crate::models::CandidateKind;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables of the forecasting pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Lookback window in days; the window holds `days_back + 1` days.
    pub days_back: u32,
    /// Shortest window on which candidate models are fitted.
    pub min_data_points: usize,
    /// Horizon used when callers do not ask for one.
    pub default_forecast_days: usize,
    /// Horizon of the forecast behind reorder recommendations.
    pub reorder_horizon_days: usize,
    /// Safety stock as a multiple of the minimum level.
    pub safety_stock_factor: f64,
    /// Stockouts on or before this day are urgent.
    pub urgent_within_days: usize,
    /// Relative error below which confidence is high.
    pub high_confidence_below: f64,
    /// Relative error below which confidence is medium.
    pub medium_confidence_below: f64,
    /// Fractional spread around the mean rate for stockout scenarios.
    pub scenario_spread: f64,
    /// Days-to-zero reported when no stockout is foreseeable.
    pub no_stockout_sentinel_days: u32,
    /// Stock at or below this share of the minimum level is critical.
    pub critical_stock_ratio: f64,
    /// Items expiring within this many days raise an expiry warning.
    pub expiry_warning_days: i64,
    /// Candidate models, in tie-break order.
    pub candidates: Vec<CandidateKind>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            days_back: 30,
            min_data_points: 5,
            default_forecast_days: 7,
            reorder_horizon_days: 30,
            safety_stock_factor: 1.5,
            urgent_within_days: 3,
            high_confidence_below: 0.3,
            medium_confidence_below: 0.6,
            scenario_spread: 0.3,
            no_stockout_sentinel_days: 999,
            critical_stock_ratio: 0.5,
            expiry_warning_days: 7,
            candidates: CandidateKind::DEFAULT.to_vec(),
        }
    }
}

impl EngineConfig {
    /// Load and validate configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ForecastError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or fails [`validate`](Self::validate).
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| ForecastError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ForecastError::Config(e.to_string()))
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<()> {
        if self.days_back > MAX_DAYS_BACK {
            return Err(ForecastError::Config(format!(
                "days_back must be at most {MAX_DAYS_BACK}"
            )));
        }
        if self.min_data_points == 0 {
            return Err(ForecastError::Config(
                "min_data_points must be at least 1".into(),
            ));
        }
        if !(self.safety_stock_factor.is_finite() && self.safety_stock_factor >= 0.0) {
            return Err(ForecastError::Config(
                "safety_stock_factor must be a non-negative number".into(),
            ));
        }
        if !(self.critical_stock_ratio.is_finite() && self.critical_stock_ratio >= 0.0) {
            return Err(ForecastError::Config(
                "critical_stock_ratio must be a non-negative number".into(),
            ));
        }
        if !(0.0..1.0).contains(&self.scenario_spread) {
            return Err(ForecastError::Config(
                "scenario_spread must be in [0, 1)".into(),
            ));
        }
        if !(self.high_confidence_below > 0.0
            && self.high_confidence_below <= self.medium_confidence_below
            && self.medium_confidence_below.is_finite())
        {
            return Err(ForecastError::Config(
                "confidence thresholds must satisfy 0 < high <= medium".into(),
            ));
        }
        if self.expiry_warning_days < 0 {
            return Err(ForecastError::Config(
                "expiry_warning_days must not be negative".into(),
            ));
        }
        if self.candidates.is_empty() {
            return Err(ForecastError::Config(
                "at least one candidate model is required".into(),
            ));
        }
        Ok(())
    }
}
