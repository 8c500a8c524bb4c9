//! Reorder quantity and urgency from a forecast, its projection and thresholds.

use crate::core::{Confidence, InventorySnapshot, UsageForecast};
use crate::engine::stockout::{StockoutProjection, StockoutScenarios};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// Coarse reorder priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
    Urgent,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
            Urgency::Urgent => "urgent",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to order for one facility/item pair and how soon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReorderRecommendation {
    pub item_name: String,
    pub current_stock: f64,
    pub minimum_level: f64,
    pub predicted_monthly_usage: f64,
    pub safety_stock: f64,
    pub recommended_quantity: f64,
    pub urgency: Urgency,
    pub stockout_risk: bool,
    pub stockout_date: Option<NaiveDate>,
    pub confidence: Confidence,
    pub scenarios: StockoutScenarios,
}

/// Reorder policy parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReorderAdvisor {
    /// Safety stock as a multiple of the minimum level.
    pub safety_stock_factor: f64,
    /// Stockouts on or before this day are urgent.
    pub urgent_within_days: usize,
    pub scenario_spread: f64,
    pub no_stockout_sentinel_days: u32,
}

impl Default for ReorderAdvisor {
    fn default() -> Self {
        Self {
            safety_stock_factor: 1.5,
            urgent_within_days: 3,
            scenario_spread: 0.3,
            no_stockout_sentinel_days: 999,
        }
    }
}

impl ReorderAdvisor {
    /// Recommend a reorder from a horizon forecast and its stockout projection.
    ///
    /// `projection` may be absent; it is then treated as "no stockout projected".
    pub fn advise(
        &self,
        snapshot: &InventorySnapshot,
        forecast: &UsageForecast,
        projection: Option<&StockoutProjection>,
    ) -> ReorderRecommendation {
        let current_stock = snapshot.stock();
        let minimum_level = snapshot.minimum();
        let monthly_usage = forecast.total_predicted();
        let safety_stock = minimum_level * self.safety_stock_factor;
        let shortfall = (monthly_usage + safety_stock - current_stock).max(0.0);

        let stockout_day = projection.and_then(|p| p.stockout_day);
        let urgency = match stockout_day {
            Some(day) if day <= self.urgent_within_days => Urgency::Urgent,
            Some(_) => Urgency::High,
            None if current_stock <= minimum_level => Urgency::Medium,
            None => Urgency::Low,
        };

        ReorderRecommendation {
            item_name: snapshot.item_name.clone(),
            current_stock,
            minimum_level,
            predicted_monthly_usage: monthly_usage,
            safety_stock,
            recommended_quantity: shortfall,
            urgency,
            stockout_risk: stockout_day.is_some(),
            stockout_date: projection.and_then(|p| p.stockout_date),
            confidence: forecast.confidence(),
            scenarios: StockoutScenarios::from_forecast(
                current_stock,
                forecast,
                self.scenario_spread,
                self.no_stockout_sentinel_days,
            ),
        }
    }
}
