//! Stockout projection: walks a usage forecast forward against current stock.

use crate::core::{Confidence, UsageForecast};
use chrono::{Days, NaiveDate};
use serde::Serialize;

/// Remaining stock at or below this is treated as depleted.
const DEPLETION_TOLERANCE: f64 = 1e-9;

/// Projected stock at the end of one forecast day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StockLevel {
    /// 1-based day offset from today.
    pub day: usize,
    pub date: NaiveDate,
    pub predicted_usage: f64,
    /// Never negative.
    pub remaining_stock: f64,
    pub stockout: bool,
}

/// Day-by-day stock trajectory under a usage forecast.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockoutProjection {
    pub current_stock: f64,
    /// First day on which stock is exhausted, if within the horizon.
    pub stockout_day: Option<usize>,
    pub stockout_date: Option<NaiveDate>,
    pub stock_levels: Vec<StockLevel>,
    pub forecast_confidence: Confidence,
    pub total_predicted_usage: f64,
}

impl StockoutProjection {
    /// Walk `forecast` forward from `current_stock`, starting the day after `today`.
    pub fn project(current_stock: f64, forecast: &UsageForecast, today: NaiveDate) -> Self {
        let mut running = current_stock;
        let stock_levels: Vec<StockLevel> = forecast
            .predictions()
            .iter()
            .enumerate()
            .map(|(i, &usage)| {
                let day = i + 1;
                running -= usage;
                StockLevel {
                    day,
                    date: day_after(today, day),
                    predicted_usage: usage,
                    remaining_stock: running.max(0.0),
                    stockout: running <= DEPLETION_TOLERANCE,
                }
            })
            .collect();

        let stockout_day = stock_levels.iter().find(|l| l.stockout).map(|l| l.day);

        Self {
            current_stock,
            stockout_day,
            stockout_date: stockout_day.map(|d| day_after(today, d)),
            stock_levels,
            forecast_confidence: forecast.confidence(),
            total_predicted_usage: forecast.total_predicted(),
        }
    }

    pub fn has_stockout(&self) -> bool {
        self.stockout_day.is_some()
    }
}

/// `today` plus `days`, saturating at the last representable date.
fn day_after(today: NaiveDate, days: usize) -> NaiveDate {
    today
        .checked_add_days(Days::new(days as u64))
        .unwrap_or(NaiveDate::MAX)
}

/// Days until stock reaches zero under one constant daily rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Scenario {
    pub daily_usage: f64,
    pub days_to_zero: u32,
}

/// Optimistic, realistic and pessimistic stockout horizons.
///
/// Optimistic assumes lower consumption, so it always lasts at least as long
/// as realistic, which lasts at least as long as pessimistic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StockoutScenarios {
    pub optimistic: Scenario,
    pub realistic: Scenario,
    pub pessimistic: Scenario,
}

impl StockoutScenarios {
    /// Scenarios around the forecast's mean daily usage, `spread` apart.
    ///
    /// `sentinel` is reported whenever the rate is zero or the horizon would
    /// exceed it.
    pub fn from_forecast(
        current_stock: f64,
        forecast: &UsageForecast,
        spread: f64,
        sentinel: u32,
    ) -> Self {
        let realistic = forecast.mean_daily_usage();
        let scenario = |rate: f64| Scenario {
            daily_usage: rate,
            days_to_zero: days_to_zero(current_stock, rate, sentinel),
        };
        Self {
            optimistic: scenario(realistic * (1.0 - spread)),
            realistic: scenario(realistic),
            pessimistic: scenario(realistic * (1.0 + spread)),
        }
    }
}

/// Whole days until `stock` is used up at `daily_rate`, capped at `sentinel`.
pub fn days_to_zero(stock: f64, daily_rate: f64, sentinel: u32) -> u32 {
    if !(daily_rate.is_finite() && daily_rate > 0.0) {
        return sentinel;
    }
    if stock <= 0.0 {
        return 0;
    }
    let days = (stock / daily_rate - DEPLETION_TOLERANCE).ceil();
    if days >= f64::from(sentinel) {
        sentinel
    } else {
        days.max(0.0) as u32
    }
}
