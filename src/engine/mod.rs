//! Forecasting pipeline: forecaster, stockout projector, reorder advisor,
//! alert evaluation and the service facade tying them to a data source.

mod alerts;
mod forecaster;
mod reorder;
mod service;
mod source;
mod stockout;

pub use alerts::{AlertCondition, AlertPolicy};
pub use forecaster::{average_forecast, score_confidence, ConfidenceThresholds, Forecaster};
pub use reorder::{ReorderAdvisor, ReorderRecommendation, Urgency};
pub use service::{ForecastReport, ForecastingEngine};
pub use source::{Clock, FixedClock, InMemorySource, SystemClock, UsageSource};
pub use stockout::{days_to_zero, Scenario, StockLevel, StockoutProjection, StockoutScenarios};
