//! # supply-forecast
//!
//! Usage forecasting and reorder advice for facility supply inventories.
//!
//! Given the daily consumption log of one item at one facility, the engine
//! predicts near-term usage, projects the day stock runs out, and recommends
//! a reorder quantity with an urgency tier. It reads history and stock through
//! the [`engine::UsageSource`] trait and never writes anything back.
//!
//! The pipeline runs leaf-first:
//! [`core::TimeSeriesBuilder`] → [`models::ModelSelector`] →
//! [`engine::Forecaster`] → [`engine::StockoutProjection`] →
//! [`engine::ReorderAdvisor`].

#![allow(clippy::needless_range_loop)]

pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod models;
pub mod utils;

pub use error::{ForecastError, Result};

pub mod prelude {
    pub use crate::config::EngineConfig;
    pub use crate::core::{
        Confidence, ConsumptionEvent, DailySeries, InventorySnapshot, UsageForecast,
    };
    pub use crate::engine::{
        Clock, FixedClock, ForecastReport, ForecastingEngine, InMemorySource,
        ReorderRecommendation, StockoutProjection, Urgency, UsageSource,
    };
    pub use crate::error::{ForecastError, Result};
    pub use crate::models::{CandidateKind, UsageModel};
}
