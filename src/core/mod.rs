//! Core data structures: consumption events, inventory snapshots, daily series
//! and usage forecasts.

mod forecast;
mod inventory;
mod series;

pub use forecast::{Confidence, UsageForecast, AVERAGE_METHOD};
pub use inventory::{ConsumptionEvent, FacilityId, InventorySnapshot, ItemId};
pub use series::{DailyObservation, DailySeries, TimeSeriesBuilder, MAX_DAYS_BACK};
