//! Stateless forecasting service over an injected data source and clock.

use crate::config::EngineConfig;
use crate::core::{DailySeries, FacilityId, InventorySnapshot, ItemId, TimeSeriesBuilder, UsageForecast};
use crate::engine::alerts::{AlertCondition, AlertPolicy};
use crate::engine::forecaster::{ConfidenceThresholds, Forecaster};
use crate::engine::reorder::{ReorderAdvisor, ReorderRecommendation};
use crate::engine::source::{Clock, SystemClock, UsageSource};
use crate::engine::stockout::StockoutProjection;
use crate::error::Result;
use crate::models::{CandidateKind, ModelRegistry};
use chrono::NaiveDate;
use serde::Serialize;

/// Usage forecast, stockout projection and reorder advice for one pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastReport {
    pub usage_prediction: UsageForecast,
    /// Absent when the pair has no inventory record.
    pub stockout_prediction: Option<StockoutProjection>,
    /// Absent when the pair has no inventory record.
    pub reorder_recommendation: Option<ReorderRecommendation>,
}

/// Forecasting engine.
///
/// Holds no mutable state: every call fetches its inputs from the source,
/// runs the pipeline and returns fresh values. Only collaborator failures
/// are returned as errors.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use supply_forecast::engine::{FixedClock, ForecastingEngine, InMemorySource};
/// use supply_forecast::core::InventorySnapshot;
///
/// let today = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
/// let mut source = InMemorySource::new();
/// source.set_inventory(1, 42, InventorySnapshot::new("Rice", 100.0, 10.0));
///
/// let engine = ForecastingEngine::new(source).with_clock(FixedClock(today));
/// let rec = engine.get_reorder_recommendation(1, 42).unwrap().unwrap();
/// assert_eq!(rec.recommended_quantity, 0.0);
/// ```
pub struct ForecastingEngine<S, C = SystemClock> {
    source: S,
    clock: C,
    config: EngineConfig,
    registry: ModelRegistry,
}

impl<S: UsageSource> ForecastingEngine<S, SystemClock> {
    /// Engine with the default configuration and the system clock.
    pub fn new(source: S) -> Self {
        let config = EngineConfig::default();
        Self {
            source,
            clock: SystemClock,
            registry: CandidateKind::registry(&config.candidates),
            config,
        }
    }

    /// Engine with a validated custom configuration.
    pub fn with_config(source: S, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            source,
            clock: SystemClock,
            registry: CandidateKind::registry(&config.candidates),
            config,
        })
    }
}

impl<S: UsageSource, C: Clock> ForecastingEngine<S, C> {
    /// Replace the clock.
    pub fn with_clock<C2: Clock>(self, clock: C2) -> ForecastingEngine<S, C2> {
        ForecastingEngine {
            source: self.source,
            clock,
            config: self.config,
            registry: self.registry,
        }
    }

    /// Replace the candidate registry, e.g. to add a custom model.
    pub fn with_registry(mut self, registry: ModelRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Forecast usage for the next `forecast_days` days (configured default when `None`).
    pub fn predict_usage(
        &self,
        facility_id: FacilityId,
        item_id: ItemId,
        forecast_days: Option<usize>,
    ) -> Result<UsageForecast> {
        let today = self.clock.today();
        let days = forecast_days.unwrap_or(self.config.default_forecast_days);
        let series = self.load_series(facility_id, item_id, today)?;
        let forecast = self.forecaster().forecast(&series, today, days);

        tracing::info!(
            facility_id,
            item_id,
            method = forecast.method(),
            confidence = %forecast.confidence(),
            total = forecast.total_predicted(),
            "predicted usage"
        );
        Ok(forecast)
    }

    /// Project the stockout day, or `None` when the pair has no inventory record.
    pub fn predict_stockout(
        &self,
        facility_id: FacilityId,
        item_id: ItemId,
        forecast_days: Option<usize>,
    ) -> Result<Option<StockoutProjection>> {
        let Some(snapshot) = self.source.fetch_inventory_snapshot(facility_id, item_id)? else {
            tracing::debug!(facility_id, item_id, "no inventory record; skipping stockout projection");
            return Ok(None);
        };
        let today = self.clock.today();
        let days = forecast_days.unwrap_or(self.config.default_forecast_days);
        let series = self.load_series(facility_id, item_id, today)?;
        let forecast = self.forecaster().forecast(&series, today, days);
        let projection = StockoutProjection::project(snapshot.stock(), &forecast, today);

        tracing::info!(
            facility_id,
            item_id,
            stockout_day = ?projection.stockout_day,
            "projected stockout"
        );
        Ok(Some(projection))
    }

    /// Reorder advice over the reorder horizon, or `None` without an inventory record.
    pub fn get_reorder_recommendation(
        &self,
        facility_id: FacilityId,
        item_id: ItemId,
    ) -> Result<Option<ReorderRecommendation>> {
        let Some(snapshot) = self.source.fetch_inventory_snapshot(facility_id, item_id)? else {
            tracing::debug!(facility_id, item_id, "no inventory record; skipping reorder advice");
            return Ok(None);
        };
        let today = self.clock.today();
        let series = self.load_series(facility_id, item_id, today)?;
        let recommendation = self.recommend(&snapshot, &series, today);

        tracing::info!(
            facility_id,
            item_id,
            urgency = %recommendation.urgency,
            quantity = recommendation.recommended_quantity,
            "reorder recommendation"
        );
        Ok(Some(recommendation))
    }

    /// All three results from a single fetch of history and inventory.
    pub fn forecast_report(&self, facility_id: FacilityId, item_id: ItemId) -> Result<ForecastReport> {
        let today = self.clock.today();
        let snapshot = self.source.fetch_inventory_snapshot(facility_id, item_id)?;
        let series = self.load_series(facility_id, item_id, today)?;
        let forecaster = self.forecaster();

        let usage = forecaster.forecast(&series, today, self.config.default_forecast_days);
        let stockout = snapshot
            .as_ref()
            .map(|s| StockoutProjection::project(s.stock(), &usage, today));
        let reorder = snapshot
            .as_ref()
            .map(|s| self.recommend(s, &series, today));

        tracing::info!(
            facility_id,
            item_id,
            method = usage.method(),
            has_inventory = snapshot.is_some(),
            "built forecast report"
        );
        Ok(ForecastReport {
            usage_prediction: usage,
            stockout_prediction: stockout,
            reorder_recommendation: reorder,
        })
    }

    /// Alert conditions for the pair; empty when it has no inventory record.
    pub fn check_alerts(&self, facility_id: FacilityId, item_id: ItemId) -> Result<Vec<AlertCondition>> {
        let snapshot = self.source.fetch_inventory_snapshot(facility_id, item_id)?;
        Ok(snapshot
            .map(|s| self.alert_policy().evaluate(&s, self.clock.today()))
            .unwrap_or_default())
    }

    fn recommend(
        &self,
        snapshot: &InventorySnapshot,
        series: &DailySeries,
        today: NaiveDate,
    ) -> ReorderRecommendation {
        let horizon = self.config.reorder_horizon_days;
        let forecast = self.forecaster().forecast(series, today, horizon);
        let projection = StockoutProjection::project(snapshot.stock(), &forecast, today);
        self.advisor().advise(snapshot, &forecast, Some(&projection))
    }

    fn load_series(&self, facility_id: FacilityId, item_id: ItemId, today: NaiveDate) -> Result<DailySeries> {
        let builder = TimeSeriesBuilder::new(today, self.config.days_back);
        let events = self.source.fetch_consumption_events(
            facility_id,
            item_id,
            builder.window_start(),
            builder.window_end(),
        )?;
        Ok(builder.build(facility_id, item_id, &events))
    }

    fn forecaster(&self) -> Forecaster<'_> {
        Forecaster::new(
            &self.registry,
            self.config.min_data_points,
            ConfidenceThresholds {
                high_below: self.config.high_confidence_below,
                medium_below: self.config.medium_confidence_below,
            },
        )
    }

    fn advisor(&self) -> ReorderAdvisor {
        ReorderAdvisor {
            safety_stock_factor: self.config.safety_stock_factor,
            urgent_within_days: self.config.urgent_within_days,
            scenario_spread: self.config.scenario_spread,
            no_stockout_sentinel_days: self.config.no_stockout_sentinel_days,
        }
    }

    fn alert_policy(&self) -> AlertPolicy {
        AlertPolicy {
            critical_stock_ratio: self.config.critical_stock_ratio,
            expiry_warning_days: self.config.expiry_warning_days,
        }
    }
}

impl<S, C> std::fmt::Debug for ForecastingEngine<S, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForecastingEngine")
            .field("config", &self.config)
            .field("candidates", &self.registry.len())
            .finish()
    }
}
