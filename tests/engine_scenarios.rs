//! End-to-end scenarios through `ForecastingEngine` with an in-memory source.

use approx::assert_relative_eq;
use chrono::{Duration, NaiveDate};
use supply_forecast::config::EngineConfig;
use supply_forecast::core::{Confidence, InventorySnapshot, AVERAGE_METHOD};
use supply_forecast::engine::{
    AlertCondition, FixedClock, ForecastingEngine, InMemorySource, Urgency,
};

const FACILITY: u64 = 3;
const ITEM: u64 = 11;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 10, 20).unwrap()
}

fn engine_with(
    source: InMemorySource,
    config: EngineConfig,
) -> ForecastingEngine<InMemorySource, FixedClock> {
    ForecastingEngine::with_config(source, config)
        .unwrap()
        .with_clock(FixedClock(today()))
}

/// Ten consecutive days of 5 units ending today.
fn steady_source() -> InMemorySource {
    let mut source = InMemorySource::new();
    for back in 0..10 {
        source.record_usage(FACILITY, ITEM, today() - Duration::days(back), 5.0);
    }
    source
}

fn ten_day_window() -> EngineConfig {
    EngineConfig {
        days_back: 9,
        ..EngineConfig::default()
    }
}

#[test]
fn steady_usage_runs_out_on_day_four() {
    let mut source = steady_source();
    source.set_inventory(FACILITY, ITEM, InventorySnapshot::new("Rice", 20.0, 10.0));
    let engine = engine_with(source, ten_day_window());

    let usage = engine.predict_usage(FACILITY, ITEM, None).unwrap();
    assert_eq!(usage.horizon(), 7);
    for p in usage.predictions() {
        assert_relative_eq!(*p, 5.0, epsilon = 1e-9);
    }
    assert_eq!(usage.confidence(), Confidence::Medium);
    assert_ne!(usage.method(), AVERAGE_METHOD);

    let projection = engine.predict_stockout(FACILITY, ITEM, None).unwrap().unwrap();
    assert_eq!(projection.stockout_day, Some(4));
    assert_eq!(projection.stockout_date, Some(today() + Duration::days(4)));
    assert_eq!(projection.current_stock, 20.0);

    let rec = engine.get_reorder_recommendation(FACILITY, ITEM).unwrap().unwrap();
    // Day 4 falls outside the three-day urgent band
    assert_eq!(rec.urgency, Urgency::High);
    assert!(rec.stockout_risk);
    assert_relative_eq!(rec.predicted_monthly_usage, 150.0, epsilon = 1e-6);
    assert_relative_eq!(rec.recommended_quantity, 145.0, epsilon = 1e-6);
    assert_eq!(rec.scenarios.realistic.days_to_zero, 4);
    assert_eq!(rec.item_name, "Rice");
}

#[test]
fn steady_usage_with_thin_stock_is_urgent() {
    let mut source = steady_source();
    source.set_inventory(FACILITY, ITEM, InventorySnapshot::new("Rice", 15.0, 10.0));
    let engine = engine_with(source, ten_day_window());

    let rec = engine.get_reorder_recommendation(FACILITY, ITEM).unwrap().unwrap();
    assert_eq!(rec.urgency, Urgency::Urgent);
    assert_eq!(rec.stockout_date, Some(today() + Duration::days(3)));
}

#[test]
fn no_history_well_stocked() {
    let mut source = InMemorySource::new();
    source.set_inventory(FACILITY, ITEM, InventorySnapshot::new("Soap", 100.0, 10.0));
    let engine = engine_with(source, EngineConfig::default());

    let usage = engine.predict_usage(FACILITY, ITEM, None).unwrap();
    assert_eq!(usage.predictions(), &[0.0; 7]);
    assert_eq!(usage.confidence(), Confidence::Low);
    assert_eq!(usage.method(), AVERAGE_METHOD);
    assert!(usage.accuracy().is_none());

    let projection = engine.predict_stockout(FACILITY, ITEM, None).unwrap().unwrap();
    assert!(projection.stockout_day.is_none());

    let rec = engine.get_reorder_recommendation(FACILITY, ITEM).unwrap().unwrap();
    assert_eq!(rec.urgency, Urgency::Low);
    assert_eq!(rec.recommended_quantity, 0.0);
    assert!(!rec.stockout_risk);
    assert_eq!(rec.scenarios.pessimistic.days_to_zero, 999);
}

#[test]
fn missing_inventory_record() {
    let engine = engine_with(steady_source(), ten_day_window());

    assert!(engine.predict_stockout(FACILITY, ITEM, None).unwrap().is_none());
    assert!(engine.get_reorder_recommendation(FACILITY, ITEM).unwrap().is_none());
    assert!(engine.check_alerts(FACILITY, ITEM).unwrap().is_empty());

    let usage = engine.predict_usage(FACILITY, ITEM, None).unwrap();
    assert_eq!(usage.horizon(), 7);
    assert_relative_eq!(usage.total_predicted(), 35.0, epsilon = 1e-6);
}

#[test]
fn short_window_always_averages() {
    let mut source = InMemorySource::new();
    source.record_usage(FACILITY, ITEM, today(), 9.0);
    source.record_usage(FACILITY, ITEM, today() - Duration::days(1), 3.0);
    let config = EngineConfig {
        days_back: 2,
        ..EngineConfig::default()
    };
    let engine = engine_with(source, config);

    let usage = engine.predict_usage(FACILITY, ITEM, Some(4)).unwrap();
    assert_eq!(usage.method(), AVERAGE_METHOD);
    // Dense window [0, 3, 9]
    for p in usage.predictions() {
        assert_relative_eq!(*p, 4.0, epsilon = 1e-12);
    }
}

#[test]
fn report_matches_individual_calls() {
    let mut source = steady_source();
    source.set_inventory(FACILITY, ITEM, InventorySnapshot::new("Rice", 20.0, 10.0));
    let engine = engine_with(source, ten_day_window());

    let report = engine.forecast_report(FACILITY, ITEM).unwrap();

    assert_eq!(
        report.usage_prediction,
        engine.predict_usage(FACILITY, ITEM, None).unwrap()
    );
    assert_eq!(
        report.stockout_prediction,
        engine.predict_stockout(FACILITY, ITEM, None).unwrap()
    );
    assert_eq!(
        report.reorder_recommendation,
        engine.get_reorder_recommendation(FACILITY, ITEM).unwrap()
    );
}

#[test]
fn report_without_inventory_still_forecasts() {
    let engine = engine_with(steady_source(), ten_day_window());
    let report = engine.forecast_report(FACILITY, ITEM).unwrap();

    assert_eq!(report.usage_prediction.horizon(), 7);
    assert!(report.stockout_prediction.is_none());
    assert!(report.reorder_recommendation.is_none());
}

#[test]
fn identical_inputs_give_identical_outputs() {
    let mut source = InMemorySource::new();
    for back in 0..30 {
        let q = 3.0 + (back % 7) as f64 + 0.1 * back as f64;
        source.record_usage(FACILITY, ITEM, today() - Duration::days(back), q);
    }
    source.set_inventory(FACILITY, ITEM, InventorySnapshot::new("Beans", 40.0, 15.0));
    let engine = engine_with(source, EngineConfig::default());

    let first = engine.forecast_report(FACILITY, ITEM).unwrap();
    let second = engine.forecast_report(FACILITY, ITEM).unwrap();
    assert_eq!(first, second);
}

#[test]
fn alerts_reflect_snapshot() {
    let mut source = InMemorySource::new();
    source.set_inventory(
        FACILITY,
        ITEM,
        InventorySnapshot::new("Milk powder", 4.0, 5.0)
            .with_expiry_date(today() + Duration::days(2)),
    );
    let engine = engine_with(source, EngineConfig::default());

    assert_eq!(
        engine.check_alerts(FACILITY, ITEM).unwrap(),
        vec![
            AlertCondition::LowStock,
            AlertCondition::ExpiringSoon { days_left: 2 }
        ]
    );
}

#[test]
fn report_serializes_for_the_request_layer() {
    let mut source = steady_source();
    source.set_inventory(FACILITY, ITEM, InventorySnapshot::new("Rice", 20.0, 10.0));
    let engine = engine_with(source, ten_day_window());

    let json = serde_json::to_value(engine.forecast_report(FACILITY, ITEM).unwrap()).unwrap();

    assert_eq!(json["usage_prediction"]["confidence"], "medium");
    assert_eq!(json["stockout_prediction"]["stockout_day"], 4);
    assert_eq!(json["reorder_recommendation"]["urgency"], "high");
}
