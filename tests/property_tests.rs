//! Property-based tests for the forecasting pipeline.
//!
//! These tests verify invariants that should hold for all consumption
//! histories, using randomly generated daily usage.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use supply_forecast::config::EngineConfig;
use supply_forecast::core::{Confidence, InventorySnapshot, AVERAGE_METHOD};
use supply_forecast::engine::{FixedClock, ForecastingEngine, InMemorySource, Urgency};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
}

/// Engine over a history where `usage[i]` was consumed `i` days before today.
fn engine(
    usage: &[f64],
    stock: Option<(f64, f64)>,
    days_back: u32,
) -> ForecastingEngine<InMemorySource, FixedClock> {
    let mut source = InMemorySource::new();
    for (back, &q) in usage.iter().enumerate() {
        if q > 0.0 {
            source.record_usage(1, 1, today() - Duration::days(back as i64), q);
        }
    }
    if let Some((quantity, minimum)) = stock {
        source.set_inventory(1, 1, InventorySnapshot::new("Item", quantity, minimum));
    }
    let config = EngineConfig {
        days_back,
        ..EngineConfig::default()
    };
    ForecastingEngine::with_config(source, config)
        .unwrap()
        .with_clock(FixedClock(today()))
}

/// Sparse daily usage: most days empty, some with whole-unit consumption.
fn usage_strategy(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(
        prop_oneof![3 => Just(0.0), 2 => (1u32..50).prop_map(f64::from)],
        0..max_len,
    )
}

// =============================================================================
// Property: forecast shape
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn forecast_length_matches_horizon_and_is_non_negative(
        usage in usage_strategy(31),
        horizon in 0usize..40
    ) {
        let forecast = engine(&usage, None, 30).predict_usage(1, 1, Some(horizon)).unwrap();

        prop_assert_eq!(forecast.horizon(), horizon);
        prop_assert!(forecast.predictions().iter().all(|p| *p >= 0.0 && p.is_finite()));
    }

    #[test]
    fn total_equals_sum_of_predictions(usage in usage_strategy(31)) {
        let forecast = engine(&usage, None, 30).predict_usage(1, 1, Some(14)).unwrap();
        let sum: f64 = forecast.predictions().iter().sum();

        prop_assert!((forecast.total_predicted() - sum).abs() < 1e-9);
    }

    #[test]
    fn short_windows_always_average(usage in usage_strategy(4), days_back in 0u32..4) {
        let forecast = engine(&usage, None, days_back).predict_usage(1, 1, None).unwrap();

        prop_assert_eq!(forecast.method(), AVERAGE_METHOD);
        prop_assert_eq!(forecast.confidence(), Confidence::Low);
        prop_assert!(forecast.accuracy().is_none());
    }

    #[test]
    fn constant_usage_is_medium_confidence(rate in 1u32..100, days_back in 4u32..40) {
        let usage = vec![f64::from(rate); days_back as usize + 1];
        let forecast = engine(&usage, None, days_back).predict_usage(1, 1, None).unwrap();

        prop_assert_eq!(forecast.confidence(), Confidence::Medium);
        prop_assert!(forecast.accuracy().is_some());
    }

    #[test]
    fn fractional_constant_usage_is_medium_confidence(
        rate in (1u32..1000).prop_map(|r| f64::from(r) / 10.0),
        days_back in 4u32..40
    ) {
        let usage = vec![rate; days_back as usize + 1];
        let forecast = engine(&usage, None, days_back).predict_usage(1, 1, None).unwrap();

        prop_assert_eq!(forecast.confidence(), Confidence::Medium);
        prop_assert!(forecast.predictions().iter().all(|p| (p - rate).abs() < 1e-6));
    }
}

// =============================================================================
// Property: stockout and reorder
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn stockout_day_is_first_cumulative_crossing(
        usage in usage_strategy(31),
        stock in 0u32..200
    ) {
        let stock = f64::from(stock);
        let engine = engine(&usage, Some((stock, 10.0)), 30);
        let forecast = engine.predict_usage(1, 1, None).unwrap();
        let projection = engine.predict_stockout(1, 1, None).unwrap().unwrap();

        let mut remaining = stock;
        let mut expected = None;
        for (i, p) in forecast.predictions().iter().enumerate() {
            remaining -= p;
            if remaining <= 1e-9 {
                expected = Some(i + 1);
                break;
            }
        }
        prop_assert_eq!(projection.stockout_day, expected);
    }

    #[test]
    fn urgency_follows_stockout_day(
        usage in usage_strategy(31),
        stock in 0u32..400,
        minimum in 0u32..50
    ) {
        let stock = f64::from(stock);
        let minimum = f64::from(minimum);
        let engine = engine(&usage, Some((stock, minimum)), 30);
        let rec = engine.get_reorder_recommendation(1, 1).unwrap().unwrap();
        let projection = engine.predict_stockout(1, 1, Some(30)).unwrap().unwrap();

        let expected = match projection.stockout_day {
            Some(day) if day <= 3 => Urgency::Urgent,
            Some(_) => Urgency::High,
            None if stock <= minimum => Urgency::Medium,
            None => Urgency::Low,
        };
        prop_assert_eq!(rec.urgency, expected);
        prop_assert_eq!(rec.stockout_risk, projection.stockout_day.is_some());
        prop_assert!(rec.recommended_quantity >= 0.0);
    }

    #[test]
    fn scenarios_are_ordered(usage in usage_strategy(31), stock in 0u32..500) {
        let engine = engine(&usage, Some((f64::from(stock), 5.0)), 30);
        let rec = engine.get_reorder_recommendation(1, 1).unwrap().unwrap();
        let s = rec.scenarios;

        prop_assert!(s.optimistic.days_to_zero >= s.realistic.days_to_zero);
        prop_assert!(s.realistic.days_to_zero >= s.pessimistic.days_to_zero);
    }

    #[test]
    fn missing_inventory_is_absent(usage in usage_strategy(31)) {
        let engine = engine(&usage, None, 30);

        prop_assert!(engine.predict_stockout(1, 1, None).unwrap().is_none());
        prop_assert!(engine.get_reorder_recommendation(1, 1).unwrap().is_none());
    }
}
