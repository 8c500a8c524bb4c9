//! Dense daily consumption series built from a sparse event log.

use crate::core::inventory::{ConsumptionEvent, FacilityId, ItemId};
use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;
use std::collections::btree_map::{BTreeMap, Entry};

/// Longest lookback a builder will span: one hundred years.
pub const MAX_DAYS_BACK: u32 = 36_500;

/// One calendar day in a [`DailySeries`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyObservation {
    /// Offset from the window start, 0-based.
    pub day_index: usize,
    /// 0 = Monday .. 6 = Sunday.
    pub day_of_week: u32,
    /// Quantity consumed that day; 0 when nothing was logged.
    pub quantity_used: f64,
}

/// Dense, zero-filled daily usage over a fixed lookback window.
///
/// The window covers `start..=end`, so it always has `(end - start) + 1`
/// entries and `day_index` runs 0, 1, 2, ... without gaps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySeries {
    start: NaiveDate,
    end: NaiveDate,
    observations: Vec<DailyObservation>,
}

impl DailySeries {
    /// Build a series directly from per-day quantities starting at `start`.
    ///
    /// Windows running past the last representable date end at
    /// [`NaiveDate::MAX`].
    pub fn from_quantities(start: NaiveDate, quantities: &[f64]) -> Self {
        let first_weekday = start.weekday().num_days_from_monday() as usize;
        let observations = quantities
            .iter()
            .enumerate()
            .map(|(i, &q)| DailyObservation {
                day_index: i,
                day_of_week: ((first_weekday + i % 7) % 7) as u32,
                quantity_used: sanitize_quantity(q),
            })
            .collect::<Vec<_>>();
        let span = observations.len().saturating_sub(1) as u64;
        let end = start
            .checked_add_days(Days::new(span))
            .unwrap_or(NaiveDate::MAX);
        Self {
            start,
            end,
            observations,
        }
    }

    /// First day of the window.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the window (inclusive).
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn observations(&self) -> &[DailyObservation] {
        &self.observations
    }

    /// Usage quantities in day order.
    pub fn quantities(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.quantity_used).collect()
    }

    /// Index of the last day in the window, `None` when empty.
    pub fn last_index(&self) -> Option<usize> {
        self.observations.last().map(|o| o.day_index)
    }

    /// Total recorded usage in the window.
    pub fn total_usage(&self) -> f64 {
        self.observations.iter().map(|o| o.quantity_used).sum()
    }

    /// True when no day in the window carries any usage.
    pub fn has_no_usage(&self) -> bool {
        self.observations.iter().all(|o| o.quantity_used == 0.0)
    }
}

/// Builder that turns consumption events into a [`DailySeries`].
#[derive(Debug, Clone)]
pub struct TimeSeriesBuilder {
    today: NaiveDate,
    days_back: u32,
}

impl TimeSeriesBuilder {
    /// Window `[today - days_back, today]`, with `days_back` capped at
    /// [`MAX_DAYS_BACK`].
    pub fn new(today: NaiveDate, days_back: u32) -> Self {
        Self {
            today,
            days_back: days_back.min(MAX_DAYS_BACK),
        }
    }

    /// First day of the lookback window; never earlier than [`NaiveDate::MIN`].
    pub fn window_start(&self) -> NaiveDate {
        self.today
            .checked_sub_days(Days::new(u64::from(self.days_back)))
            .unwrap_or(NaiveDate::MIN)
    }

    /// Last day of the lookback window.
    pub fn window_end(&self) -> NaiveDate {
        self.today
    }

    /// Build the dense series for one facility/item pair.
    ///
    /// Events for other pairs or outside the window are ignored; several events
    /// on the same date are summed.
    pub fn build(
        &self,
        facility_id: FacilityId,
        item_id: ItemId,
        events: &[ConsumptionEvent],
    ) -> DailySeries {
        let start = self.window_start();
        let end = self.window_end();

        let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        let mut duplicates = 0usize;
        for event in events {
            if event.facility_id != facility_id || event.item_id != item_id {
                continue;
            }
            if event.date < start || event.date > end {
                continue;
            }
            let quantity = sanitize_quantity(event.quantity_used);
            if quantity != event.quantity_used {
                tracing::warn!(
                    facility_id,
                    item_id,
                    date = %event.date,
                    quantity = event.quantity_used,
                    "clamped invalid consumption quantity to zero"
                );
            }
            match by_date.entry(event.date) {
                Entry::Occupied(mut slot) => {
                    duplicates += 1;
                    *slot.get_mut() += quantity;
                }
                Entry::Vacant(slot) => {
                    slot.insert(quantity);
                }
            }
        }
        if duplicates > 0 {
            tracing::debug!(facility_id, item_id, duplicates, "merged same-day events");
        }

        let days = usize::try_from((end - start).num_days() + 1).unwrap_or(0);
        let quantities: Vec<f64> = start
            .iter_days()
            .take(days)
            .map(|date| by_date.get(&date).copied().unwrap_or(0.0))
            .collect();

        tracing::debug!(
            facility_id,
            item_id,
            days,
            logged_days = by_date.len(),
            "built daily usage series"
        );
        DailySeries::from_quantities(start, &quantities)
    }
}

fn sanitize_quantity(q: f64) -> f64 {
    if q.is_finite() && q > 0.0 {
        q
    } else {
        0.0
    }
}
