//! Collaborator interfaces: where consumption history, stock and "today" come from.

use crate::core::{ConsumptionEvent, FacilityId, InventorySnapshot, ItemId};
use crate::error::Result;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Read-only access to the consumption log and inventory store.
///
/// Implementations wrap whatever storage the surrounding application uses.
/// Failures are reported as [`ForecastError::Source`](crate::ForecastError::Source).
pub trait UsageSource {
    /// Events for the pair dated within `start..=end`.
    fn fetch_consumption_events(
        &self,
        facility_id: FacilityId,
        item_id: ItemId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ConsumptionEvent>>;

    /// Current inventory record for the pair, if one exists.
    fn fetch_inventory_snapshot(
        &self,
        facility_id: FacilityId,
        item_id: ItemId,
    ) -> Result<Option<InventorySnapshot>>;
}

impl<S: UsageSource + ?Sized> UsageSource for &S {
    fn fetch_consumption_events(
        &self,
        facility_id: FacilityId,
        item_id: ItemId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ConsumptionEvent>> {
        (**self).fetch_consumption_events(facility_id, item_id, start, end)
    }

    fn fetch_inventory_snapshot(
        &self,
        facility_id: FacilityId,
        item_id: ItemId,
    ) -> Result<Option<InventorySnapshot>> {
        (**self).fetch_inventory_snapshot(facility_id, item_id)
    }
}

/// Source of the current calendar date.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local calendar date of the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// A clock pinned to one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// In-memory consumption log and inventory store.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    events: HashMap<(FacilityId, ItemId), Vec<ConsumptionEvent>>,
    inventory: HashMap<(FacilityId, ItemId), InventorySnapshot>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a consumption event.
    pub fn record(&mut self, event: ConsumptionEvent) {
        self.events
            .entry((event.facility_id, event.item_id))
            .or_default()
            .push(event);
    }

    /// Append usage for a pair on a date.
    pub fn record_usage(
        &mut self,
        facility_id: FacilityId,
        item_id: ItemId,
        date: NaiveDate,
        quantity_used: f64,
    ) {
        self.record(ConsumptionEvent::new(facility_id, item_id, date, quantity_used));
    }

    /// Insert or replace the inventory record for a pair.
    pub fn set_inventory(
        &mut self,
        facility_id: FacilityId,
        item_id: ItemId,
        snapshot: InventorySnapshot,
    ) {
        self.inventory.insert((facility_id, item_id), snapshot);
    }

    /// Remove the inventory record for a pair.
    pub fn remove_inventory(&mut self, facility_id: FacilityId, item_id: ItemId) {
        self.inventory.remove(&(facility_id, item_id));
    }
}

impl UsageSource for InMemorySource {
    fn fetch_consumption_events(
        &self,
        facility_id: FacilityId,
        item_id: ItemId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ConsumptionEvent>> {
        Ok(self
            .events
            .get(&(facility_id, item_id))
            .map(|events| {
                events
                    .iter()
                    .filter(|e| e.date >= start && e.date <= end)
                    .copied()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn fetch_inventory_snapshot(
        &self,
        facility_id: FacilityId,
        item_id: ItemId,
    ) -> Result<Option<InventorySnapshot>> {
        Ok(self.inventory.get(&(facility_id, item_id)).cloned())
    }
}
