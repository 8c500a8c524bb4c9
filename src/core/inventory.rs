//! Consumption events and inventory snapshots read from the surrounding system.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier of a facility (care site).
pub type FacilityId = u64;

/// Identifier of a stocked item.
pub type ItemId = u64;

/// A single logged consumption of an item at a facility on a given date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionEvent {
    pub facility_id: FacilityId,
    pub item_id: ItemId,
    pub date: NaiveDate,
    pub quantity_used: f64,
}

impl ConsumptionEvent {
    pub fn new(facility_id: FacilityId, item_id: ItemId, date: NaiveDate, quantity_used: f64) -> Self {
        Self {
            facility_id,
            item_id,
            date,
            quantity_used,
        }
    }
}

/// Current stock record for a facility/item pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    /// Display name of the item.
    pub item_name: String,
    pub current_quantity: f64,
    pub minimum_level: f64,
    pub maximum_level: Option<f64>,
    pub expiry_date: Option<NaiveDate>,
}

impl InventorySnapshot {
    pub fn new(item_name: impl Into<String>, current_quantity: f64, minimum_level: f64) -> Self {
        Self {
            item_name: item_name.into(),
            current_quantity,
            minimum_level,
            maximum_level: None,
            expiry_date: None,
        }
    }

    pub fn with_expiry_date(mut self, expiry_date: NaiveDate) -> Self {
        self.expiry_date = Some(expiry_date);
        self
    }

    /// Stock on hand, with negative or non-finite values read as zero.
    pub fn stock(&self) -> f64 {
        non_negative(self.current_quantity)
    }

    /// Minimum level, with negative or non-finite values read as zero.
    pub fn minimum(&self) -> f64 {
        non_negative(self.minimum_level)
    }

    /// Stock at or below the minimum level.
    pub fn is_low_stock(&self) -> bool {
        self.stock() <= self.minimum()
    }

    /// Stock at or below `ratio` of the minimum level.
    pub fn is_critical_stock(&self, ratio: f64) -> bool {
        self.stock() <= self.minimum() * ratio
    }

    /// Stock as a percentage of the minimum level; 100 when no minimum is set.
    pub fn stock_level_percentage(&self) -> f64 {
        if self.minimum() == 0.0 {
            return 100.0;
        }
        self.stock() / self.minimum() * 100.0
    }

    /// Signed days from `today` until expiry; negative once expired.
    pub fn days_until_expiry(&self, today: NaiveDate) -> Option<i64> {
        self.expiry_date.map(|d| (d - today).num_days())
    }

    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expiry_date.is_some_and(|d| today > d)
    }

    /// Expires strictly after today but within `days`.
    pub fn is_expiring_soon(&self, today: NaiveDate, days: i64) -> bool {
        self.days_until_expiry(today)
            .is_some_and(|left| left > 0 && left <= days)
    }
}

fn non_negative(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        0.0
    }
}
