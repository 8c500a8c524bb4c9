//! Alert conditions for a single inventory snapshot.
//!
//! Only decides which conditions hold; creating, deduplicating and marking
//! alerts as read belongs to the surrounding system.

use crate::core::InventorySnapshot;
use chrono::NaiveDate;
use serde::Serialize;

/// A condition that warrants an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AlertCondition {
    /// Stock at or below the minimum level.
    LowStock,
    /// Stock at or below the critical share of the minimum level.
    CriticalStock,
    /// Expires within the warning window.
    ExpiringSoon { days_left: i64 },
    /// Expiry date has passed.
    Expired { days_overdue: i64 },
}

impl AlertCondition {
    /// Stable identifier, matching the alert types used by the alert store.
    pub fn alert_type(&self) -> &'static str {
        match self {
            AlertCondition::LowStock => "low_stock",
            AlertCondition::CriticalStock => "critical_stock",
            AlertCondition::ExpiringSoon { .. } => "expiring",
            AlertCondition::Expired { .. } => "expired",
        }
    }
}

/// Thresholds for alert evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlertPolicy {
    pub critical_stock_ratio: f64,
    pub expiry_warning_days: i64,
}

impl Default for AlertPolicy {
    fn default() -> Self {
        Self {
            critical_stock_ratio: 0.5,
            expiry_warning_days: 7,
        }
    }
}

impl AlertPolicy {
    /// Conditions holding for `snapshot` on `today`: at most one stock
    /// condition followed by at most one expiry condition.
    pub fn evaluate(&self, snapshot: &InventorySnapshot, today: NaiveDate) -> Vec<AlertCondition> {
        let mut conditions = Vec::new();

        if snapshot.is_critical_stock(self.critical_stock_ratio) {
            conditions.push(AlertCondition::CriticalStock);
        } else if snapshot.is_low_stock() {
            conditions.push(AlertCondition::LowStock);
        }

        if let Some(days_left) = snapshot.days_until_expiry(today) {
            if snapshot.is_expired(today) {
                conditions.push(AlertCondition::Expired {
                    days_overdue: -days_left,
                });
            } else if snapshot.is_expiring_soon(today, self.expiry_warning_days) {
                conditions.push(AlertCondition::ExpiringSoon { days_left });
            }
        }

        conditions
    }
}
