//! Admin-panel statistics snapshot.

use serde::Serialize;

use gw_02_subscription_registry::{classify, SubscriptionPhase};
use shared_types::{PaymentStatus, Timestamp};

use crate::adapters::memory_store::MemoryStore;

/// Point-in-time aggregate over the whole dataset, computed under one
/// read lock so the numbers are mutually consistent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub total_users: u64,
    pub active_subscriptions: u64,
    pub expiring_soon: u64,
    pub pending_payments: u64,
    pub approved_payments: u64,
    /// Sum of approved payment amounts, minor currency units.
    pub approved_revenue: u64,
}

impl Statistics {
    pub fn as_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl MemoryStore {
    /// Computes the statistics snapshot at `now`.
    pub fn statistics(&self, now: Timestamp, warn_window_days: u32) -> Statistics {
        self.with_read(|snap| {
            let mut active = 0u64;
            let mut expiring = 0u64;
            for sub in snap.subscriptions() {
                if !sub.active {
                    continue;
                }
                active += 1;
                if classify(sub, now, warn_window_days) == SubscriptionPhase::ExpiringSoon {
                    expiring += 1;
                }
            }
            let mut pending = 0u64;
            let mut approved = 0u64;
            let mut revenue = 0u64;
            for payment in snap.payments() {
                match payment.status {
                    PaymentStatus::Pending => pending += 1,
                    PaymentStatus::Approved => {
                        approved += 1;
                        revenue += payment.amount;
                    }
                    PaymentStatus::Rejected => {}
                }
            }
            Statistics {
                total_users: snap.users().count() as u64,
                active_subscriptions: active,
                expiring_soon: expiring,
                pending_payments: pending,
                approved_payments: approved,
                approved_revenue: revenue,
            }
        })
    }
}
