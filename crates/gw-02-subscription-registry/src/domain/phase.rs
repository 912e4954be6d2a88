//! Subscription classification.
//!
//! Pure functions of `(subscription, now, window)` used by the expiry
//! scheduler. Keeping these free of I/O is what makes sweep timing
//! testable with a mock clock.

use serde::{Deserialize, Serialize};
use shared_types::time::{days, hours, MILLIS_PER_DAY};
use shared_types::{Subscription, Timestamp};

/// Where a subscription sits relative to its expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubscriptionPhase {
    /// Active, expiry beyond the warn window.
    Active,
    /// Active, expiry within the warn window but still in the future.
    ExpiringSoon,
    /// Active, expiry reached or passed. The sweep will deactivate.
    Expired,
    /// Not active; expiry is irrelevant.
    Inactive,
}

/// Classifies a subscription at `now` with the given warn window.
///
/// The `active` flag is checked first: an inactive subscription is
/// `Inactive` regardless of its expiry. Tie-break: `expires_at == now` is
/// `Expired`, not `ExpiringSoon`.
pub fn classify(sub: &Subscription, now: Timestamp, warn_window_days: u32) -> SubscriptionPhase {
    if !sub.active {
        return SubscriptionPhase::Inactive;
    }
    if sub.expires_at <= now {
        return SubscriptionPhase::Expired;
    }
    if sub.expires_at <= now + days(warn_window_days) {
        return SubscriptionPhase::ExpiringSoon;
    }
    SubscriptionPhase::Active
}

/// Whether an expiry warning may be sent at `now`.
///
/// True iff the user was never notified, or the cooldown has fully elapsed
/// since the last warning. This is what prevents duplicate warnings from
/// back-to-back sweep cycles.
pub fn should_notify(sub: &Subscription, now: Timestamp, cooldown_hours: u32) -> bool {
    match sub.last_notified {
        None => true,
        Some(last) => now.saturating_sub(last) >= hours(cooldown_hours),
    }
}

/// Whole days remaining until expiry, for warning messages. Zero once
/// expired.
pub fn days_left(sub: &Subscription, now: Timestamp) -> u32 {
    (sub.expires_at.saturating_sub(now) / MILLIS_PER_DAY) as u32
}
