//! Audience predicates and run accounting.

use serde::{Deserialize, Serialize};

// ===== AUDIENCE PREDICATE =====

/// Which slice of the registered user base receives a broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BroadcastTarget {
    /// Every registered user.
    All,
    /// Users with an active subscription.
    ActiveSubscribers,
    /// Registered users without an active subscription.
    NonSubscribers,
}

impl BroadcastTarget {
    /// Short label used in summaries and logs.
    pub fn label(&self) -> &'static str {
        match self {
            BroadcastTarget::All => "all",
            BroadcastTarget::ActiveSubscribers => "subscribers",
            BroadcastTarget::NonSubscribers => "non_subscribers",
        }
    }
}

// ===== RUN ACCOUNTING =====

/// Outcome counters for one broadcast run.
///
/// `sent + failed == total` holds on normal completion; on cancellation the
/// two counters cover only the recipients attempted before the stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BroadcastReport {
    pub sent: u64,
    pub failed: u64,
    pub total: u64,
}

impl BroadcastReport {
    /// Recipients attempted so far.
    pub fn attempted(&self) -> u64 {
        self.sent + self.failed
    }

    /// True when every resolved recipient has been attempted.
    pub fn is_complete(&self) -> bool {
        self.attempted() == self.total
    }
}
