//! Outbound ports: audience resolution, run history, progress reporting.

use async_trait::async_trait;

use shared_types::{BroadcastSummary, StoreError, UserId};

use crate::domain::target::BroadcastReport;

/// Read-only view of the registered user base, queried once per run to
/// resolve the audience.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Every registered user id.
    async fn all_users(&self) -> Result<Vec<UserId>, StoreError>;

    /// Ids of users holding an active subscription.
    async fn active_subscribers(&self) -> Result<Vec<UserId>, StoreError>;
}

/// Durable history of completed broadcast runs.
#[async_trait]
pub trait BroadcastStore: Send + Sync {
    /// Appends one finished run.
    async fn record(&self, summary: &BroadcastSummary) -> Result<(), StoreError>;

    /// The `n` most recent runs, newest first.
    async fn recent(&self, n: usize) -> Result<Vec<BroadcastSummary>, StoreError>;
}

/// Receives periodic progress snapshots during a run.
///
/// Called every `progress_every` attempts and once at the end; failures in
/// the sink must not disturb the run, so the method is infallible.
#[async_trait]
pub trait ProgressSink: Send + Sync {
    async fn progress(&self, report: BroadcastReport);
}

/// A sink that discards progress; for callers that do not watch the run.
pub struct NullProgress;

#[async_trait]
impl ProgressSink for NullProgress {
    async fn progress(&self, _report: BroadcastReport) {}
}
