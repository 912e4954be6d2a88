//! Outbound (Driven) port for the Subscription Registry subsystem.

use async_trait::async_trait;
use shared_types::{StoreError, Subscription, UserId};

/// Keyed subscription persistence, one row per user.
///
/// The registry service is the only caller that writes through this trait
/// (besides the payment ledger's atomic approval commit on the same
/// backing store). Row-level mutual exclusion per user is the adapter's
/// responsibility; the shipped in-memory adapter serializes all writes
/// behind one lock.
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// Inserts or replaces the user's subscription row.
    async fn upsert(&self, sub: &Subscription) -> Result<(), StoreError>;

    /// Fetches the user's subscription row.
    async fn get(&self, user: UserId) -> Result<Option<Subscription>, StoreError>;

    /// All rows with `active = true`, in no particular order.
    async fn active(&self) -> Result<Vec<Subscription>, StoreError>;
}
