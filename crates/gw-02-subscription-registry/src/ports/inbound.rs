//! Inbound (Driving) port for the Subscription Registry subsystem.

use async_trait::async_trait;
use shared_types::{RegistryError, Subscription, Timestamp, UserId};

/// Public API of the subscription registry.
///
/// Consumed by the payment ledger (grant on approval), the expiry
/// scheduler (phase queries, deactivation, notification bookkeeping), and
/// the admin panel (status reads).
#[async_trait]
pub trait SubscriptionRegistryApi: Send + Sync {
    /// Grants or renews access for `user` until `expires_at`.
    ///
    /// Upsert semantics: any prior subscription is overwritten, including
    /// its expiry and notification cooldown. Returns the stored row.
    async fn grant(&self, user: UserId, expires_at: Timestamp)
        -> Result<Subscription, RegistryError>;

    /// Records that the user joined the restricted channel. Idempotent;
    /// only meaningful while Active.
    async fn mark_channel_joined(&self, user: UserId) -> Result<(), RegistryError>;

    /// Revokes access: `active = false`, `channel_joined = false`.
    /// Idempotent (no-op when already Inactive).
    async fn deactivate(&self, user: UserId) -> Result<(), RegistryError>;

    /// Stamps `last_notified = at` after a successful expiry warning.
    async fn touch_notified(&self, user: UserId, at: Timestamp) -> Result<(), RegistryError>;

    /// The user's subscription row, if any.
    async fn get(&self, user: UserId) -> Result<Option<Subscription>, RegistryError>;

    /// All active subscriptions.
    async fn active(&self) -> Result<Vec<Subscription>, RegistryError>;

    /// Active subscriptions whose expiry falls within the warn window
    /// (strictly in the future).
    async fn expiring_soon(&self, warn_window_days: u32)
        -> Result<Vec<Subscription>, RegistryError>;

    /// Active subscriptions whose expiry has been reached or passed.
    async fn expired(&self) -> Result<Vec<Subscription>, RegistryError>;
}
