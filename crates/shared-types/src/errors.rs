//! # Error Types
//!
//! Defines error types used across subsystems.
//!
//! Retry policy, per the system error taxonomy: `NotFound` and
//! `InvalidTransition` are surfaced to the caller and never retried;
//! `DeliveryError` and `RevocationError` are isolated per recipient /
//! per channel, logged, and never abort a batch operation.

use thiserror::Error;

use crate::entities::{ChannelId, PaymentId, PaymentStatus, UserId};

/// Authorization failures at subsystem boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// Actor is not on the configured administrator allow-list.
    #[error("Unauthorized: user {actor} is not an administrator")]
    Unauthorized { actor: UserId },
}

/// Faults raised by the persistent store adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Backend-level failure (connection, serialization, corruption).
    #[error("Store backend error: {0}")]
    Backend(String),

    /// A conditional write found the stored row in a different state than
    /// the caller assumed. The write was not applied.
    #[error("Store write conflict: {0}")]
    Conflict(String),
}

/// Errors surfaced by the payment ledger.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Referenced payment id does not exist.
    #[error("Payment not found: {0}")]
    NotFound(PaymentId),

    /// Decision attempted on an already-terminal payment. State unchanged.
    #[error("Invalid transition: payment {payment} is already {status:?}")]
    InvalidTransition {
        payment: PaymentId,
        status: PaymentStatus,
    },

    /// Caller failed the administrator capability check.
    #[error(transparent)]
    Access(#[from] AccessError),

    /// Store adapter fault.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors surfaced by the subscription registry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    /// No subscription row for the user.
    #[error("No subscription for user {0}")]
    NotFound(UserId),

    /// Store adapter fault.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Typed delivery failure for a single outbound message.
///
/// Transient by design: the caller decides the retry policy (the expiry
/// scheduler retries on its next cycle, the broadcast engine not at all).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    /// Recipient has blocked the sender.
    #[error("Delivery failed: user {0} blocked the sender")]
    Blocked(UserId),

    /// Recipient id is unknown to the transport.
    #[error("Delivery failed: user {0} unreachable")]
    Unreachable(UserId),

    /// Transport-side flood control rejected the send.
    #[error("Delivery failed: rate limited")]
    RateLimited,

    /// Any other transport fault.
    #[error("Delivery failed: {0}")]
    Transport(String),
}

/// A channel membership revoke/restore call failed.
///
/// Logged and skipped; deactivation never depends on channel API
/// availability.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Revocation failed for user {user} in channel {channel}: {detail}")]
pub struct RevocationError {
    pub user: UserId,
    pub channel: ChannelId,
    pub detail: String,
}
