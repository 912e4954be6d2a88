//! # Core Domain Entities
//!
//! Defines the entities owned by the subscription lifecycle engine.
//!
//! ## Clusters
//!
//! - **Identity**: `UserId`, `User`
//! - **Payments**: `PaymentId`, `Payment`, `PaymentStatus`, `ReceiptRef`
//! - **Subscriptions**: `Subscription`
//! - **Distribution**: `ChannelId`, `Channel`, `MessagePayload`,
//!   `BroadcastSummary`

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::time::Timestamp;

// =============================================================================
// CLUSTER A: IDENTITY
// =============================================================================

/// Opaque numeric user identifier assigned by the messaging transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub i64);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered user. Created on first interaction, never deleted.
///
/// Only the display metadata (`full_name`, `username`) may change after
/// creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Transport-assigned identity.
    pub id: UserId,
    /// Display name at registration time.
    pub full_name: String,
    /// Optional handle (without the leading `@`).
    pub username: Option<String>,
    /// When the user first interacted with the system.
    pub registered_at: Timestamp,
}

// =============================================================================
// CLUSTER B: PAYMENTS
// =============================================================================

/// Monotonic payment identifier, unique across the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PaymentId(pub u64);

impl std::fmt::Display for PaymentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Opaque handle to an uploaded receipt attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptRef(pub String);

/// Lifecycle status of a payment request.
///
/// Transitions exactly once from `Pending` to a terminal state; a second
/// decision on a terminal payment is an `InvalidTransition`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// Submitted, awaiting administrator review.
    Pending,
    /// Accepted; the owning user received a subscription grant.
    Approved,
    /// Declined; no subscription side effect.
    Rejected,
}

impl PaymentStatus {
    /// Whether the status is a terminal (decided) state.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PaymentStatus::Pending)
    }
}

/// A user-submitted, admin-reviewed claim of funds transfer, tied to a
/// chosen access duration.
///
/// `amount` and `duration_days` are immutable after creation. Amounts are
/// integer minor currency units; no floating point money.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// Ledger-assigned monotonic id.
    pub id: PaymentId,
    /// Owning user.
    pub user_id: UserId,
    /// Claimed amount in minor currency units.
    pub amount: u64,
    /// Receipt attachment handle.
    pub receipt: ReceiptRef,
    /// Chosen subscription duration.
    pub duration_days: u32,
    /// Current lifecycle status.
    pub status: PaymentStatus,
    /// Submission time.
    pub created_at: Timestamp,
    /// Decision time; `None` until approved or rejected.
    pub decided_at: Option<Timestamp>,
    /// Computed subscription expiry; set only on approval.
    pub expires_at: Option<Timestamp>,
    /// Optional administrator note (approval note or rejection reason).
    pub admin_note: Option<String>,
}

// =============================================================================
// CLUSTER C: SUBSCRIPTIONS
// =============================================================================

/// A user's current paid-access grant. At most one per user; renewals
/// upsert rather than append.
///
/// `active` is authoritative for access control, independent of wall-clock
/// comparison. It is transitioned to `false` only by the expiry sweep or an
/// explicit administrator action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    /// Owning user (the upsert key).
    pub user_id: UserId,
    /// Authoritative access flag.
    pub active: bool,
    /// When the current grant started.
    pub started_at: Timestamp,
    /// When the current grant expires.
    pub expires_at: Timestamp,
    /// Whether the user has joined the restricted channel.
    pub channel_joined: bool,
    /// When the user was last sent an expiry warning, if ever.
    pub last_notified: Option<Timestamp>,
}

impl Subscription {
    /// A fresh grant starting at `now` and running until `expires_at`.
    ///
    /// Renewals go through the same constructor: the previous expiry is
    /// overwritten, not stacked, and the notification cooldown resets.
    pub fn granted(user_id: UserId, now: Timestamp, expires_at: Timestamp) -> Self {
        Self {
            user_id,
            active: true,
            started_at: now,
            expires_at,
            channel_joined: false,
            last_notified: None,
        }
    }
}

// =============================================================================
// CLUSTER D: DISTRIBUTION
// =============================================================================

/// External identifier of a restricted distribution channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelId(pub i64);

impl std::fmt::Display for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A restricted destination channel. Read-only input to eviction and invite
/// issuance; the core never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    /// Transport-side channel identifier.
    pub id: ChannelId,
    /// Display name.
    pub name: String,
    /// Invite reference handed to users after approval.
    pub invite_link: String,
    /// Inactive channels are skipped by eviction.
    pub active: bool,
}

/// Opaque handle to an uploaded media attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRef(pub String);

/// A single outbound message body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MessagePayload {
    /// Plain text message.
    Text(String),
    /// Media attachment with a caption.
    Media {
        /// Attachment handle.
        media: MediaRef,
        /// Caption shown with the media.
        caption: String,
    },
}

impl MessagePayload {
    /// Short kind label used in run summaries and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            MessagePayload::Text(_) => "text",
            MessagePayload::Media { .. } => "media",
        }
    }
}

/// Durable record of one completed broadcast run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BroadcastSummary {
    /// Correlation id of the run.
    pub id: Uuid,
    /// Message kind label (`text` / `media`).
    pub kind: String,
    /// Recipient-predicate label.
    pub target: String,
    /// Successful sends.
    pub sent: u64,
    /// Failed sends.
    pub failed: u64,
    /// Resolved recipient count; `sent + failed == total` on completion.
    pub total: u64,
    /// When the run finished (or was cancelled).
    pub finished_at: Timestamp,
}
