//! Outbound (Driven) port for the Payment Ledger subsystem.
//!
//! The persistent store is an external collaborator; the ledger only sees
//! this trait. The store adapter decides how durability works, but it must
//! honor the atomicity contract on [`PaymentStore::commit_decision`].

use async_trait::async_trait;
use shared_types::{Payment, PaymentId, ReceiptRef, StoreError, Subscription, Timestamp, UserId};

/// Fields of a payment known at submission time. The store assigns the id.
#[derive(Debug, Clone)]
pub struct NewPayment {
    /// Owning user.
    pub user_id: UserId,
    /// Claimed amount in minor currency units.
    pub amount: u64,
    /// Receipt attachment handle.
    pub receipt: ReceiptRef,
    /// Chosen subscription duration.
    pub duration_days: u32,
    /// Submission time.
    pub created_at: Timestamp,
}

/// Keyed payment persistence.
#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// Persists a new Pending payment and returns it with its assigned id.
    async fn insert(&self, payment: NewPayment) -> Result<Payment, StoreError>;

    /// Fetches a payment by id.
    async fn get(&self, id: PaymentId) -> Result<Option<Payment>, StoreError>;

    /// Persists a terminal decision.
    ///
    /// For approvals, `grant` carries the subscription row and the adapter
    /// MUST apply both writes in one atomic step: a concurrent expiry sweep
    /// may observe the pre-decision state or the fully-decided state, never
    /// an approved payment without its grant or vice versa.
    ///
    /// The adapter MUST also re-check the stored row under the same
    /// critical section and refuse with [`StoreError::Conflict`] when it is
    /// no longer Pending, so two racing decisions based on the same stale
    /// fetch cannot both land.
    async fn commit_decision(
        &self,
        payment: &Payment,
        grant: Option<&Subscription>,
    ) -> Result<(), StoreError>;

    /// Pending payments, newest first.
    async fn pending(&self) -> Result<Vec<Payment>, StoreError>;

    /// One user's payments, newest first.
    async fn by_user(&self, user: UserId) -> Result<Vec<Payment>, StoreError>;

    /// Most recent `limit` payments, newest first.
    async fn all(&self, limit: usize) -> Result<Vec<Payment>, StoreError>;
}
