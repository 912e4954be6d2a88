//! Inbound (Driving) port for the Payment Ledger subsystem.

use async_trait::async_trait;
use shared_types::{LedgerError, Payment, PaymentId, ReceiptRef, UserId};

/// Public API of the payment ledger, consumed by the admin panel and the
/// user-facing payment workflow.
#[async_trait]
pub trait PaymentLedgerApi: Send + Sync {
    /// Creates a Pending payment record.
    ///
    /// No side effects beyond persistence; always succeeds if the store
    /// accepts the write.
    async fn submit(
        &self,
        user: UserId,
        amount: u64,
        receipt: ReceiptRef,
        duration_days: u32,
    ) -> Result<PaymentId, LedgerError>;

    /// Approves a pending payment and grants the subscription.
    ///
    /// # Errors
    /// - `Access` if `actor` is not an administrator
    /// - `NotFound` if no such payment id
    /// - `InvalidTransition` if the payment is already decided (no mutation)
    async fn approve(
        &self,
        actor: UserId,
        payment: PaymentId,
        note: Option<String>,
    ) -> Result<Payment, LedgerError>;

    /// Rejects a pending payment, storing the optional reason.
    ///
    /// Same guards as [`approve`](Self::approve); no subscription side
    /// effect.
    async fn reject(
        &self,
        actor: UserId,
        payment: PaymentId,
        reason: Option<String>,
    ) -> Result<Payment, LedgerError>;

    /// All pending payments, newest first. Administrator read.
    async fn pending(&self, actor: UserId) -> Result<Vec<Payment>, LedgerError>;

    /// A user's own payments, newest first.
    async fn by_user(&self, user: UserId) -> Result<Vec<Payment>, LedgerError>;

    /// The most recent `limit` payments across all users, newest first.
    /// Administrator read.
    async fn all(&self, actor: UserId, limit: usize) -> Result<Vec<Payment>, LedgerError>;
}
