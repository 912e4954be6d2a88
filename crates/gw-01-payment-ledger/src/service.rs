//! Concrete Payment Ledger service.
//!
//! Wires the pure lifecycle rules to the store port, with the administrator
//! guard applied before any admin-facing operation touches state. The bot
//! transport is NOT a dependency here: outcome messages to users are the
//! caller's concern, so the ledger stays testable without a transport fake.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use shared_types::{
    AdminGuard, LedgerError, Payment, PaymentId, ReceiptRef, StoreError, Subscription, TimeSource,
    UserId,
};

use crate::domain::lifecycle;
use crate::ports::inbound::PaymentLedgerApi;
use crate::ports::outbound::{NewPayment, PaymentStore};

/// Concrete implementation of [`PaymentLedgerApi`].
pub struct PaymentLedgerService {
    store: Arc<dyn PaymentStore>,
    clock: Arc<dyn TimeSource>,
    guard: AdminGuard,
}

impl PaymentLedgerService {
    /// Creates a ledger over the given store, clock, and admin allow-list.
    pub fn new(store: Arc<dyn PaymentStore>, clock: Arc<dyn TimeSource>, guard: AdminGuard) -> Self {
        Self { store, clock, guard }
    }

    async fn fetch(&self, id: PaymentId) -> Result<Payment, LedgerError> {
        self.store
            .get(id)
            .await?
            .ok_or(LedgerError::NotFound(id))
    }

    /// Commits a decision, turning a store-level write conflict into the
    /// single-decision guard error.
    ///
    /// The pre-commit `ensure_pending` check runs on a fetch that may be
    /// stale by the time the write lands; the store re-checks under its own
    /// critical section and refuses the losing write of a decision race.
    async fn commit(
        &self,
        decided: &Payment,
        grant: Option<&Subscription>,
    ) -> Result<(), LedgerError> {
        match self.store.commit_decision(decided, grant).await {
            Ok(()) => Ok(()),
            Err(StoreError::Conflict(_)) => {
                let winner = self.fetch(decided.id).await?;
                Err(LedgerError::InvalidTransition {
                    payment: decided.id,
                    status: winner.status,
                })
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[async_trait]
impl PaymentLedgerApi for PaymentLedgerService {
    async fn submit(
        &self,
        user: UserId,
        amount: u64,
        receipt: ReceiptRef,
        duration_days: u32,
    ) -> Result<PaymentId, LedgerError> {
        let payment = self
            .store
            .insert(NewPayment {
                user_id: user,
                amount,
                receipt,
                duration_days,
                created_at: self.clock.now(),
            })
            .await?;

        info!(
            "[gw-01] Payment {} submitted by user {} ({} minor units, {} days)",
            payment.id, user, amount, duration_days
        );
        Ok(payment.id)
    }

    async fn approve(
        &self,
        actor: UserId,
        payment: PaymentId,
        note: Option<String>,
    ) -> Result<Payment, LedgerError> {
        self.guard.authorize(actor)?;

        let current = self.fetch(payment).await?;
        let now = self.clock.now();
        let decided = lifecycle::approve(&current, now, note)?;
        let grant = lifecycle::grant_for(&decided, now);

        // Payment update and subscription grant land in one store write.
        self.commit(&decided, Some(&grant)).await?;

        info!(
            "[gw-01] Payment {} approved by admin {}; user {} granted until {}",
            payment, actor, decided.user_id, grant.expires_at
        );
        Ok(decided)
    }

    async fn reject(
        &self,
        actor: UserId,
        payment: PaymentId,
        reason: Option<String>,
    ) -> Result<Payment, LedgerError> {
        self.guard.authorize(actor)?;

        let current = self.fetch(payment).await?;
        let decided = lifecycle::reject(&current, self.clock.now(), reason)?;
        self.commit(&decided, None).await?;

        warn!(
            "[gw-01] Payment {} rejected by admin {} (user {})",
            payment, actor, decided.user_id
        );
        Ok(decided)
    }

    async fn pending(&self, actor: UserId) -> Result<Vec<Payment>, LedgerError> {
        self.guard.authorize(actor)?;
        Ok(self.store.pending().await?)
    }

    async fn by_user(&self, user: UserId) -> Result<Vec<Payment>, LedgerError> {
        Ok(self.store.by_user(user).await?)
    }

    async fn all(&self, actor: UserId, limit: usize) -> Result<Vec<Payment>, LedgerError> {
        self.guard.authorize(actor)?;
        Ok(self.store.all(limit).await?)
    }
}
