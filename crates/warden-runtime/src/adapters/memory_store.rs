//! In-memory store adapter behind every store port.
//!
//! A single `RwLock` guards the whole dataset, which is what makes the
//! ledger's dual write (decided payment + granted subscription) atomic
//! with respect to a concurrently running expiry sweep.

use std::collections::{BTreeMap, VecDeque};

use async_trait::async_trait;
use parking_lot::RwLock;

use gw_01_payment_ledger::{NewPayment, PaymentStore};
use gw_02_subscription_registry::SubscriptionStore;
use gw_04_broadcast::{BroadcastStore, UserDirectory};
use gw_05_expiry_scheduler::ChannelDirectory;
use shared_types::{
    BroadcastSummary, Channel, Payment, PaymentId, PaymentStatus, StoreError, Subscription, User,
    UserId,
};

/// Completed broadcast runs kept for the admin history view.
const BROADCAST_HISTORY: usize = 50;

#[derive(Default)]
struct StoreInner {
    users: BTreeMap<UserId, User>,
    payments: BTreeMap<PaymentId, Payment>,
    next_payment: u64,
    subscriptions: BTreeMap<UserId, Subscription>,
    channels: Vec<Channel>,
    settings: BTreeMap<String, String>,
    broadcasts: VecDeque<BroadcastSummary>,
}

/// Process-local store serving all five store ports.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<StoreInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a user on first contact. Returns true if the user was new;
    /// an existing row keeps its original registration time.
    pub fn register_user(&self, user: User) -> bool {
        let mut inner = self.inner.write();
        match inner.users.entry(user.id) {
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(user);
                true
            }
            std::collections::btree_map::Entry::Occupied(_) => false,
        }
    }

    pub fn user(&self, id: UserId) -> Option<User> {
        self.inner.read().users.get(&id).cloned()
    }

    /// Adds a channel to the managed roster, replacing any prior entry
    /// with the same id.
    pub fn upsert_channel(&self, channel: Channel) {
        let mut inner = self.inner.write();
        inner.channels.retain(|c| c.id != channel.id);
        inner.channels.push(channel);
    }

    pub fn setting(&self, key: &str) -> Option<String> {
        self.inner.read().settings.get(key).cloned()
    }

    pub fn set_setting(&self, key: &str, value: &str) {
        self.inner
            .write()
            .settings
            .insert(key.to_owned(), value.to_owned());
    }

    pub(crate) fn with_read<T>(&self, f: impl FnOnce(&StoreSnapshot<'_>) -> T) -> T {
        let inner = self.inner.read();
        f(&StoreSnapshot { inner: &inner })
    }
}

/// Read view handed to aggregation code while the lock is held.
pub(crate) struct StoreSnapshot<'a> {
    inner: &'a StoreInner,
}

impl StoreSnapshot<'_> {
    pub(crate) fn users(&self) -> impl Iterator<Item = &User> {
        self.inner.users.values()
    }

    pub(crate) fn payments(&self) -> impl Iterator<Item = &Payment> {
        self.inner.payments.values()
    }

    pub(crate) fn subscriptions(&self) -> impl Iterator<Item = &Subscription> {
        self.inner.subscriptions.values()
    }
}

// ===== PAYMENT STORE =====

#[async_trait]
impl PaymentStore for MemoryStore {
    async fn insert(&self, payment: NewPayment) -> Result<Payment, StoreError> {
        let mut inner = self.inner.write();
        inner.next_payment += 1;
        let row = Payment {
            id: PaymentId(inner.next_payment),
            user_id: payment.user_id,
            amount: payment.amount,
            receipt: payment.receipt,
            duration_days: payment.duration_days,
            status: PaymentStatus::Pending,
            created_at: payment.created_at,
            decided_at: None,
            expires_at: None,
            admin_note: None,
        };
        inner.payments.insert(row.id, row.clone());
        Ok(row)
    }

    async fn get(&self, id: PaymentId) -> Result<Option<Payment>, StoreError> {
        Ok(self.inner.read().payments.get(&id).cloned())
    }

    async fn commit_decision(
        &self,
        payment: &Payment,
        grant: Option<&Subscription>,
    ) -> Result<(), StoreError> {
        // One write lock spans both rows; a sweep sees either neither
        // write or both.
        let mut inner = self.inner.write();
        let stored = inner.payments.get(&payment.id).ok_or_else(|| {
            StoreError::Backend(format!("payment {} vanished before decision", payment.id))
        })?;
        // The stored row, not the caller's fetch, decides whether the
        // payment is still open. Two racing decisions both read Pending;
        // only the first one's write finds it still Pending here.
        if stored.status.is_terminal() {
            return Err(StoreError::Conflict(format!(
                "payment {} already decided as {:?}",
                payment.id, stored.status
            )));
        }
        inner.payments.insert(payment.id, payment.clone());
        if let Some(sub) = grant {
            inner.subscriptions.insert(sub.user_id, sub.clone());
        }
        Ok(())
    }

    async fn pending(&self) -> Result<Vec<Payment>, StoreError> {
        Ok(self
            .inner
            .read()
            .payments
            .values()
            .rev()
            .filter(|p| p.status == PaymentStatus::Pending)
            .cloned()
            .collect())
    }

    async fn by_user(&self, user: UserId) -> Result<Vec<Payment>, StoreError> {
        Ok(self
            .inner
            .read()
            .payments
            .values()
            .rev()
            .filter(|p| p.user_id == user)
            .cloned()
            .collect())
    }

    async fn all(&self, limit: usize) -> Result<Vec<Payment>, StoreError> {
        Ok(self
            .inner
            .read()
            .payments
            .values()
            .rev()
            .take(limit)
            .cloned()
            .collect())
    }
}

// ===== SUBSCRIPTION STORE =====

#[async_trait]
impl SubscriptionStore for MemoryStore {
    async fn upsert(&self, sub: &Subscription) -> Result<(), StoreError> {
        self.inner
            .write()
            .subscriptions
            .insert(sub.user_id, sub.clone());
        Ok(())
    }

    async fn get(&self, user: UserId) -> Result<Option<Subscription>, StoreError> {
        Ok(self.inner.read().subscriptions.get(&user).cloned())
    }

    async fn active(&self) -> Result<Vec<Subscription>, StoreError> {
        Ok(self
            .inner
            .read()
            .subscriptions
            .values()
            .filter(|s| s.active)
            .cloned()
            .collect())
    }
}

// ===== USER DIRECTORY =====

#[async_trait]
impl UserDirectory for MemoryStore {
    async fn all_users(&self) -> Result<Vec<UserId>, StoreError> {
        Ok(self.inner.read().users.keys().copied().collect())
    }

    async fn active_subscribers(&self) -> Result<Vec<UserId>, StoreError> {
        Ok(self
            .inner
            .read()
            .subscriptions
            .values()
            .filter(|s| s.active)
            .map(|s| s.user_id)
            .collect())
    }
}

// ===== CHANNEL DIRECTORY =====

#[async_trait]
impl ChannelDirectory for MemoryStore {
    async fn active_channels(&self) -> Result<Vec<Channel>, StoreError> {
        Ok(self
            .inner
            .read()
            .channels
            .iter()
            .filter(|c| c.active)
            .cloned()
            .collect())
    }
}

// ===== BROADCAST STORE =====

#[async_trait]
impl BroadcastStore for MemoryStore {
    async fn record(&self, summary: &BroadcastSummary) -> Result<(), StoreError> {
        let mut inner = self.inner.write();
        inner.broadcasts.push_front(summary.clone());
        inner.broadcasts.truncate(BROADCAST_HISTORY);
        Ok(())
    }

    async fn recent(&self, n: usize) -> Result<Vec<BroadcastSummary>, StoreError> {
        Ok(self
            .inner
            .read()
            .broadcasts
            .iter()
            .take(n)
            .cloned()
            .collect())
    }
}
