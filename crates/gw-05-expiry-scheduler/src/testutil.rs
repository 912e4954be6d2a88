//! Shared mocks for the subsystem tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use gw_02_subscription_registry::SubscriptionStore;
use shared_types::{Channel, ChannelId, StoreError, Subscription, UserId};

use crate::ports::outbound::ChannelDirectory;

#[derive(Default)]
pub struct MemSubscriptionStore {
    rows: Mutex<HashMap<UserId, Subscription>>,
    fail_upserts: Mutex<HashSet<UserId>>,
}

impl MemSubscriptionStore {
    /// Makes every upsert for `user` fail with a backend error.
    pub fn fail_upserts_for(&self, user: UserId) {
        self.fail_upserts.lock().insert(user);
    }
}

#[async_trait]
impl SubscriptionStore for MemSubscriptionStore {
    async fn upsert(&self, sub: &Subscription) -> Result<(), StoreError> {
        if self.fail_upserts.lock().contains(&sub.user_id) {
            return Err(StoreError::Backend(format!(
                "write refused for user {}",
                sub.user_id
            )));
        }
        self.rows.lock().insert(sub.user_id, sub.clone());
        Ok(())
    }

    async fn get(&self, user: UserId) -> Result<Option<Subscription>, StoreError> {
        Ok(self.rows.lock().get(&user).cloned())
    }

    async fn active(&self) -> Result<Vec<Subscription>, StoreError> {
        Ok(self
            .rows
            .lock()
            .values()
            .filter(|s| s.active)
            .cloned()
            .collect())
    }
}

/// Directory with a single managed channel.
pub struct OneChannel;

pub const THE_CHANNEL: ChannelId = ChannelId(-100);

#[async_trait]
impl ChannelDirectory for OneChannel {
    async fn active_channels(&self) -> Result<Vec<Channel>, StoreError> {
        Ok(vec![Channel {
            id: THE_CHANNEL,
            name: "premium".into(),
            invite_link: "https://example.invalid/premium".into(),
            active: true,
        }])
    }
}

/// Directory that panics on its first call and answers like [`OneChannel`]
/// afterwards.
#[derive(Default)]
pub struct PanicOnceChannels {
    tripped: AtomicBool,
}

#[async_trait]
impl ChannelDirectory for PanicOnceChannels {
    async fn active_channels(&self) -> Result<Vec<Channel>, StoreError> {
        if !self.tripped.swap(true, Ordering::SeqCst) {
            panic!("directory backend lost");
        }
        OneChannel.active_channels().await
    }
}
