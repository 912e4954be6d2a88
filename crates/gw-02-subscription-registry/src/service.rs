//! Concrete Subscription Registry service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use shared_types::{RegistryError, Subscription, TimeSource, Timestamp, UserId};

use crate::domain::phase::{classify, SubscriptionPhase};
use crate::ports::inbound::SubscriptionRegistryApi;
use crate::ports::outbound::SubscriptionStore;

/// Concrete implementation of [`SubscriptionRegistryApi`].
pub struct RegistryService {
    store: Arc<dyn SubscriptionStore>,
    clock: Arc<dyn TimeSource>,
}

impl RegistryService {
    /// Creates a registry over the given store and clock.
    pub fn new(store: Arc<dyn SubscriptionStore>, clock: Arc<dyn TimeSource>) -> Self {
        Self { store, clock }
    }

    async fn fetch(&self, user: UserId) -> Result<Subscription, RegistryError> {
        self.store
            .get(user)
            .await?
            .ok_or(RegistryError::NotFound(user))
    }

    async fn active_in_phase(
        &self,
        wanted: SubscriptionPhase,
        warn_window_days: u32,
    ) -> Result<Vec<Subscription>, RegistryError> {
        let now = self.clock.now();
        let subs = self.store.active().await?;
        Ok(subs
            .into_iter()
            .filter(|s| classify(s, now, warn_window_days) == wanted)
            .collect())
    }
}

#[async_trait]
impl SubscriptionRegistryApi for RegistryService {
    async fn grant(
        &self,
        user: UserId,
        expires_at: Timestamp,
    ) -> Result<Subscription, RegistryError> {
        let sub = Subscription::granted(user, self.clock.now(), expires_at);
        self.store.upsert(&sub).await?;
        info!("[gw-02] Granted user {} until {}", user, expires_at);
        Ok(sub)
    }

    async fn mark_channel_joined(&self, user: UserId) -> Result<(), RegistryError> {
        let mut sub = self.fetch(user).await?;
        if !sub.active || sub.channel_joined {
            return Ok(());
        }
        sub.channel_joined = true;
        self.store.upsert(&sub).await?;
        debug!("[gw-02] User {} joined the channel", user);
        Ok(())
    }

    async fn deactivate(&self, user: UserId) -> Result<(), RegistryError> {
        let mut sub = self.fetch(user).await?;
        if !sub.active {
            return Ok(());
        }
        sub.active = false;
        sub.channel_joined = false;
        self.store.upsert(&sub).await?;
        info!("[gw-02] Deactivated user {}", user);
        Ok(())
    }

    async fn touch_notified(&self, user: UserId, at: Timestamp) -> Result<(), RegistryError> {
        let mut sub = self.fetch(user).await?;
        sub.last_notified = Some(at);
        self.store.upsert(&sub).await?;
        Ok(())
    }

    async fn get(&self, user: UserId) -> Result<Option<Subscription>, RegistryError> {
        Ok(self.store.get(user).await?)
    }

    async fn active(&self) -> Result<Vec<Subscription>, RegistryError> {
        Ok(self.store.active().await?)
    }

    async fn expiring_soon(
        &self,
        warn_window_days: u32,
    ) -> Result<Vec<Subscription>, RegistryError> {
        self.active_in_phase(SubscriptionPhase::ExpiringSoon, warn_window_days)
            .await
    }

    async fn expired(&self) -> Result<Vec<Subscription>, RegistryError> {
        // The warn window is irrelevant for the Expired phase.
        self.active_in_phase(SubscriptionPhase::Expired, 0).await
    }
}
