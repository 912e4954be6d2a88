//! Dependency wiring.
//!
//! Builds every subsystem service against the shared in-memory store and
//! a caller-supplied transport and clock, so tests can drop in recording
//! fakes where the binary uses the real thing.

use std::sync::Arc;

use chrono::DateTime;
use tracing::info;

use gw_01_payment_ledger::PaymentLedgerService;
use gw_02_subscription_registry::RegistryService;
use gw_03_notification::{MessageTransport, NotificationDispatcher};
use gw_04_broadcast::{BroadcastEngine, BroadcastPacing};
use gw_05_expiry_scheduler::{ExpiryScheduler, SchedulerHandle, SweepConfig, Sweeper};
use shared_types::{AdminGuard, StoreError, TimeSource};

use crate::adapters::memory_store::MemoryStore;
use crate::config::WardenConfig;
use crate::stats::Statistics;

/// The assembled engine.
pub struct WardenContainer {
    pub config: WardenConfig,
    pub store: Arc<MemoryStore>,
    pub clock: Arc<dyn TimeSource>,
    pub ledger: Arc<PaymentLedgerService>,
    pub registry: Arc<RegistryService>,
    pub dispatcher: Arc<NotificationDispatcher>,
    pub broadcaster: Arc<BroadcastEngine>,
    sweeper: Arc<Sweeper>,
}

impl WardenContainer {
    /// Wires all subsystems. Does not start any background task.
    pub fn build(
        config: WardenConfig,
        transport: Arc<dyn MessageTransport>,
        clock: Arc<dyn TimeSource>,
    ) -> Self {
        info!(
            "[runtime] Wiring Gate-Warden: {} admins, sweep every {:?}",
            config.admin_ids.len(),
            config.sweep_period
        );
        let store = Arc::new(MemoryStore::new());
        let guard = AdminGuard::new(config.admin_ids.iter().copied());
        let dispatcher = Arc::new(NotificationDispatcher::new(transport));

        let ledger = Arc::new(PaymentLedgerService::new(
            store.clone(),
            clock.clone(),
            guard,
        ));
        let registry = Arc::new(RegistryService::new(store.clone(), clock.clone()));
        let broadcaster = Arc::new(BroadcastEngine::new(
            store.clone(),
            dispatcher.clone(),
            store.clone(),
            clock.clone(),
            BroadcastPacing {
                delay: config.broadcast_delay,
                progress_every: config.progress_every,
            },
        ));
        let sweeper = Arc::new(Sweeper::new(
            registry.clone(),
            dispatcher.clone(),
            store.clone(),
            clock.clone(),
            SweepConfig {
                warn_window_days: config.warn_window_days,
                cooldown_hours: config.cooldown_hours,
            },
        ));

        Self {
            config,
            store,
            clock,
            ledger,
            registry,
            dispatcher,
            broadcaster,
            sweeper,
        }
    }

    /// Spawns the expiry scheduler loop.
    pub fn start_scheduler(&self) -> SchedulerHandle {
        ExpiryScheduler::new(self.sweeper.clone(), self.config.sweep_period).spawn()
    }

    /// Statistics snapshot at the current time.
    pub fn statistics(&self) -> Statistics {
        self.store
            .statistics(self.clock.now(), self.config.warn_window_days)
    }

    /// Recent broadcast runs rendered for the admin history view.
    pub async fn broadcast_history(&self, n: usize) -> Result<Vec<String>, StoreError> {
        use gw_04_broadcast::BroadcastStore;
        let runs = self.store.recent(n).await?;
        Ok(runs
            .iter()
            .map(|run| {
                let finished = DateTime::from_timestamp_millis(run.finished_at as i64)
                    .map(|t| t.to_rfc3339())
                    .unwrap_or_else(|| run.finished_at.to_string());
                format!(
                    "{} {} to {}: {} sent, {} failed of {}",
                    finished, run.kind, run.target, run.sent, run.failed, run.total
                )
            })
            .collect())
    }
}
