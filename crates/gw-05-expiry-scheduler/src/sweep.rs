//! One pass of the expiry sweep.

use std::sync::Arc;

use tracing::{info, warn};

use gw_02_subscription_registry::{days_left, should_notify, SubscriptionRegistryApi};
use gw_03_notification::NotificationDispatcher;
use shared_types::{RegistryError, Subscription, TimeSource};

use crate::ports::outbound::ChannelDirectory;

// ===== CONFIG =====

/// Tunables of one sweep pass.
#[derive(Debug, Clone, Copy)]
pub struct SweepConfig {
    /// Warnings start this many days before expiry.
    pub warn_window_days: u32,
    /// Minimum hours between two warnings to the same user.
    pub cooldown_hours: u32,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            warn_window_days: 3,
            cooldown_hours: 24,
        }
    }
}

// ===== MESSAGE TEXT =====

/// Warning sent inside the expiry window.
pub fn warning_text(days: u32) -> String {
    match days {
        0 | 1 => "Your subscription expires within a day. Renew now to keep your access."
            .to_owned(),
        n => format!(
            "Your subscription expires in {n} days. Renew now to keep your access."
        ),
    }
}

/// Notice sent when access is withdrawn.
pub fn expiry_text() -> String {
    "Your subscription has expired and your channel access has been removed. \
     Submit a new payment to rejoin."
        .to_owned()
}

// ===== SWEEP =====

/// Counters from one sweep pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Warnings delivered (and cooldown-stamped).
    pub warned: u64,
    /// Warnings withheld by the notification cooldown.
    pub cooled_down: u64,
    /// Users deactivated after expiry.
    pub deactivated: u64,
    /// Failed message deliveries, warnings and notices combined.
    pub delivery_failures: u64,
    /// Failed channel evictions.
    pub revocation_failures: u64,
    /// Registry writes that failed and will retry next pass.
    pub registry_faults: u64,
}

/// Executes one warn-then-evict pass over the active population.
pub struct Sweeper {
    registry: Arc<dyn SubscriptionRegistryApi>,
    dispatcher: Arc<NotificationDispatcher>,
    channels: Arc<dyn ChannelDirectory>,
    clock: Arc<dyn TimeSource>,
    config: SweepConfig,
}

impl Sweeper {
    pub fn new(
        registry: Arc<dyn SubscriptionRegistryApi>,
        dispatcher: Arc<NotificationDispatcher>,
        channels: Arc<dyn ChannelDirectory>,
        clock: Arc<dyn TimeSource>,
        config: SweepConfig,
    ) -> Self {
        Self {
            registry,
            dispatcher,
            channels,
            clock,
            config,
        }
    }

    /// Runs one full pass. Per-user faults are counted and logged; only a
    /// failure to read the population itself aborts the pass.
    pub async fn sweep(&self) -> Result<SweepReport, RegistryError> {
        let mut report = SweepReport::default();
        self.warn_expiring(&mut report).await?;
        self.evict_expired(&mut report).await?;
        info!(
            "[gw-05] Sweep done: {} warned, {} cooled down, {} deactivated, \
             {} delivery failures, {} revocation failures, {} registry faults",
            report.warned,
            report.cooled_down,
            report.deactivated,
            report.delivery_failures,
            report.revocation_failures,
            report.registry_faults
        );
        Ok(report)
    }

    async fn warn_expiring(&self, report: &mut SweepReport) -> Result<(), RegistryError> {
        let now = self.clock.now();
        for sub in self
            .registry
            .expiring_soon(self.config.warn_window_days)
            .await?
        {
            if !should_notify(&sub, now, self.config.cooldown_hours) {
                report.cooled_down += 1;
                continue;
            }
            let text = warning_text(days_left(&sub, now));
            match self.dispatcher.notify(sub.user_id, &text).await {
                Ok(_) => {
                    report.warned += 1;
                    // The stamp only moves when the user actually got the
                    // message; an undelivered warning must retry next pass.
                    // A failed stamp, in turn, must not abort the rest of
                    // the population.
                    if let Err(err) = self.registry.touch_notified(sub.user_id, now).await {
                        report.registry_faults += 1;
                        warn!(
                            "[gw-05] Cooldown stamp for user {} failed: {}",
                            sub.user_id, err
                        );
                    }
                }
                Err(err) => {
                    report.delivery_failures += 1;
                    warn!("[gw-05] Warning to user {} failed: {}", sub.user_id, err);
                }
            }
        }
        Ok(())
    }

    async fn evict_expired(&self, report: &mut SweepReport) -> Result<(), RegistryError> {
        let expired = self.registry.expired().await?;
        if expired.is_empty() {
            return Ok(());
        }
        let channels = self.channels.active_channels().await?;
        for sub in expired {
            self.evict_one(&sub, &channels, report).await;
        }
        Ok(())
    }

    async fn evict_one(
        &self,
        sub: &Subscription,
        channels: &[shared_types::Channel],
        report: &mut SweepReport,
    ) {
        // Best-effort notice; eviction proceeds either way.
        if let Err(err) = self.dispatcher.notify(sub.user_id, &expiry_text()).await {
            report.delivery_failures += 1;
            warn!(
                "[gw-05] Expiry notice to user {} failed: {}",
                sub.user_id, err
            );
        }
        for channel in channels {
            if let Err(err) = self.dispatcher.revoke_access(sub.user_id, channel.id).await {
                report.revocation_failures += 1;
                warn!(
                    "[gw-05] Eviction of user {} from channel {} failed: {}",
                    err.user, err.channel, err.detail
                );
            }
        }
        // Access is decided by the `active` flag, so this write must land
        // even when everything above failed. When it fails too, the row is
        // still expired and the next pass picks it up again.
        match self.registry.deactivate(sub.user_id).await {
            Ok(()) => {
                report.deactivated += 1;
                info!("[gw-05] Deactivated expired user {}", sub.user_id);
            }
            Err(err) => {
                report.registry_faults += 1;
                warn!(
                    "[gw-05] Deactivation of user {} failed: {}",
                    sub.user_id, err
                );
            }
        }
    }
}
