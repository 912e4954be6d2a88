//! Periodic driver for the sweep.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

use crate::sweep::Sweeper;

/// Handle to a running scheduler task.
pub struct SchedulerHandle {
    handle: JoinHandle<()>,
    stop: watch::Sender<bool>,
}

impl SchedulerHandle {
    /// Signals the loop to exit and waits for the in-flight sweep, if any,
    /// to finish.
    pub async fn shutdown(self) {
        let _ = self.stop.send(true);
        let _ = self.handle.await;
    }
}

/// Runs [`Sweeper::sweep`] on a fixed period until told to stop.
///
/// The sweep is awaited on the tick itself, so passes never overlap; a
/// pass that outlasts the period simply delays the next tick.
pub struct ExpiryScheduler {
    sweeper: Arc<Sweeper>,
    period: Duration,
}

impl ExpiryScheduler {
    pub fn new(sweeper: Arc<Sweeper>, period: Duration) -> Self {
        Self { sweeper, period }
    }

    /// Spawns the scheduler loop. The first sweep runs immediately.
    pub fn spawn(self) -> SchedulerHandle {
        let (stop, mut stop_rx) = watch::channel(false);
        let handle = tokio::spawn(async move {
            let mut ticks = tokio::time::interval(self.period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            info!(
                "[gw-05] Expiry scheduler started, period {:?}",
                self.period
            );
            loop {
                tokio::select! {
                    _ = ticks.tick() => {
                        // A failed or panicking pass must not kill the
                        // loop; the next tick gets a fresh attempt. Running
                        // the pass in its own task contains an unwind.
                        let sweeper = self.sweeper.clone();
                        let pass = tokio::spawn(async move { sweeper.sweep().await });
                        match pass.await {
                            Ok(Ok(_)) => {}
                            Ok(Err(err)) => {
                                error!("[gw-05] Sweep pass failed: {}", err);
                            }
                            Err(join_err) => {
                                error!("[gw-05] Sweep pass panicked: {}", join_err);
                            }
                        }
                    }
                    changed = stop_rx.changed() => {
                        match changed {
                            Ok(()) if *stop_rx.borrow() => {
                                info!("[gw-05] Expiry scheduler stopping");
                                break;
                            }
                            Ok(()) => {}
                            // Sender dropped without a stop signal; treat
                            // it the same rather than spinning on Err.
                            Err(_) => {
                                info!("[gw-05] Scheduler handle dropped, stopping");
                                break;
                            }
                        }
                    }
                }
            }
        });
        SchedulerHandle { handle, stop }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sweep::SweepConfig;
    use crate::testutil::{MemSubscriptionStore, OneChannel, PanicOnceChannels};
    use gw_02_subscription_registry::{RegistryService, SubscriptionRegistryApi};
    use gw_03_notification::{NotificationDispatcher, RecordingTransport};
    use shared_types::time::days;
    use shared_types::{MockTimeSource, UserId};

    fn sweeper_with_channels(
        channels: Arc<dyn crate::ports::outbound::ChannelDirectory>,
    ) -> (Arc<MockTimeSource>, Arc<RegistryService>, Arc<Sweeper>) {
        let clock = Arc::new(MockTimeSource::new(0));
        let registry = Arc::new(RegistryService::new(
            Arc::new(MemSubscriptionStore::default()),
            clock.clone(),
        ));
        let dispatcher = Arc::new(NotificationDispatcher::new(Arc::new(
            RecordingTransport::new(),
        )));
        let sweeper = Arc::new(Sweeper::new(
            registry.clone(),
            dispatcher,
            channels,
            clock.clone(),
            SweepConfig::default(),
        ));
        (clock, registry, sweeper)
    }

    #[tokio::test(start_paused = true)]
    async fn test_scheduler_sweeps_and_shuts_down() {
        let clock = Arc::new(MockTimeSource::new(0));
        let registry = Arc::new(RegistryService::new(
            Arc::new(MemSubscriptionStore::default()),
            clock.clone(),
        ));
        let transport = Arc::new(RecordingTransport::new());
        let dispatcher = Arc::new(NotificationDispatcher::new(transport.clone()));

        // One user already inside the warning window.
        registry.grant(UserId(1), days(2)).await.unwrap();

        let sweeper = Arc::new(Sweeper::new(
            registry.clone(),
            dispatcher,
            Arc::new(OneChannel),
            clock,
            SweepConfig::default(),
        ));
        let handle = ExpiryScheduler::new(sweeper, Duration::from_secs(3600)).spawn();

        // First tick fires immediately; give the task a chance to run it.
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(transport.sent().len(), 1);

        handle.shutdown().await;

        // No further ticks after shutdown.
        tokio::time::sleep(Duration::from_secs(7200)).await;
        assert_eq!(transport.sent().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_panicking_pass_does_not_kill_the_loop() {
        let (clock, registry, sweeper) =
            sweeper_with_channels(Arc::new(PanicOnceChannels::default()));

        // An expired user makes every pass reach the channel directory.
        registry.grant(UserId(1), days(1)).await.unwrap();
        clock.set(days(1));

        let handle = ExpiryScheduler::new(sweeper, Duration::from_secs(3600)).spawn();

        // The first pass dies inside the directory, so nothing happened yet.
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(registry.get(UserId(1)).await.unwrap().unwrap().active);

        // The loop survived and the next tick finishes the eviction.
        tokio::time::sleep(Duration::from_secs(3600)).await;
        assert!(!registry.get(UserId(1)).await.unwrap().unwrap().active);

        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_handle_stops_the_loop() {
        let (_clock, _registry, sweeper) = sweeper_with_channels(Arc::new(OneChannel));
        let SchedulerHandle { handle, stop } =
            ExpiryScheduler::new(sweeper, Duration::from_secs(3600)).spawn();

        // Losing the handle without an explicit shutdown must end the task
        // instead of leaving it spinning on a closed channel.
        drop(stop);
        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("scheduler task should exit once the handle is gone")
            .unwrap();
    }
}
