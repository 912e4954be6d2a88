//! Sequential broadcast engine.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{info, warn};
use uuid::Uuid;

use gw_03_notification::NotificationDispatcher;
use shared_types::{BroadcastSummary, MessagePayload, StoreError, TimeSource, UserId};

use crate::domain::target::{BroadcastReport, BroadcastTarget};
use crate::ports::outbound::{BroadcastStore, ProgressSink, UserDirectory};

// ===== PACING =====

/// Fixed pacing of a run: inter-send delay and progress cadence.
#[derive(Debug, Clone, Copy)]
pub struct BroadcastPacing {
    /// Delay awaited after every send attempt.
    pub delay: Duration,
    /// A progress snapshot is emitted every this many attempts.
    pub progress_every: u64,
}

impl Default for BroadcastPacing {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(50),
            progress_every: 20,
        }
    }
}

// ===== ENGINE =====

/// Drives one payload through the dispatcher to a resolved audience.
pub struct BroadcastEngine {
    directory: Arc<dyn UserDirectory>,
    dispatcher: Arc<NotificationDispatcher>,
    store: Arc<dyn BroadcastStore>,
    clock: Arc<dyn TimeSource>,
    pacing: BroadcastPacing,
}

impl BroadcastEngine {
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        dispatcher: Arc<NotificationDispatcher>,
        store: Arc<dyn BroadcastStore>,
        clock: Arc<dyn TimeSource>,
        pacing: BroadcastPacing,
    ) -> Self {
        Self {
            directory,
            dispatcher,
            store,
            clock,
            pacing,
        }
    }

    /// Runs one broadcast to completion (or until `cancel` flips to true).
    ///
    /// The audience is resolved once, up front. Each recipient gets exactly
    /// one delivery attempt; failures are counted and logged per user. The
    /// finished run is appended to the broadcast history either way.
    pub async fn run(
        &self,
        target: BroadcastTarget,
        payload: &MessagePayload,
        progress: &dyn ProgressSink,
        mut cancel: Option<watch::Receiver<bool>>,
    ) -> Result<BroadcastReport, StoreError> {
        let run_id = Uuid::new_v4();
        let recipients = self.resolve(target).await?;
        let mut report = BroadcastReport {
            total: recipients.len() as u64,
            ..BroadcastReport::default()
        };
        info!(
            "[gw-04] Broadcast {} starting: {} {} to {} recipients",
            run_id,
            payload.kind(),
            target.label(),
            report.total
        );

        for user in recipients {
            if let Some(rx) = cancel.as_mut() {
                if *rx.borrow() {
                    warn!(
                        "[gw-04] Broadcast {} cancelled after {} of {} attempts",
                        run_id,
                        report.attempted(),
                        report.total
                    );
                    break;
                }
            }

            match self.dispatcher.deliver(user, payload).await {
                Ok(_) => report.sent += 1,
                Err(err) => {
                    report.failed += 1;
                    warn!("[gw-04] Broadcast {} skipped user {}: {}", run_id, user, err);
                }
            }

            if report.attempted() % self.pacing.progress_every == 0 {
                progress.progress(report).await;
            }
            tokio::time::sleep(self.pacing.delay).await;
        }

        progress.progress(report).await;
        let summary = BroadcastSummary {
            id: run_id,
            kind: payload.kind().to_owned(),
            target: target.label().to_owned(),
            sent: report.sent,
            failed: report.failed,
            total: report.total,
            finished_at: self.clock.now(),
        };
        self.store.record(&summary).await?;
        info!(
            "[gw-04] Broadcast {} finished: {} sent, {} failed of {}",
            run_id, report.sent, report.failed, report.total
        );
        Ok(report)
    }

    async fn resolve(&self, target: BroadcastTarget) -> Result<Vec<UserId>, StoreError> {
        match target {
            BroadcastTarget::All => self.directory.all_users().await,
            BroadcastTarget::ActiveSubscribers => self.directory.active_subscribers().await,
            BroadcastTarget::NonSubscribers => {
                let subscribed: HashSet<UserId> = self
                    .directory
                    .active_subscribers()
                    .await?
                    .into_iter()
                    .collect();
                Ok(self
                    .directory
                    .all_users()
                    .await?
                    .into_iter()
                    .filter(|user| !subscribed.contains(user))
                    .collect())
            }
        }
    }
}
