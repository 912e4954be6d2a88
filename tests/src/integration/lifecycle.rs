//! End-to-end subscription lifecycle.
//!
//! Drives the real services over the shared `MemoryStore` with a scripted
//! clock and a recording transport: a user submits a receipt, an admin
//! approves it, the sweep warns inside the window, and after expiry the
//! user is noticed, evicted, and deactivated.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use gw_01_payment_ledger::{PaymentLedgerApi, PaymentLedgerService};
    use gw_02_subscription_registry::{RegistryService, SubscriptionRegistryApi};
    use gw_03_notification::{NotificationDispatcher, RecordingTransport, TransportError};
    use gw_05_expiry_scheduler::{SweepConfig, Sweeper};
    use shared_types::time::{days, hours};
    use shared_types::{
        AdminGuard, Channel, ChannelId, LedgerError, MockTimeSource, PaymentStatus, ReceiptRef,
        TimeSource, User, UserId,
    };
    use warden_runtime::MemoryStore;

    const ADMIN: UserId = UserId(1);
    const MEMBER: UserId = UserId(100);
    const CHANNEL: ChannelId = ChannelId(-1001);

    struct World {
        clock: Arc<MockTimeSource>,
        store: Arc<MemoryStore>,
        transport: Arc<RecordingTransport>,
        ledger: PaymentLedgerService,
        registry: Arc<RegistryService>,
        sweeper: Sweeper,
    }

    fn world() -> World {
        let clock = Arc::new(MockTimeSource::new(0));
        let store = Arc::new(MemoryStore::new());
        let transport = Arc::new(RecordingTransport::new());
        let dispatcher = Arc::new(NotificationDispatcher::new(transport.clone()));

        store.register_user(User {
            id: MEMBER,
            full_name: "Member".into(),
            username: Some("member".into()),
            registered_at: 0,
        });
        store.upsert_channel(Channel {
            id: CHANNEL,
            name: "premium".into(),
            invite_link: "https://example.invalid/premium".into(),
            active: true,
        });

        let ledger = PaymentLedgerService::new(
            store.clone(),
            clock.clone(),
            AdminGuard::new([ADMIN]),
        );
        let registry = Arc::new(RegistryService::new(store.clone(), clock.clone()));
        let sweeper = Sweeper::new(
            registry.clone(),
            dispatcher,
            store.clone(),
            clock.clone(),
            SweepConfig::default(),
        );

        World {
            clock,
            store,
            transport,
            ledger,
            registry,
            sweeper,
        }
    }

    #[tokio::test]
    async fn test_full_lifecycle_submit_approve_warn_expire() {
        let w = world();

        // Day 0: the member submits a receipt for a 30-day plan.
        let payment_id = w
            .ledger
            .submit(MEMBER, 500, ReceiptRef("receipt-1".into()), 30)
            .await
            .unwrap();

        // A non-admin cannot decide it.
        assert!(matches!(
            w.ledger.approve(MEMBER, payment_id, None).await,
            Err(LedgerError::Access(_))
        ));

        // The admin approves: payment decided and access granted atomically.
        let approved = w.ledger.approve(ADMIN, payment_id, None).await.unwrap();
        assert_eq!(approved.status, PaymentStatus::Approved);
        assert_eq!(approved.expires_at, Some(days(30)));
        let sub = w.registry.get(MEMBER).await.unwrap().unwrap();
        assert!(sub.active);
        assert_eq!(sub.expires_at, days(30));

        w.registry.mark_channel_joined(MEMBER).await.unwrap();

        // Day 10: nothing to do.
        w.clock.set(days(10));
        let quiet = w.sweeper.sweep().await.unwrap();
        assert_eq!(quiet.warned, 0);
        assert_eq!(quiet.deactivated, 0);

        // Day 28: inside the 3-day window, one warning goes out.
        w.clock.set(days(28));
        let warn_pass = w.sweeper.sweep().await.unwrap();
        assert_eq!(warn_pass.warned, 1);
        assert!(w.transport.sent()[0].text.contains("2 days"));

        // Same day, second pass: cooldown holds.
        let repeat = w.sweeper.sweep().await.unwrap();
        assert_eq!(repeat.warned, 0);
        assert_eq!(repeat.cooled_down, 1);
        assert_eq!(w.transport.sent().len(), 1);

        // Day 30 + 1h: expiry notice, eviction, deactivation.
        w.clock.set(days(30) + hours(1));
        let expiry_pass = w.sweeper.sweep().await.unwrap();
        assert_eq!(expiry_pass.deactivated, 1);
        assert_eq!(w.transport.sent().len(), 2);
        assert!(w.transport.sent()[1].text.contains("expired"));
        assert_eq!(w.transport.revoked(), vec![(MEMBER, CHANNEL)]);
        assert_eq!(w.transport.restored(), vec![(MEMBER, CHANNEL)]);

        let sub = w.registry.get(MEMBER).await.unwrap().unwrap();
        assert!(!sub.active);
        assert!(!sub.channel_joined);

        // The next sweep is a no-op: the member is out of the population.
        let after = w.sweeper.sweep().await.unwrap();
        assert_eq!(after.deactivated, 0);
        assert_eq!(w.transport.sent().len(), 2);
    }

    #[tokio::test]
    async fn test_renewal_after_expiry_restores_access() {
        let w = world();

        let first = w
            .ledger
            .submit(MEMBER, 500, ReceiptRef("receipt-1".into()), 30)
            .await
            .unwrap();
        w.ledger.approve(ADMIN, first, None).await.unwrap();

        w.clock.set(days(31));
        w.sweeper.sweep().await.unwrap();
        assert!(!w.registry.get(MEMBER).await.unwrap().unwrap().active);

        // A fresh payment brings the member back for 30 more days.
        let second = w
            .ledger
            .submit(MEMBER, 500, ReceiptRef("receipt-2".into()), 30)
            .await
            .unwrap();
        w.ledger.approve(ADMIN, second, None).await.unwrap();

        let sub = w.registry.get(MEMBER).await.unwrap().unwrap();
        assert!(sub.active);
        assert_eq!(sub.expires_at, days(31) + days(30));

        // Statistics line up with the restored state.
        let stats = w.store.statistics(w.clock.now(), 3);
        assert_eq!(stats.active_subscriptions, 1);
        assert_eq!(stats.approved_payments, 2);
        assert_eq!(stats.approved_revenue, 1_000);
    }

    #[tokio::test]
    async fn test_double_decision_never_grants_twice() {
        let w = world();

        let payment_id = w
            .ledger
            .submit(MEMBER, 500, ReceiptRef("receipt-1".into()), 30)
            .await
            .unwrap();
        w.ledger.approve(ADMIN, payment_id, None).await.unwrap();

        // A second decision of either kind bounces off the terminal state.
        assert!(matches!(
            w.ledger.approve(ADMIN, payment_id, None).await,
            Err(LedgerError::InvalidTransition { .. })
        ));
        assert!(matches!(
            w.ledger.reject(ADMIN, payment_id, None).await,
            Err(LedgerError::InvalidTransition { .. })
        ));

        let sub = w.registry.get(MEMBER).await.unwrap().unwrap();
        assert_eq!(sub.expires_at, days(30));
    }

    #[tokio::test]
    async fn test_unreachable_member_is_still_evicted() {
        let w = world();

        let payment_id = w
            .ledger
            .submit(MEMBER, 500, ReceiptRef("receipt-1".into()), 30)
            .await
            .unwrap();
        w.ledger.approve(ADMIN, payment_id, None).await.unwrap();

        w.clock.set(days(31));
        w.transport.fail_user(MEMBER, TransportError::Forbidden);
        let report = w.sweeper.sweep().await.unwrap();

        assert_eq!(report.deactivated, 1);
        assert_eq!(report.delivery_failures, 1);
        assert!(!w.registry.get(MEMBER).await.unwrap().unwrap().active);
    }
}
