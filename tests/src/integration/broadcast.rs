//! Broadcast runs over the wired store.
//!
//! Exercises audience resolution against real registry state in the
//! `MemoryStore`, plus the run history the store keeps.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use gw_02_subscription_registry::{RegistryService, SubscriptionRegistryApi};
    use gw_03_notification::{NotificationDispatcher, RecordingTransport, TransportError};
    use gw_04_broadcast::{
        BroadcastEngine, BroadcastPacing, BroadcastStore, BroadcastTarget, NullProgress,
    };
    use shared_types::time::days;
    use shared_types::{MessagePayload, MockTimeSource, User, UserId};
    use warden_runtime::MemoryStore;

    struct World {
        store: Arc<MemoryStore>,
        transport: Arc<RecordingTransport>,
        registry: Arc<RegistryService>,
        engine: BroadcastEngine,
    }

    fn world(user_count: i64) -> World {
        let clock = Arc::new(MockTimeSource::new(1_000));
        let store = Arc::new(MemoryStore::new());
        let transport = Arc::new(RecordingTransport::new());
        let dispatcher = Arc::new(NotificationDispatcher::new(transport.clone()));

        for id in 1..=user_count {
            store.register_user(User {
                id: UserId(id),
                full_name: format!("user-{id}"),
                username: None,
                registered_at: 0,
            });
        }

        let registry = Arc::new(RegistryService::new(store.clone(), clock.clone()));
        let engine = BroadcastEngine::new(
            store.clone(),
            dispatcher,
            store.clone(),
            clock,
            BroadcastPacing::default(),
        );

        World {
            store,
            transport,
            registry,
            engine,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_targets_follow_registry_state() {
        let w = world(4);
        w.registry.grant(UserId(2), days(30)).await.unwrap();
        w.registry.grant(UserId(4), days(30)).await.unwrap();
        let payload = MessagePayload::Text("subscribers only".into());

        let report = w
            .engine
            .run(
                BroadcastTarget::ActiveSubscribers,
                &payload,
                &NullProgress,
                None,
            )
            .await
            .unwrap();
        assert_eq!(report.sent, 2);

        let reached: Vec<UserId> = w.transport.sent().iter().map(|m| m.user).collect();
        assert_eq!(reached, vec![UserId(2), UserId(4)]);

        // A deactivated subscriber moves to the non-subscriber audience.
        w.registry.deactivate(UserId(2)).await.unwrap();
        let report = w
            .engine
            .run(
                BroadcastTarget::NonSubscribers,
                &payload,
                &NullProgress,
                None,
            )
            .await
            .unwrap();
        assert_eq!(report.sent, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_history_lands_in_store_newest_first() {
        let w = world(3);
        let first = MessagePayload::Text("one".into());
        let second = MessagePayload::Media {
            media: shared_types::MediaRef("banner".into()),
            caption: "two".into(),
        };

        w.engine
            .run(BroadcastTarget::All, &first, &NullProgress, None)
            .await
            .unwrap();
        w.engine
            .run(BroadcastTarget::All, &second, &NullProgress, None)
            .await
            .unwrap();

        let history = w.store.recent(10).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].kind, "media");
        assert_eq!(history[1].kind, "text");
        assert_eq!(history[0].total, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blocked_users_do_not_sink_the_run() {
        let w = world(5);
        w.transport.fail_user(UserId(3), TransportError::Forbidden);
        let payload = MessagePayload::Text("news".into());

        let report = w
            .engine
            .run(BroadcastTarget::All, &payload, &NullProgress, None)
            .await
            .unwrap();

        assert_eq!(report.sent, 4);
        assert_eq!(report.failed, 1);
        assert!(report.is_complete());

        let history = w.store.recent(1).await.unwrap();
        assert_eq!(history[0].failed, 1);
    }
}
