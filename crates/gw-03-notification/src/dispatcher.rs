//! Notification dispatcher: typed delivery over an untyped transport.

use std::sync::Arc;

use shared_types::{ChannelId, DeliveryError, MessagePayload, RevocationError, UserId};
use tracing::{debug, warn};

use crate::ports::outbound::{MessageTransport, TransportError};

/// Proof that a single delivery attempt succeeded.
///
/// Returned instead of `()` so call sites that gate follow-up writes on a
/// successful send (the expiry sweeper's cooldown stamp, for one) read as
/// what they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delivered;

/// The one gateway through which user-facing messages and membership
/// actions leave the engine.
pub struct NotificationDispatcher {
    transport: Arc<dyn MessageTransport>,
}

impl NotificationDispatcher {
    pub fn new(transport: Arc<dyn MessageTransport>) -> Self {
        Self { transport }
    }

    /// Sends a plain text message to a user's private chat.
    ///
    /// Exactly one transport attempt; the caller decides what a failure
    /// means for its own workflow.
    pub async fn notify(&self, user: UserId, text: &str) -> Result<Delivered, DeliveryError> {
        self.transport
            .send_text(user, text)
            .await
            .map_err(|fault| self.delivery_fault(user, fault))?;
        debug!("[gw-03] Delivered text to user {}", user);
        Ok(Delivered)
    }

    /// Sends an arbitrary payload (text or media) to a user.
    pub async fn deliver(
        &self,
        user: UserId,
        payload: &MessagePayload,
    ) -> Result<Delivered, DeliveryError> {
        let attempt = match payload {
            MessagePayload::Text(text) => self.transport.send_text(user, text).await,
            MessagePayload::Media { media, caption } => {
                self.transport.send_media(user, media, Some(caption)).await
            }
        };
        attempt.map_err(|fault| self.delivery_fault(user, fault))?;
        debug!("[gw-03] Delivered {} to user {}", payload.kind(), user);
        Ok(Delivered)
    }

    /// Removes a user from a channel, then immediately lifts the ban so a
    /// future renewal lets them rejoin. The restore half is best-effort.
    pub async fn revoke_access(
        &self,
        user: UserId,
        channel: ChannelId,
    ) -> Result<(), RevocationError> {
        self.transport
            .revoke_membership(user, channel)
            .await
            .map_err(|fault| RevocationError {
                user,
                channel,
                detail: fault.to_string(),
            })?;
        if let Err(fault) = self.transport.restore_eligibility(user, channel).await {
            // Removal already happened; a stuck ban only blocks a future
            // rejoin, so log and move on.
            warn!(
                "[gw-03] Unban after removal failed for user {} in channel {}: {}",
                user, channel, fault
            );
        }
        debug!("[gw-03] Revoked user {} from channel {}", user, channel);
        Ok(())
    }

    fn delivery_fault(&self, user: UserId, fault: TransportError) -> DeliveryError {
        match fault {
            TransportError::Forbidden => DeliveryError::Blocked(user),
            TransportError::PeerUnreachable => DeliveryError::Unreachable(user),
            TransportError::FloodWait => DeliveryError::RateLimited,
            TransportError::Backend(detail) => DeliveryError::Transport(detail),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::RecordingTransport;
    use shared_types::MediaRef;

    const USER: UserId = UserId(42);
    const CHANNEL: ChannelId = ChannelId(-100);

    fn dispatcher() -> (Arc<RecordingTransport>, NotificationDispatcher) {
        let transport = Arc::new(RecordingTransport::new());
        let dispatcher = NotificationDispatcher::new(transport.clone());
        (transport, dispatcher)
    }

    #[tokio::test]
    async fn test_notify_records_exactly_one_send() {
        let (transport, dispatcher) = dispatcher();

        dispatcher.notify(USER, "hello").await.unwrap();

        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].user, USER);
        assert_eq!(sent[0].text, "hello");
    }

    #[tokio::test]
    async fn test_blocked_user_maps_to_typed_failure() {
        let (transport, dispatcher) = dispatcher();
        transport.fail_user(USER, TransportError::Forbidden);

        let err = dispatcher.notify(USER, "hello").await.unwrap_err();

        assert_eq!(err, DeliveryError::Blocked(USER));
        assert!(transport.sent().is_empty());
    }

    #[tokio::test]
    async fn test_deliver_routes_media_payloads() {
        let (transport, dispatcher) = dispatcher();
        let payload = MessagePayload::Media {
            media: MediaRef("photo-1".into()),
            caption: "caption".into(),
        };

        dispatcher.deliver(USER, &payload).await.unwrap();

        assert_eq!(transport.sent()[0].text, "[media:photo-1] caption");
    }

    #[tokio::test]
    async fn test_revoke_removes_then_unbans() {
        let (transport, dispatcher) = dispatcher();

        dispatcher.revoke_access(USER, CHANNEL).await.unwrap();

        assert_eq!(transport.revoked(), vec![(USER, CHANNEL)]);
        assert_eq!(transport.restored(), vec![(USER, CHANNEL)]);
    }

    #[tokio::test]
    async fn test_revoke_failure_carries_user_and_channel() {
        let (transport, dispatcher) = dispatcher();
        transport.fail_user(USER, TransportError::Backend("kick refused".into()));

        let err = dispatcher.revoke_access(USER, CHANNEL).await.unwrap_err();

        assert_eq!(err.user, USER);
        assert_eq!(err.channel, CHANNEL);
        assert!(err.detail.contains("kick refused"));
    }
}
