//! Outbound port: the messaging transport behind the dispatcher.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;

use shared_types::{ChannelId, MediaRef, UserId};

// ===== TRANSPORT FAULTS =====

/// Raw faults a transport backend can raise.
///
/// These stay inside gw-03: the dispatcher maps them into the typed
/// `DeliveryError` / `RevocationError` of `shared-types` before anything
/// crosses the subsystem boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The recipient has blocked the sender. Permanent for this user.
    #[error("recipient forbids delivery")]
    Forbidden,
    /// The recipient does not exist or has deleted their account.
    #[error("peer unreachable")]
    PeerUnreachable,
    /// The backend asked us to slow down.
    #[error("flood limit hit")]
    FloodWait,
    /// Any other backend fault.
    #[error("transport fault: {0}")]
    Backend(String),
}

// ===== TRANSPORT PORT =====

/// Driven port for the messaging backend.
///
/// One method per wire operation; implementations perform exactly one
/// attempt and surface the raw fault. Retry policy, if any, belongs to
/// callers above the dispatcher.
#[async_trait]
pub trait MessageTransport: Send + Sync {
    /// Delivers a plain text message to a user's private chat.
    async fn send_text(&self, user: UserId, text: &str) -> Result<(), TransportError>;

    /// Delivers a media attachment with an optional caption.
    async fn send_media(
        &self,
        user: UserId,
        media: &MediaRef,
        caption: Option<&str>,
    ) -> Result<(), TransportError>;

    /// Removes a user from a managed channel.
    async fn revoke_membership(
        &self,
        user: UserId,
        channel: ChannelId,
    ) -> Result<(), TransportError>;

    /// Lifts the ban left behind by [`revoke_membership`] so the user may
    /// rejoin after a future renewal.
    ///
    /// [`revoke_membership`]: MessageTransport::revoke_membership
    async fn restore_eligibility(
        &self,
        user: UserId,
        channel: ChannelId,
    ) -> Result<(), TransportError>;
}

// ===== RECORDING MOCK =====

/// A message captured by [`RecordingTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub user: UserId,
    pub text: String,
}

/// In-memory transport that records every call; used by the subsystem
/// tests and the integration suite. Individual users can be scripted to
/// fail with a chosen fault.
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<SentMessage>>,
    revoked: Mutex<Vec<(UserId, ChannelId)>>,
    restored: Mutex<Vec<(UserId, ChannelId)>>,
    failures: Mutex<HashMap<UserId, TransportError>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts every subsequent call involving `user` to fail with `fault`.
    pub fn fail_user(&self, user: UserId, fault: TransportError) {
        self.failures.lock().insert(user, fault);
    }

    /// Clears a previously scripted failure.
    pub fn heal_user(&self, user: UserId) {
        self.failures.lock().remove(&user);
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().clone()
    }

    pub fn revoked(&self) -> Vec<(UserId, ChannelId)> {
        self.revoked.lock().clone()
    }

    pub fn restored(&self) -> Vec<(UserId, ChannelId)> {
        self.restored.lock().clone()
    }

    fn scripted(&self, user: UserId) -> Result<(), TransportError> {
        match self.failures.lock().get(&user) {
            Some(fault) => Err(fault.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl MessageTransport for RecordingTransport {
    async fn send_text(&self, user: UserId, text: &str) -> Result<(), TransportError> {
        self.scripted(user)?;
        self.sent.lock().push(SentMessage {
            user,
            text: text.to_owned(),
        });
        Ok(())
    }

    async fn send_media(
        &self,
        user: UserId,
        media: &MediaRef,
        caption: Option<&str>,
    ) -> Result<(), TransportError> {
        self.scripted(user)?;
        self.sent.lock().push(SentMessage {
            user,
            text: format!("[media:{}] {}", media.0, caption.unwrap_or("")),
        });
        Ok(())
    }

    async fn revoke_membership(
        &self,
        user: UserId,
        channel: ChannelId,
    ) -> Result<(), TransportError> {
        self.scripted(user)?;
        self.revoked.lock().push((user, channel));
        Ok(())
    }

    async fn restore_eligibility(
        &self,
        user: UserId,
        channel: ChannelId,
    ) -> Result<(), TransportError> {
        self.scripted(user)?;
        self.restored.lock().push((user, channel));
        Ok(())
    }
}
