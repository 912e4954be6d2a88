//! Transport adapter that logs instead of sending.
//!
//! Stands in for a real messaging backend in local runs: every delivery
//! and membership action is emitted through tracing and reported as
//! successful.

use async_trait::async_trait;

use gw_03_notification::{MessageTransport, TransportError};
use shared_types::{ChannelId, MediaRef, UserId};
use tracing::info;

pub struct TracingTransport;

#[async_trait]
impl MessageTransport for TracingTransport {
    async fn send_text(&self, user: UserId, text: &str) -> Result<(), TransportError> {
        info!("[transport] -> user {}: {}", user, text);
        Ok(())
    }

    async fn send_media(
        &self,
        user: UserId,
        media: &MediaRef,
        caption: Option<&str>,
    ) -> Result<(), TransportError> {
        info!(
            "[transport] -> user {}: media {} ({})",
            user,
            media.0,
            caption.unwrap_or("no caption")
        );
        Ok(())
    }

    async fn revoke_membership(
        &self,
        user: UserId,
        channel: ChannelId,
    ) -> Result<(), TransportError> {
        info!("[transport] kick user {} from channel {}", user, channel);
        Ok(())
    }

    async fn restore_eligibility(
        &self,
        user: UserId,
        channel: ChannelId,
    ) -> Result<(), TransportError> {
        info!("[transport] unban user {} in channel {}", user, channel);
        Ok(())
    }
}
