//! Outbound port: the set of channels the sweep evicts from.

use async_trait::async_trait;

use shared_types::{Channel, StoreError};

/// Read-only view of the managed channel roster.
#[async_trait]
pub trait ChannelDirectory: Send + Sync {
    /// Channels currently under management. Inactive channels are already
    /// filtered out.
    async fn active_channels(&self) -> Result<Vec<Channel>, StoreError>;
}
