//! Gate-Warden worker binary.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use shared_types::SystemTimeSource;
use warden_runtime::adapters::tracing_transport::TracingTransport;
use warden_runtime::config::WardenConfig;
use warden_runtime::container::WardenContainer;
use warden_runtime::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();

    let config = WardenConfig::from_env();
    anyhow::ensure!(
        !config.admin_ids.is_empty(),
        "WARDEN_ADMIN_IDS must name at least one administrator"
    );

    let container = WardenContainer::build(
        config,
        Arc::new(TracingTransport),
        Arc::new(SystemTimeSource),
    );
    let scheduler = container.start_scheduler();
    info!("[runtime] Gate-Warden up; press ctrl-c to stop");

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;
    info!("[runtime] Shutting down");
    scheduler.shutdown().await;
    info!(
        "[runtime] Final statistics: {}",
        container.statistics().as_json()
    );
    Ok(())
}
