//! Bridge server entry point.
//!
//! Runs the host-side HTTP dispatch bridge in the foreground. Without a
//! live host process attached, the adapter choice is driven by
//! `RHINO_BRIDGE_SIMULATE`: set it to run against the in-memory simulated
//! host (useful for development and demos); leave it unset to run detached,
//! where every capability probe reports unavailable.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use rhino_mcp_server::core::{Config, logging};
use rhino_mcp_server::bridge::BridgeServer;
use rhino_mcp_server::host::{DetachedHost, HostAdapter, InMemoryHost};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();

    logging::init(&config.logging.level);

    let simulate = std::env::var("RHINO_BRIDGE_SIMULATE")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    let host: Arc<dyn HostAdapter> = if simulate {
        info!("Running with the simulated in-memory host");
        Arc::new(InMemoryHost::with_demo_definition())
    } else {
        info!("Running detached - no host process attached");
        Arc::new(DetachedHost::new())
    };

    let handle = BridgeServer::new(config.bridge, host).start().await?;
    handle.wait().await;

    Ok(())
}
