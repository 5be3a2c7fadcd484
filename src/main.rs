//! MCP server entry point.
//!
//! Initializes logging, loads configuration, verifies bridge reachability
//! (advisory only) and serves the MCP protocol over stdio.

use anyhow::Result;
use tracing::info;

use rhino_mcp_server::core::{Config, RhinoMcpServer, StdioTransport, logging};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment
    let config = Config::from_env();

    logging::init(&config.logging.level);

    info!("Starting {} v{}", config.server.name, config.server.version);
    info!("Bridge server URL: {}", config.bridge.base_url());

    let server = RhinoMcpServer::new(config);

    // The server starts even when the bridge is down; tools report
    // unreachability in-band until it comes up.
    server.check_bridge_connection().await;

    StdioTransport::run(server).await?;

    info!("Server shutting down");

    Ok(())
}
