//! MCP server implementation and lifecycle management.
//!
//! The agent-facing handler. On construction it discovers the tool catalog
//! and builds the router; adding a tool never requires touching this file.
//!
//! Tools are thin thunks over the bridge: the server itself holds no host
//! state and stays fully functional while the bridge is down - every tool
//! then returns a `{success:false, error}` envelope naming the bridge
//! address.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, handler::server::tool::ToolRouter, model::*,
    service::RequestContext, tool_handler,
};
use std::sync::Arc;
use tracing::{info, warn};

use super::config::Config;
use crate::bridge::BridgeClient;
use crate::domains::tools::{ToolKind, ToolRegistry, build_tool_router};

/// The main MCP server handler.
#[derive(Clone)]
pub struct RhinoMcpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Client for reaching the bridge (exposed for startup checks).
    client: Arc<BridgeClient>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl RhinoMcpServer {
    /// Create a new server, discovering and registering all tools.
    pub fn new(config: Config) -> Self {
        let config = Arc::new(config);
        let client = Arc::new(BridgeClient::new(&config.bridge));

        let registry = ToolRegistry::discover(&client);
        for kind in [ToolKind::Rhino, ToolKind::Grasshopper, ToolKind::Utility] {
            info!(
                "Registered {} {} tools",
                registry.list_by_kind(kind).len(),
                kind.label()
            );
        }

        Self {
            tool_router: build_tool_router(&registry),
            config,
            client,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Check whether the bridge server is reachable.
    ///
    /// Advisory only: the server starts either way, tools report
    /// unreachability in-band. Returns true when the bridge answered
    /// `/status` with `status: "running"`.
    pub async fn check_bridge_connection(&self) -> bool {
        let status = self.client.status().await;
        if status.get("status").and_then(|s| s.as_str()) == Some("running") {
            info!("Bridge server connection verified at {}", self.client.base_url());
            true
        } else {
            warn!(
                "Bridge server not reachable at {} - start it beside the host before using tools",
                self.client.base_url()
            );
            false
        }
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool
/// routing.
#[tool_handler]
impl ServerHandler for RhinoMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Tools for driving a Rhino/Grasshopper session over the HTTP bridge. \
                 Every tool returns a JSON envelope with a 'success' field; read it \
                 before trusting the rest of the payload. Use test_echo to verify the \
                 bridge, list_grasshopper_sliders before setting slider values."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_builds_router_on_construction() {
        let server = RhinoMcpServer::new(Config::default());
        let tools = server.tool_router.list_all();
        assert_eq!(tools.len(), 8);
        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"generate_truss"));
        assert!(names.contains(&"set_grasshopper_sliders"));
    }

    #[tokio::test]
    async fn test_bridge_check_is_advisory_when_down() {
        let mut config = Config::default();
        config.bridge.port = 1; // nothing listens here
        config.bridge.host = "127.0.0.1".to_string();
        let server = RhinoMcpServer::new(config);
        assert!(!server.check_bridge_connection().await);
    }
}
