//! Rhino/Grasshopper MCP server and HTTP dispatch bridge.
//!
//! Lets a tool-calling agent drive a Rhino/Grasshopper session it cannot
//! share a process with. Every operation is a name + JSON payload: the
//! agent-side MCP server resolves the tool name to a thunk, the thunk posts
//! to the bridge endpoint its paired handler listens on, and the handler
//! executes against the live session through a capability adapter.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the MCP server handler and
//!   its stdio transport
//! - **domains::tools**: agent-invocable tool definitions, registry and
//!   router
//! - **bridge**: the transport client, the handler registry and the
//!   host-side HTTP dispatch server
//! - **host**: the capability interface onto the modeling session, its
//!   probe, and the adapters (detached / in-memory simulation)
//! - **truss**: pure parametric truss generation
//!
//! # Example
//!
//! ```rust,no_run
//! use rhino_mcp_server::core::{Config, RhinoMcpServer, StdioTransport};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = RhinoMcpServer::new(config);
//!     StdioTransport::run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod bridge;
pub mod core;
pub mod domains;
pub mod host;
pub mod truss;

// Re-export commonly used types for convenience
pub use crate::core::{Config, Error, Result, RhinoMcpServer};
