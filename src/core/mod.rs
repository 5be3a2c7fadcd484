//! Core infrastructure: configuration, error handling, the MCP server
//! handler and its transport.

pub mod config;
pub mod error;
pub mod logging;
pub mod server;
pub mod transport;

pub use config::{BridgeConfig, Config};
pub use error::{Error, Result};
pub use server::RhinoMcpServer;
pub use transport::StdioTransport;
