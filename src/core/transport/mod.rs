//! Transport layer for the MCP server.
//!
//! The agent-facing surface is stdio only - the standard MCP mode. The
//! bridge's own HTTP server is not a transport option but a core component;
//! it lives in `crate::bridge::server`.

mod error;
mod stdio;

pub use error::{TransportError, TransportResult};
pub use stdio::StdioTransport;
