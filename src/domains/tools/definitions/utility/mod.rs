//! Utility tool definitions - diagnostics that need no host capability.

mod echo;

pub use echo::{EchoParams, EchoTool};

use std::sync::Arc;

use crate::bridge::BridgeClient;
use crate::domains::tools::ToolRegistry;

pub fn register(registry: &mut ToolRegistry, client: &Arc<BridgeClient>) {
    registry.register(EchoTool::descriptor(client.clone()));
}
