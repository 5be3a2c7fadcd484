//! Rhino tool definitions - operations on the modeling document.

mod document_info;
mod draw_line;
mod generate_truss;

pub use document_info::GetRhinoInfoTool;
pub use draw_line::{DrawLineParams, DrawLineTool};
pub use generate_truss::{GenerateTrussParams, GenerateTrussTool};

use std::sync::Arc;

use crate::bridge::BridgeClient;
use crate::domains::tools::ToolRegistry;

pub fn register(registry: &mut ToolRegistry, client: &Arc<BridgeClient>) {
    registry.register(DrawLineTool::descriptor(client.clone()));
    registry.register(GetRhinoInfoTool::descriptor(client.clone()));
    registry.register(GenerateTrussTool::descriptor(client.clone()));
}
