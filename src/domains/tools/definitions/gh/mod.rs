//! Grasshopper tool definitions - operations on the parametric definition.

mod list_components;
mod list_sliders;
mod set_slider;
mod set_sliders;

pub use list_components::ListComponentsTool;
pub use list_sliders::ListSlidersTool;
pub use set_slider::{SetSliderParams, SetSliderTool};
pub use set_sliders::{SetSlidersParams, SetSlidersTool};

use std::sync::Arc;

use crate::bridge::BridgeClient;
use crate::domains::tools::ToolRegistry;

pub fn register(registry: &mut ToolRegistry, client: &Arc<BridgeClient>) {
    registry.register(ListSlidersTool::descriptor(client.clone()));
    registry.register(SetSliderTool::descriptor(client.clone()));
    registry.register(SetSlidersTool::descriptor(client.clone()));
    registry.register(ListComponentsTool::descriptor(client.clone()));
}
