//! Slider listing tool definition.

use futures::FutureExt;
use rmcp::handler::server::tool::cached_schema_for_type;
use rmcp::model::Tool;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use super::super::bridge_response;
use crate::bridge::BridgeClient;
use crate::domains::tools::{ToolDescriptor, ToolKind};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListSlidersParams {}

/// Lists the slider components of the active parametric definition.
pub struct ListSlidersTool;

impl ListSlidersTool {
    pub const NAME: &'static str = "list_grasshopper_sliders";

    pub const DESCRIPTION: &'static str =
        "List all number slider components in the current Grasshopper definition with \
         their names, bounds and current values. Use this first to discover what can be \
         modified with set_grasshopper_slider.";

    pub const ENDPOINT: &'static str = "/list_sliders";

    pub async fn execute(client: &BridgeClient) -> Value {
        client.call(Self::ENDPOINT, Some(serde_json::json!({}))).await
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<ListSlidersParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    pub fn descriptor(client: Arc<BridgeClient>) -> ToolDescriptor {
        ToolDescriptor::new(ToolKind::Grasshopper, Self::to_tool(), move |_arguments| {
            let client = client.clone();
            async move { Ok(bridge_response(Self::execute(&client).await)) }.boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_metadata() {
        assert_eq!(
            ListSlidersTool::to_tool().name.as_ref(),
            "list_grasshopper_sliders"
        );
    }
}
