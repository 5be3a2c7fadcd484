//! Session info tool definition.

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
pub struct GetRhinoInfoParams {}

/// Reports the current session and document state.
pub struct GetRhinoInfoTool;

impl GetRhinoInfoTool {
    pub const NAME: &'static str = "get_rhino_info";

    pub const DESCRIPTION: &'static str =
        "Get information about the current Rhino session and document: capability flags, \
         document units and object count.";

    pub const ENDPOINT: &'static str = "/get_rhino_info";

    pub async fn execute(client: &BridgeClient) -> Value {
        client.call(Self::ENDPOINT, Some(serde_json::json!({}))).await
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetRhinoInfoParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    pub fn descriptor(client: Arc<BridgeClient>) -> ToolDescriptor {
        ToolDescriptor::new(ToolKind::Rhino, Self::to_tool(), move |_arguments| {
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
        assert_eq!(GetRhinoInfoTool::to_tool().name.as_ref(), "get_rhino_info");
    }
}
