//! Component inventory tool definition.

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
pub struct ListComponentsParams {}

/// Lists every component of the active definition, typed by kind.
pub struct ListComponentsTool;

impl ListComponentsTool {
    pub const NAME: &'static str = "list_grasshopper_components";

    pub const DESCRIPTION: &'static str =
        "List the components of the current Grasshopper definition grouped by kind: \
         sliders, text panels, value lists and everything else. Snapshots are only \
         valid for this response; re-query before acting on them.";

    pub const ENDPOINT: &'static str = "/list_components";

    pub async fn execute(client: &BridgeClient) -> Value {
        client.call(Self::ENDPOINT, Some(serde_json::json!({}))).await
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<ListComponentsParams>(),
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
