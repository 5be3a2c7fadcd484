//! Echo tool definition.
//!
//! Verifies the whole chain - registry, thunk, transport, dispatch,
//! handler - without touching any host capability.

use futures::FutureExt;
use rmcp::handler::server::tool::cached_schema_for_type;
use rmcp::model::Tool;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

use super::super::{bridge_response, parse_params};
use crate::bridge::BridgeClient;
use crate::domains::tools::{ToolDescriptor, ToolKind};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct EchoParams {
    /// The message to echo back.
    #[serde(default = "default_message")]
    pub message: String,
}

fn default_message() -> String {
    "Hello from the MCP server!".to_string()
}

pub struct EchoTool;

impl EchoTool {
    pub const NAME: &'static str = "test_echo";

    pub const DESCRIPTION: &'static str =
        "Echo a message back through the bridge. Use this to verify the tool discovery \
         and dispatch chain is working before invoking real tools.";

    pub const ENDPOINT: &'static str = "/test_echo";

    pub async fn execute(params: &EchoParams, client: &BridgeClient) -> Value {
        client
            .call(Self::ENDPOINT, Some(json!({"message": params.message})))
            .await
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<EchoParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    pub fn descriptor(client: Arc<BridgeClient>) -> ToolDescriptor {
        ToolDescriptor::new(ToolKind::Utility, Self::to_tool(), move |arguments| {
            let client = client.clone();
            async move {
                let params: EchoParams = parse_params(arguments)?;
                Ok(bridge_response(Self::execute(&params, &client).await))
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_defaults() {
        let params: EchoParams = serde_json::from_value(json!({})).unwrap();
        assert_eq!(params.message, "Hello from the MCP server!");
    }
}
