//! Single slider update tool definition.

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

/// Parameters for the slider update tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SetSliderParams {
    /// Name/nickname of the slider component to modify.
    pub slider_name: String,
    /// New value. Values outside the slider's bounds are clamped.
    pub new_value: f64,
}

/// Sets one slider value by name.
pub struct SetSliderTool;

impl SetSliderTool {
    pub const NAME: &'static str = "set_grasshopper_slider";

    pub const DESCRIPTION: &'static str =
        "Change the value of a Grasshopper slider component by name. Values outside the \
         slider's bounds are clamped; an unknown name fails with the list of valid \
         slider names. Use list_grasshopper_sliders first to see what is available.";

    pub const ENDPOINT: &'static str = "/set_slider";

    pub async fn execute(params: &SetSliderParams, client: &BridgeClient) -> Value {
        client
            .call(
                Self::ENDPOINT,
                Some(json!({
                    "slider_name": params.slider_name,
                    "new_value": params.new_value,
                })),
            )
            .await
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SetSliderParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    pub fn descriptor(client: Arc<BridgeClient>) -> ToolDescriptor {
        ToolDescriptor::new(ToolKind::Grasshopper, Self::to_tool(), move |arguments| {
            let client = client.clone();
            async move {
                let params: SetSliderParams = parse_params(arguments)?;
                Ok(bridge_response(Self::execute(&params, &client).await))
            }
            .boxed()
        })
    }
}
