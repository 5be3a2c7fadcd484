//! Batch slider update tool definition.

use std::collections::BTreeMap;

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

/// Parameters for the batch slider update tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SetSlidersParams {
    /// Slider name → new value. The whole batch runs in one recompute;
    /// items that fail (unknown name) are reported individually without
    /// aborting the rest.
    pub updates: BTreeMap<String, f64>,
}

/// Applies several slider values in a single recompute.
pub struct SetSlidersTool;

impl SetSlidersTool {
    pub const NAME: &'static str = "set_grasshopper_sliders";

    pub const DESCRIPTION: &'static str =
        "Set several Grasshopper sliders at once. The solver is suspended for the whole \
         batch and resumed once at the end, so the definition recomputes a single time. \
         The response reports each update's outcome plus a failed_updates count.";

    pub const ENDPOINT: &'static str = "/set_sliders";

    pub async fn execute(params: &SetSlidersParams, client: &BridgeClient) -> Value {
        client
            .call(Self::ENDPOINT, Some(json!({"updates": params.updates})))
            .await
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SetSlidersParams>(),
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
                let params: SetSlidersParams = parse_params(arguments)?;
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
    fn test_params_accept_name_value_map() {
        let params: SetSlidersParams =
            serde_json::from_value(json!({"updates": {"Width": 12.0, "Count": 3.0}})).unwrap();
        assert_eq!(params.updates.len(), 2);
        assert_eq!(params.updates["Width"], 12.0);
    }

    #[test]
    fn test_params_require_updates_field() {
        assert!(serde_json::from_value::<SetSlidersParams>(json!({})).is_err());
    }
}
