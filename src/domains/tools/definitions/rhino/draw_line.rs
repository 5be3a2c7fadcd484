//! Line drawing tool definition.

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

/// Parameters for the line drawing tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DrawLineParams {
    /// X-coordinate of the line start point.
    pub start_x: f64,
    /// Y-coordinate of the line start point.
    pub start_y: f64,
    /// Z-coordinate of the line start point.
    pub start_z: f64,
    /// X-coordinate of the line end point.
    pub end_x: f64,
    /// Y-coordinate of the line end point.
    pub end_y: f64,
    /// Z-coordinate of the line end point.
    pub end_z: f64,
}

/// Draws a line in the modeling document between two 3D points.
pub struct DrawLineTool;

impl DrawLineTool {
    pub const NAME: &'static str = "draw_line_rhino";

    pub const DESCRIPTION: &'static str =
        "Draw a line in Rhino 3D space between two points. Creates a line object in the \
         current document; coordinates are in the document's current units. Returns the \
         new line's id and length.";

    pub const ENDPOINT: &'static str = "/draw_line";

    pub async fn execute(params: &DrawLineParams, client: &BridgeClient) -> Value {
        client
            .call(
                Self::ENDPOINT,
                Some(json!({
                    "start_x": params.start_x,
                    "start_y": params.start_y,
                    "start_z": params.start_z,
                    "end_x": params.end_x,
                    "end_y": params.end_y,
                    "end_z": params.end_z,
                })),
            )
            .await
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<DrawLineParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    pub fn descriptor(client: Arc<BridgeClient>) -> ToolDescriptor {
        ToolDescriptor::new(ToolKind::Rhino, Self::to_tool(), move |arguments| {
            let client = client.clone();
            async move {
                let params: DrawLineParams = parse_params(arguments)?;
                Ok(bridge_response(Self::execute(&params, &client).await))
            }
            .boxed()
        })
    }
}
