//! Truss generation tool definition.
//!
//! The thunk ships the upper chord, depth, division count and topology to
//! the bridge; the geometry itself is computed host-side so the generated
//! members land in the live document.

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

/// Parameters for the truss generation tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GenerateTrussParams {
    /// X-coordinate of the upper chord start point.
    #[serde(default)]
    pub upper_line_start_x: f64,
    /// Y-coordinate of the upper chord start point.
    #[serde(default)]
    pub upper_line_start_y: f64,
    /// Z-coordinate of the upper chord start point.
    #[serde(default)]
    pub upper_line_start_z: f64,
    /// X-coordinate of the upper chord end point.
    #[serde(default = "default_end_x")]
    pub upper_line_end_x: f64,
    /// Y-coordinate of the upper chord end point.
    #[serde(default)]
    pub upper_line_end_y: f64,
    /// Z-coordinate of the upper chord end point.
    #[serde(default)]
    pub upper_line_end_z: f64,
    /// Vertical distance between the upper and lower chords.
    #[serde(default = "default_depth")]
    pub truss_depth: f64,
    /// Number of bays along the chord (at least 1).
    #[serde(default = "default_divisions")]
    pub num_divisions: i64,
    /// Web topology: Pratt, Warren, Vierendeel, Howe, Brown or Onedir.
    /// Unknown names fall back to Pratt.
    #[serde(default = "default_topology")]
    pub truss_type: String,
    /// Delete members from a previous generation before creating new ones.
    #[serde(default = "default_clear")]
    pub clear_previous: bool,
}

fn default_end_x() -> f64 {
    10.0
}
fn default_depth() -> f64 {
    2.0
}
fn default_divisions() -> i64 {
    4
}
fn default_topology() -> String {
    "Pratt".to_string()
}
fn default_clear() -> bool {
    true
}

/// Generates a parametric roof truss from an upper chord line.
pub struct GenerateTrussTool;

impl GenerateTrussTool {
    pub const NAME: &'static str = "generate_truss";

    pub const DESCRIPTION: &'static str =
        "Generate a typical roof truss structure from an upper chord line. Divides the \
         chord, offsets a lower chord by the truss depth, and emits chord, vertical and \
         diagonal members per the chosen topology (Pratt, Warren, Vierendeel, Howe, \
         Brown, Onedir). Previously generated members are cleared first unless \
         clear_previous is false.";

    pub const ENDPOINT: &'static str = "/generate_truss";

    pub async fn execute(params: &GenerateTrussParams, client: &BridgeClient) -> Value {
        client
            .call(
                Self::ENDPOINT,
                Some(json!({
                    "upper_line_start_x": params.upper_line_start_x,
                    "upper_line_start_y": params.upper_line_start_y,
                    "upper_line_start_z": params.upper_line_start_z,
                    "upper_line_end_x": params.upper_line_end_x,
                    "upper_line_end_y": params.upper_line_end_y,
                    "upper_line_end_z": params.upper_line_end_z,
                    "truss_depth": params.truss_depth,
                    "num_divisions": params.num_divisions,
                    "truss_type": params.truss_type,
                    "clear_previous": params.clear_previous,
                })),
            )
            .await
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GenerateTrussParams>(),
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
                let params: GenerateTrussParams = parse_params(arguments)?;
                Ok(bridge_response(Self::execute(&params, &client).await))
            }
            .boxed()
        })
    }
}
