//! Tool definitions.
//!
//! One file per tool, grouped by area. `MODULES` is the compiled manifest
//! the registry's discovery walks; each area module contributes a
//! `register` function.

pub mod gh;
pub mod rhino;
pub mod utility;

use rmcp::ErrorData as McpError;
use rmcp::model::{CallToolResult, Content, JsonObject};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::registry::ToolModule;

/// Manifest of definition modules, registered in this order.
pub const MODULES: &[ToolModule] = &[
    ToolModule {
        name: "rhino",
        register: rhino::register,
    },
    ToolModule {
        name: "gh",
        register: gh::register,
    },
    ToolModule {
        name: "utility",
        register: utility::register,
    },
];

/// Deserialize tool arguments into a typed params struct.
pub(crate) fn parse_params<T: DeserializeOwned>(arguments: JsonObject) -> Result<T, McpError> {
    serde_json::from_value(Value::Object(arguments))
        .map_err(|e| McpError::invalid_params(e.to_string(), None))
}

/// Wrap a bridge envelope as tool output.
///
/// The envelope goes back verbatim, `success:false` included - recoverable
/// failures are in-band data the agent is expected to read, not tool
/// errors.
pub(crate) fn bridge_response(envelope: Value) -> CallToolResult {
    let text = serde_json::to_string_pretty(&envelope).unwrap_or_else(|_| envelope.to_string());
    CallToolResult::success(vec![Content::text(text)])
}
