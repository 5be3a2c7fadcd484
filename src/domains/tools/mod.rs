//! Tools domain.
//!
//! Agent-invocable operations, each a thin thunk that serializes its
//! arguments and posts them to the bridge endpoint its paired handler
//! listens on.
//!
//! ## Architecture
//!
//! - `definitions/` - individual tool implementations (one file per tool)
//! - `registry.rs` - ordered tool catalog with manifest-based discovery
//! - `router.rs` - builds the rmcp `ToolRouter` from the registry
//!
//! ## Adding a new tool
//!
//! 1. Create a file in `definitions/<area>/` with params, `execute()`,
//!    `to_tool()` and `descriptor()`
//! 2. Register it in the area's `register` function
//!
//! Nothing else changes - discovery walks the module manifest.

pub mod definitions;
mod registry;
pub mod router;

pub use registry::{ToolDescriptor, ToolKind, ToolRegistry};
pub use router::build_tool_router;
