//! Tool registry.
//!
//! The agent-side catalog of tool descriptors, populated by walking the
//! compiled manifest of definition modules. Like the handler registry on
//! the bridge side, discovery is clear-then-populate - it builds a fresh
//! registry every time, so repeated discovery cannot duplicate entries -
//! and each module registers inside its own recoverable unit.
//!
//! Descriptors are immutable after registration and listed in registration
//! order, not alphabetically.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use futures::future::BoxFuture;
use rmcp::ErrorData as McpError;
use rmcp::model::{CallToolResult, JsonObject, Tool};
use tracing::{info, warn};

use crate::bridge::BridgeClient;

use super::definitions::MODULES;

// ============================================================================
// Kinds and Descriptors
// ============================================================================

/// Which side of the host a tool talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    /// Modeling document operations.
    Rhino,
    /// Parametric definition operations.
    Grasshopper,
    /// Diagnostics that need no host capability.
    Utility,
}

impl ToolKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Rhino => "Rhino",
            Self::Grasshopper => "Grasshopper",
            Self::Utility => "utility",
        }
    }
}

type InvokeFn =
    Arc<dyn Fn(JsonObject) -> BoxFuture<'static, Result<CallToolResult, McpError>> + Send + Sync>;

/// One registered tool: metadata plus the invocation thunk.
///
/// The thunk owns its bridge client; transport failures never surface as
/// tool errors - they arrive as `{success:false, error}` payloads the
/// agent reads in-band.
#[derive(Clone)]
pub struct ToolDescriptor {
    pub kind: ToolKind,
    pub tool: Tool,
    thunk: InvokeFn,
}

impl ToolDescriptor {
    pub fn new(
        kind: ToolKind,
        tool: Tool,
        invoke: impl Fn(JsonObject) -> BoxFuture<'static, Result<CallToolResult, McpError>>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        Self {
            kind,
            tool,
            thunk: Arc::new(invoke),
        }
    }

    pub fn name(&self) -> &str {
        self.tool.name.as_ref()
    }

    /// Invoke the tool with already-parsed JSON arguments.
    pub fn invoke(
        &self,
        arguments: JsonObject,
    ) -> BoxFuture<'static, Result<CallToolResult, McpError>> {
        (self.thunk)(arguments)
    }
}

/// A manifest entry: a named definitions module that registers its tools.
pub struct ToolModule {
    pub name: &'static str,
    pub register: fn(&mut ToolRegistry, &Arc<BridgeClient>),
}

// ============================================================================
// Registry
// ============================================================================

/// Ordered tool catalog.
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
}

impl ToolRegistry {
    /// An empty registry. Prefer [`ToolRegistry::discover`].
    pub fn empty() -> Self {
        Self { tools: Vec::new() }
    }

    /// Build the registry from the compiled module manifest. Always starts
    /// from an empty catalog; one panicking module is skipped with a
    /// warning and the rest still register.
    pub fn discover(client: &Arc<BridgeClient>) -> Self {
        let mut registry = Self::empty();
        for module in MODULES {
            let outcome =
                catch_unwind(AssertUnwindSafe(|| (module.register)(&mut registry, client)));
            if outcome.is_err() {
                warn!(
                    "Tool module '{}' panicked during registration; skipping it",
                    module.name
                );
            }
        }
        info!("Discovered {} tools", registry.len());
        registry
    }

    /// Register a descriptor. A duplicate name is reported as a warning and
    /// the later registration wins - never a fatal error, never a silent
    /// merge.
    pub fn register(&mut self, descriptor: ToolDescriptor) {
        if let Some(pos) = self.tools.iter().position(|t| t.name() == descriptor.name()) {
            warn!(
                "Tool '{}' registered twice; keeping the later registration",
                descriptor.name()
            );
            self.tools.remove(pos);
        }
        self.tools.push(descriptor);
    }

    /// Descriptors of one kind, in registration order.
    pub fn list_by_kind(&self, kind: ToolKind) -> Vec<&ToolDescriptor> {
        self.tools.iter().filter(|t| t.kind == kind).collect()
    }

    /// All descriptors, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.tools.iter()
    }

    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;

    fn test_client() -> Arc<BridgeClient> {
        // Nothing is called during registration; any address works.
        Arc::new(BridgeClient::with_base_url("http://127.0.0.1:1"))
    }

    #[test]
    fn test_discover_registers_all_tools() {
        let registry = ToolRegistry::discover(&test_client());
        let names = registry.tool_names();
        for expected in [
            "draw_line_rhino",
            "get_rhino_info",
            "generate_truss",
            "list_grasshopper_sliders",
            "set_grasshopper_slider",
            "set_grasshopper_sliders",
            "list_grasshopper_components",
            "test_echo",
        ] {
            assert!(names.contains(&expected), "missing {expected}");
        }
    }

    #[test]
    fn test_names_are_unique_after_discovery() {
        let registry = ToolRegistry::discover(&test_client());
        let mut names = registry.tool_names();
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn test_rediscovery_does_not_accumulate() {
        let client = test_client();
        let first = ToolRegistry::discover(&client);
        let second = ToolRegistry::discover(&client);
        assert_eq!(first.len(), second.len());
    }

    #[test]
    fn test_kinds_partition_the_catalog() {
        let registry = ToolRegistry::discover(&test_client());
        let rhino = registry.list_by_kind(ToolKind::Rhino).len();
        let gh = registry.list_by_kind(ToolKind::Grasshopper).len();
        let utility = registry.list_by_kind(ToolKind::Utility).len();
        assert_eq!(rhino + gh + utility, registry.len());
        assert!(rhino >= 3);
        assert!(gh >= 4);
        assert!(utility >= 1);
    }

    #[test]
    fn test_duplicate_name_last_wins() {
        let client = test_client();
        let mut registry = ToolRegistry::discover(&client);
        let total = registry.len();

        // Re-register an existing name under a different kind.
        let replacement = ToolDescriptor::new(
            ToolKind::Utility,
            rmcp::model::Tool {
                name: "test_echo".into(),
                description: Some("replacement".into()),
                input_schema: Arc::new(JsonObject::new()),
                annotations: None,
                output_schema: None,
                icons: None,
                meta: None,
                title: None,
            },
            |_| async { Ok(CallToolResult::success(vec![])) }.boxed(),
        );
        registry.register(replacement);

        assert_eq!(registry.len(), total);
        let echo = registry
            .iter()
            .find(|t| t.name() == "test_echo")
            .unwrap();
        assert_eq!(echo.tool.description.as_deref(), Some("replacement"));
    }
}
