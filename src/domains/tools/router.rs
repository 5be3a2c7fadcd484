//! Tool router - builds the rmcp `ToolRouter` from the registry.
//!
//! Each descriptor already carries its invocation thunk, so routing is a
//! straight fold over the catalog in registration order.

use futures::FutureExt;
use rmcp::handler::server::tool::{ToolCallContext, ToolRoute, ToolRouter};

use super::registry::{ToolDescriptor, ToolRegistry};

/// Build the router with every registered tool.
pub fn build_tool_router<S>(registry: &ToolRegistry) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    registry
        .iter()
        .fold(ToolRouter::new(), |router, descriptor| {
            router.with_route(route_for(descriptor))
        })
}

fn route_for<S>(descriptor: &ToolDescriptor) -> ToolRoute<S>
where
    S: Send + Sync + 'static,
{
    let descriptor = descriptor.clone();
    ToolRoute::new_dyn(descriptor.tool.clone(), move |ctx: ToolCallContext<'_, S>| {
        let arguments = ctx.arguments.clone().unwrap_or_default();
        let invocation = descriptor.invoke(arguments);
        async move { invocation.await }.boxed()
    })
}
