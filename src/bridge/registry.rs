//! Handler registry.
//!
//! The host-side catalog of endpoint handlers the dispatch bridge routes
//! on. Handlers are registered by the modules listed in the compiled
//! manifest (`handlers::MODULES`); there is no central list to keep in
//! sync and no filesystem scanning at runtime.
//!
//! Discovery is clear-then-populate: it always builds a fresh registry, so
//! running it twice can never accumulate duplicate registrations. Each
//! module registers inside its own recoverable unit - one panicking module
//! is skipped with a warning and the rest still load.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::host::{HostAdapter, HostError};

use super::handlers::MODULES;

// ============================================================================
// Errors
// ============================================================================

/// A host fault inside a handler.
///
/// This is the analog of an uncaught handler exception: the dispatch
/// boundary converts it to HTTP 500. Recoverable conditions (slider not
/// found, capability unavailable) never take this channel - handlers fold
/// them into `{success:false}` envelopes returned as `Ok`.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Host(#[from] HostError),

    #[error("{0}")]
    Internal(String),
}

/// What a handler returns: an in-band JSON envelope, or a fault.
pub type HandlerResult = Result<Value, HandlerError>;

type HandlerFn = Arc<dyn Fn(&dyn HostAdapter, Value) -> HandlerResult + Send + Sync>;

// ============================================================================
// Descriptors
// ============================================================================

/// One registered endpoint: path, human description, execution function.
#[derive(Clone)]
pub struct HandlerDescriptor {
    pub endpoint: &'static str,
    pub description: &'static str,
    handler: HandlerFn,
}

impl HandlerDescriptor {
    pub fn new(
        endpoint: &'static str,
        description: &'static str,
        handler: impl Fn(&dyn HostAdapter, Value) -> HandlerResult + Send + Sync + 'static,
    ) -> Self {
        Self {
            endpoint,
            description,
            handler: Arc::new(handler),
        }
    }

    /// Run the handler. The body is guaranteed to be parsed JSON - the
    /// bridge rejects unparseable bodies before dispatch.
    pub fn execute(&self, host: &dyn HostAdapter, body: Value) -> HandlerResult {
        (self.handler)(host, body)
    }
}

/// A manifest entry: a named module that registers its handlers.
pub struct HandlerModule {
    pub name: &'static str,
    pub register: fn(&mut HandlerRegistry),
}

// ============================================================================
// Registry
// ============================================================================

/// Endpoint → handler table, in registration order.
pub struct HandlerRegistry {
    handlers: Vec<HandlerDescriptor>,
}

impl HandlerRegistry {
    /// An empty registry. Prefer [`HandlerRegistry::discover`].
    pub fn empty() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Build the registry from the compiled module manifest.
    pub fn discover() -> Self {
        let mut registry = Self::empty();
        for module in MODULES {
            let outcome = catch_unwind(AssertUnwindSafe(|| (module.register)(&mut registry)));
            if outcome.is_err() {
                warn!(
                    "Handler module '{}' panicked during registration; skipping it",
                    module.name
                );
            }
        }
        info!("Discovered {} bridge handlers", registry.len());
        registry
    }

    /// Register a handler. A duplicate endpoint is reported as a warning
    /// and the later registration wins; it is never a fatal error and never
    /// a silent merge.
    pub fn register(&mut self, descriptor: HandlerDescriptor) {
        if let Some(pos) = self
            .handlers
            .iter()
            .position(|h| h.endpoint == descriptor.endpoint)
        {
            warn!(
                "Handler endpoint '{}' registered twice; keeping the later registration",
                descriptor.endpoint
            );
            self.handlers.remove(pos);
        }
        self.handlers.push(descriptor);
    }

    /// Exact-match lookup by request path.
    pub fn get(&self, endpoint: &str) -> Option<&HandlerDescriptor> {
        self.handlers.iter().find(|h| h.endpoint == endpoint)
    }

    /// All descriptors, in registration order.
    pub fn descriptors(&self) -> &[HandlerDescriptor] {
        &self.handlers
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn descriptor(endpoint: &'static str, marker: &'static str) -> HandlerDescriptor {
        HandlerDescriptor::new(endpoint, "test handler", move |_, _| {
            Ok(json!({"success": true, "marker": marker}))
        })
    }

    #[test]
    fn test_duplicate_endpoint_last_wins() {
        let mut registry = HandlerRegistry::empty();
        registry.register(descriptor("/x", "first"));
        registry.register(descriptor("/x", "second"));
        assert_eq!(registry.len(), 1);

        let host = crate::host::DetachedHost::new();
        let result = registry.get("/x").unwrap().execute(&host, json!({})).unwrap();
        assert_eq!(result["marker"], "second");
    }

    #[test]
    fn test_discover_is_clear_then_populate() {
        let first = HandlerRegistry::discover();
        let second = HandlerRegistry::discover();
        assert_eq!(first.len(), second.len());
        assert!(!first.is_empty());
    }

    #[test]
    fn test_discovered_endpoints_are_unique() {
        let registry = HandlerRegistry::discover();
        let mut endpoints: Vec<_> = registry.descriptors().iter().map(|h| h.endpoint).collect();
        let total = endpoints.len();
        endpoints.sort();
        endpoints.dedup();
        assert_eq!(endpoints.len(), total);
    }

    #[test]
    fn test_lookup_is_exact_match() {
        let registry = HandlerRegistry::discover();
        assert!(registry.get("/set_slider").is_some());
        assert!(registry.get("/set_slider/").is_none());
        assert!(registry.get("/SET_SLIDER").is_none());
    }
}
