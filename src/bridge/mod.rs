//! Agent ↔ host bridge.
//!
//! The two halves of the process boundary:
//!
//! - `client` - agent-side HTTP client that folds every transport failure
//!   into a `{success:false, error}` envelope
//! - `registry` - the endpoint → handler catalog the bridge dispatches on
//! - `handlers` - host-side handler implementations, one module per area
//! - `server` - the HTTP server that runs beside the modeling host
//!
//! The tool registry and the handler registry are correlated only by
//! convention: a tool's thunk posts to the endpoint its paired handler
//! listens on. Nothing is shared across the process boundary.

pub mod client;
pub mod handlers;
pub mod registry;
pub mod server;

pub use client::BridgeClient;
pub use registry::{HandlerDescriptor, HandlerError, HandlerRegistry, HandlerResult};
pub use server::{BridgeServer, BridgeServerHandle};
