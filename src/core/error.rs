//! Error types and handling.
//!
//! A unified error type spanning the transport, host and handler
//! boundaries, for consistent error handling across the crate. Note that
//! most failures in this system are deliberately *not* errors: the bridge
//! client folds transport failures into JSON envelopes, and handlers report
//! recoverable conditions in-band.

use thiserror::Error;

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Error from the transport layer (bind, stdio service).
    #[error("Transport error: {0}")]
    Transport(#[from] crate::core::transport::TransportError),

    /// Error from a host adapter operation.
    #[error("Host error: {0}")]
    Host(#[from] crate::host::HostError),

    /// Fault raised by a bridge handler.
    #[error("Handler error: {0}")]
    Handler(#[from] crate::bridge::HandlerError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors from network communication.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
