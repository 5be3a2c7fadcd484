//! Logging initialization, shared by both binaries.

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt};

/// Initialize the tracing subscriber.
///
/// Output goes to stderr: the MCP binary owns stdout for the protocol
/// stream, and the bridge binary follows suit for consistency.
pub fn init(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
