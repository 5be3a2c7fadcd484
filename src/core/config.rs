//! Configuration management.
//!
//! A centralized configuration structure populated from environment
//! variables or defaults. The bridge address is shared by both binaries:
//! the MCP server targets it as a client, the bridge binary binds it.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Bridge address configuration.
    pub bridge: BridgeConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Bridge server address.
///
/// Defaults: `localhost:8080`. Overridable with `RHINO_BRIDGE_HOST` and
/// `RHINO_BRIDGE_PORT`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    pub host: String,
    pub port: u16,
}

impl BridgeConfig {
    /// Base URL a client uses to reach the bridge.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8080,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "rhino-grasshopper-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            bridge: BridgeConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Recognized variables: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`,
    /// `RHINO_BRIDGE_HOST`, `RHINO_BRIDGE_PORT`. Invalid values are logged
    /// and replaced by the defaults, never fatal.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(host) = std::env::var("RHINO_BRIDGE_HOST") {
            config.bridge.host = host;
        }

        if let Ok(port) = std::env::var("RHINO_BRIDGE_PORT") {
            match port.parse() {
                Ok(port) => config.bridge.port = port,
                Err(_) => warn!(
                    "Invalid RHINO_BRIDGE_PORT '{}', using default {}",
                    port, config.bridge.port
                ),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_default_bridge_address() {
        let config = Config::default();
        assert_eq!(config.bridge.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_bridge_address_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("RHINO_BRIDGE_HOST", "10.0.0.5");
            std::env::set_var("RHINO_BRIDGE_PORT", "9090");
        }
        let config = Config::from_env();
        assert_eq!(config.bridge.base_url(), "http://10.0.0.5:9090");
        unsafe {
            std::env::remove_var("RHINO_BRIDGE_HOST");
            std::env::remove_var("RHINO_BRIDGE_PORT");
        }
    }

    #[test]
    fn test_invalid_port_falls_back_to_default() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("RHINO_BRIDGE_PORT", "not-a-port");
        }
        let config = Config::from_env();
        assert_eq!(config.bridge.port, 8080);
        unsafe {
            std::env::remove_var("RHINO_BRIDGE_PORT");
        }
    }
}
