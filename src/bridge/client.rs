//! Bridge transport client.
//!
//! Agent-side HTTP access to the bridge server. The contract is deliberately
//! total: `call` always returns a JSON object, never an error. Connection
//! refusal is an expected condition (the host may simply not be running yet)
//! and comes back as a `{success:false, error}` envelope the tool layer
//! passes straight through to the agent.
//!
//! The client performs exactly one attempt per call - no retries. Tool
//! callers may retry whole invocations themselves; a timed-out call can
//! still complete host-side, which is why handlers report what happened
//! rather than assuming the caller saw it.

use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, warn};

use crate::core::config::BridgeConfig;

/// Hard per-request timeout. Callers needing longer operations should
/// split them host-side.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the bridge server.
pub struct BridgeClient {
    base_url: String,
    http: reqwest::Client,
}

impl BridgeClient {
    /// Client targeting the configured bridge address.
    pub fn new(config: &BridgeConfig) -> Self {
        Self::with_base_url(config.base_url())
    }

    /// Client targeting an explicit base URL, e.g. `http://localhost:8080`.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::default(),
        }
    }

    /// The bridge base URL this client targets.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Call a bridge endpoint.
    ///
    /// `None` payload issues a GET; a payload issues a POST with a JSON
    /// body. All failure modes - refused connection, timeout, non-2xx with
    /// an unreadable body, undecodable response - come back as
    /// `{success:false, error}` so the tool layer never has a second error
    /// channel to handle.
    pub async fn call(&self, endpoint: &str, payload: Option<Value>) -> Value {
        let url = format!("{}{}", self.base_url, endpoint);

        let result = match payload {
            None => {
                debug!("GET {}", url);
                self.http.get(&url).timeout(REQUEST_TIMEOUT).send().await
            }
            Some(body) => {
                debug!("POST {}", url);
                self.http
                    .post(&url)
                    .json(&body)
                    .timeout(REQUEST_TIMEOUT)
                    .send()
                    .await
            }
        };

        let response = match result {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                warn!("Bridge request to {} timed out", url);
                return json!({
                    "success": false,
                    "error": "Request to bridge server timed out",
                });
            }
            Err(e) if e.is_connect() => {
                return json!({
                    "success": false,
                    "error": format!(
                        "Cannot connect to bridge server at {}. \
                         Make sure the bridge is running beside the host.",
                        self.base_url
                    ),
                });
            }
            Err(e) => {
                warn!("Bridge request to {} failed: {}", url, e);
                return json!({
                    "success": false,
                    "error": format!("Bridge request failed: {e}"),
                });
            }
        };

        let status = response.status();
        match response.json::<Value>().await {
            // Non-2xx bodies are structured error envelopes themselves;
            // pass them through untouched.
            Ok(value) => value,
            Err(_) if !status.is_success() => json!({
                "success": false,
                "error": format!("transport failure: bridge returned HTTP {status}"),
            }),
            Err(e) => json!({
                "success": false,
                "error": format!("Invalid response from bridge server: {e}"),
            }),
        }
    }

    /// `GET /status` - bridge liveness and capability flags.
    pub async fn status(&self) -> Value {
        self.call("/status", None).await
    }

    /// `GET /info` - bridge identity and registered endpoints.
    pub async fn info(&self) -> Value {
        self.call("/info", None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A local port with nothing listening on it.
    async fn dead_port() -> u16 {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        port
    }

    #[test]
    fn test_base_url_from_config() {
        let client = BridgeClient::new(&BridgeConfig::default());
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[tokio::test]
    async fn test_unreachable_host_names_target_address() {
        let port = dead_port().await;
        let client = BridgeClient::with_base_url(format!("http://127.0.0.1:{port}"));
        let response = client.call("/status", None).await;
        assert_eq!(response["success"], false);
        let error = response["error"].as_str().unwrap();
        assert!(error.contains(&format!("http://127.0.0.1:{port}")), "{error}");
    }

    #[test]
    fn test_post_to_unreachable_host_does_not_error_out() {
        tokio_test::block_on(async {
            let port = dead_port().await;
            let client = BridgeClient::with_base_url(format!("http://127.0.0.1:{port}"));
            let response = client
                .call(
                    "/set_slider",
                    Some(json!({"slider_name": "Width", "new_value": 4.0})),
                )
                .await;
            assert_eq!(response["success"], false);
            assert!(response["error"].is_string());
        });
    }
}
