//! Dispatch bridge HTTP server.
//!
//! Runs beside the modeling host and executes operations against the live
//! session through the injected [`HostAdapter`]. Requests are demultiplexed
//! by exact path match against the handler registry; the JSON body is
//! parsed before dispatch and the handler's envelope is returned as JSON.
//!
//! Per-request state machine: received → routed → probed → executed →
//! responded. Routing failure is HTTP 404, an unparseable body is HTTP 400,
//! a handler fault is HTTP 500 - all with `{success:false, error,
//! status_code}` bodies. Logical failures stay HTTP 200 with
//! `success:false`. Nothing a handler does can crash the process.
//!
//! The accept loop runs on a background tokio task so the host's own
//! main/solver loop is never blocked; handler execution is serialized by a
//! single lock because the host's object model is single-threaded.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};
use tokio::sync::{Mutex, oneshot};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};

use crate::core::config::BridgeConfig;
use crate::core::transport::TransportError;
use crate::host::HostAdapter;

use super::registry::HandlerRegistry;

/// Shared state behind the router.
struct BridgeState {
    registry: HandlerRegistry,
    host: Arc<dyn HostAdapter>,
    /// Serializes handler execution against the host's single-threaded
    /// object model.
    exec_lock: Mutex<()>,
}

/// The bridge server, ready to start.
pub struct BridgeServer {
    config: BridgeConfig,
    host: Arc<dyn HostAdapter>,
}

/// Handle to a running bridge server.
pub struct BridgeServerHandle {
    addr: std::net::SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: tokio::task::JoinHandle<()>,
}

impl BridgeServerHandle {
    /// The address the server actually bound (port 0 resolves here).
    pub fn addr(&self) -> std::net::SocketAddr {
        self.addr
    }

    /// Base URL for a client targeting this server.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Gracefully stop the server and wait for the task to finish.
    pub async fn stop(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Err(e) = (&mut self.task).await {
            warn!("Bridge server task ended abnormally: {e}");
        }
    }

    /// Block until the server exits on its own (foreground mode).
    pub async fn wait(mut self) {
        if let Err(e) = (&mut self.task).await {
            warn!("Bridge server task ended abnormally: {e}");
        }
    }
}

impl BridgeServer {
    pub fn new(config: BridgeConfig, host: Arc<dyn HostAdapter>) -> Self {
        Self { config, host }
    }

    /// Bind and start serving on a background task.
    pub async fn start(self) -> crate::core::Result<BridgeServerHandle> {
        let registry = HandlerRegistry::discover();
        let addr = format!("{}:{}", self.config.host, self.config.port);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;
        let local_addr = listener.local_addr().map_err(TransportError::from)?;

        info!("Bridge server listening on http://{}", local_addr);
        info!("  → GET  /status");
        info!("  → GET  /info");
        for descriptor in registry.descriptors() {
            info!("  → POST {}", descriptor.endpoint);
        }

        let state = Arc::new(BridgeState {
            registry,
            host: self.host,
            exec_lock: Mutex::new(()),
        });

        let app = router(state);
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let serve = axum::serve(listener, app).with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            });
            if let Err(e) = serve.await {
                error!("Bridge server terminated: {e}");
            }
        });

        Ok(BridgeServerHandle {
            addr: local_addr,
            shutdown: Some(shutdown_tx),
            task,
        })
    }
}

fn router(state: Arc<BridgeState>) -> Router {
    // CORS headers go on every response, preflight included, for
    // browser-based callers.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/status", get(handle_status))
        .route("/info", get(handle_info))
        .fallback(dispatch)
        .layer(cors)
        .with_state(state)
}

// ============================================================================
// Bridge-owned endpoints
// ============================================================================

/// `GET /status` - liveness plus capability flags, recomputed per request.
async fn handle_status(State(state): State<Arc<BridgeState>>) -> impl IntoResponse {
    let capabilities = state.host.capabilities();
    Json(json!({
        "status": "running",
        "rhino_available": capabilities.rhino,
        "grasshopper_available": capabilities.grasshopper,
        "message": "Rhino bridge server is running",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// `GET /info` - identity and the currently registered endpoints.
async fn handle_info(State(state): State<Arc<BridgeState>>) -> impl IntoResponse {
    let mut endpoints = vec![
        json!({"path": "/status", "method": "GET", "description": "Server status"}),
        json!({"path": "/info", "method": "GET", "description": "Server information"}),
    ];
    for descriptor in state.registry.descriptors() {
        endpoints.push(json!({
            "path": descriptor.endpoint,
            "method": "POST",
            "description": descriptor.description,
        }));
    }

    Json(json!({
        "name": "Rhino HTTP Bridge Server",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": endpoints,
    }))
}

// ============================================================================
// Dispatch
// ============================================================================

async fn dispatch(
    State(state): State<Arc<BridgeState>>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();

    match method {
        Method::POST => {}
        // Preflight: the CORS layer decorates this empty 200.
        Method::OPTIONS => return StatusCode::OK.into_response(),
        _ => {
            return error_response(
                StatusCode::NOT_FOUND,
                format!("Endpoint not found: {path}"),
            );
        }
    }

    let Some(descriptor) = state.registry.get(&path) else {
        return error_response(StatusCode::NOT_FOUND, format!("Unknown endpoint: {path}"));
    };

    // Empty body means empty arguments; anything else must be valid JSON
    // before the handler ever sees it.
    let arguments: Value = if body.is_empty() {
        json!({})
    } else {
        match serde_json::from_slice(&body) {
            Ok(value) => value,
            Err(e) => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    format!("Invalid JSON in request body: {e}"),
                );
            }
        }
    };

    let _guard = state.exec_lock.lock().await;
    match descriptor.execute(state.host.as_ref(), arguments) {
        Ok(envelope) => (StatusCode::OK, Json(envelope)).into_response(),
        Err(fault) => {
            warn!("Handler {} faulted: {}", path, fault);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Internal server error: {fault}"),
            )
        }
    }
}

fn error_response(status: StatusCode, message: String) -> Response {
    (
        status,
        Json(json!({
            "success": false,
            "error": message,
            "status_code": status.as_u16(),
        })),
    )
        .into_response()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::client::BridgeClient;
    use crate::host::{DetachedHost, InMemoryHost};

    fn test_config() -> BridgeConfig {
        BridgeConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        }
    }

    async fn start_with(host: Arc<dyn HostAdapter>) -> (BridgeServerHandle, BridgeClient) {
        let server = BridgeServer::new(test_config(), host);
        let handle = server.start().await.unwrap();
        let client = BridgeClient::with_base_url(handle.base_url());
        (handle, client)
    }

    async fn start_demo() -> (BridgeServerHandle, BridgeClient) {
        start_with(Arc::new(InMemoryHost::with_demo_definition())).await
    }

    #[tokio::test]
    async fn test_status_reports_capabilities() {
        let (handle, client) = start_demo().await;
        let status = client.status().await;
        assert_eq!(status["status"], "running");
        assert_eq!(status["rhino_available"], true);
        assert_eq!(status["grasshopper_available"], true);
        handle.stop().await;
    }

    #[tokio::test]
    async fn test_info_lists_registered_endpoints() {
        let (handle, client) = start_demo().await;
        let info = client.info().await;
        let paths: Vec<&str> = info["endpoints"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|e| e["path"].as_str())
            .collect();
        for expected in [
            "/status",
            "/info",
            "/draw_line",
            "/get_rhino_info",
            "/list_sliders",
            "/set_slider",
            "/set_sliders",
            "/list_components",
            "/generate_truss",
            "/test_echo",
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
        handle.stop().await;
    }

    #[tokio::test]
    async fn test_unknown_path_is_404_with_envelope() {
        let (handle, client) = start_demo().await;
        let response = client.call("/no_such_endpoint", Some(json!({}))).await;
        assert_eq!(response["success"], false);
        assert_eq!(response["status_code"], 404);
        handle.stop().await;
    }

    #[tokio::test]
    async fn test_get_on_handler_endpoint_is_404() {
        let (handle, client) = start_demo().await;
        let response = client.call("/test_echo", None).await;
        assert_eq!(response["success"], false);
        assert_eq!(response["status_code"], 404);
        handle.stop().await;
    }

    #[tokio::test]
    async fn test_malformed_json_is_400_never_500() {
        let (handle, _client) = start_demo().await;
        let url = format!("{}/set_slider", handle.base_url());
        let response = reqwest::Client::new()
            .post(&url)
            .header("Content-Type", "application/json")
            .body("{not json")
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["status_code"], 400);
        handle.stop().await;
    }

    #[tokio::test]
    async fn test_empty_body_dispatches_with_empty_arguments() {
        let (handle, _client) = start_demo().await;
        let url = format!("{}/list_sliders", handle.base_url());
        let response = reqwest::Client::new().post(&url).send().await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["success"], true);
        handle.stop().await;
    }

    #[tokio::test]
    async fn test_handler_fault_is_500_with_envelope() {
        let (handle, _client) = start_demo().await;
        // Non-numeric coordinate: the handler's request parse fails, which
        // is a fault, not a logical failure.
        let url = format!("{}/draw_line", handle.base_url());
        let response = reqwest::Client::new()
            .post(&url)
            .json(&json!({"start_x": "abc"}))
            .send()
            .await
            .unwrap();
        assert_eq!(
            response.status(),
            reqwest::StatusCode::INTERNAL_SERVER_ERROR
        );
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["status_code"], 500);
        handle.stop().await;
    }

    #[tokio::test]
    async fn test_options_gets_cors_headers() {
        let (handle, _client) = start_demo().await;
        let url = format!("{}/draw_line", handle.base_url());
        let response = reqwest::Client::new()
            .request(reqwest::Method::OPTIONS, &url)
            .header("Origin", "http://localhost:3000")
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
        assert!(
            response
                .headers()
                .contains_key("access-control-allow-origin")
        );
        handle.stop().await;
    }

    #[tokio::test]
    async fn test_echo_round_trip() {
        let (handle, client) = start_demo().await;
        let response = client
            .call("/test_echo", Some(json!({"message": "hello"})))
            .await;
        assert_eq!(response["success"], true);
        assert_eq!(response["echo"], "Echo: hello");
        handle.stop().await;
    }

    #[tokio::test]
    async fn test_set_slider_round_trip() {
        let (handle, client) = start_demo().await;
        let response = client
            .call(
                "/set_slider",
                Some(json!({"slider_name": "Count", "new_value": 12.0})),
            )
            .await;
        assert_eq!(response["success"], true);
        assert_eq!(response["new_value"], 12.0);
        handle.stop().await;
    }

    #[tokio::test]
    async fn test_batch_update_over_the_wire() {
        let host = Arc::new(InMemoryHost::new());
        host.add_slider("A", 0.0, 0.0, 10.0, [0.0, 0.0], None);
        let (handle, client) = start_with(host.clone()).await;

        let response = client
            .call("/set_sliders", Some(json!({"updates": {"A": 42.0, "B": 999.0}})))
            .await;
        assert_eq!(response["success"], true);
        assert_eq!(response["failed_updates"], 1);
        assert!(!host.solver_suspended());
        handle.stop().await;
    }

    #[tokio::test]
    async fn test_truss_generation_over_the_wire() {
        let host = Arc::new(InMemoryHost::new());
        let (handle, client) = start_with(host.clone()).await;

        let args = json!({"num_divisions": 4, "truss_type": "Brown"});
        let first = client.call("/generate_truss", Some(args.clone())).await;
        assert_eq!(first["success"], true);
        assert_eq!(first["num_members"], 21);

        let second = client.call("/generate_truss", Some(args)).await;
        assert_eq!(second["num_members"], first["num_members"]);
        assert_eq!(host.object_count(), 21);
        handle.stop().await;
    }

    #[tokio::test]
    async fn test_detached_host_probes_unavailable() {
        let (handle, client) = start_with(Arc::new(DetachedHost::new())).await;

        let status = client.status().await;
        assert_eq!(status["rhino_available"], false);

        let sliders = client.call("/list_sliders", Some(json!({}))).await;
        assert_eq!(sliders["success"], false);
        assert!(sliders["sliders"].as_array().unwrap().is_empty());

        let truss = client.call("/generate_truss", Some(json!({}))).await;
        assert_eq!(truss["success"], false);
        assert!(truss["truss_members"].as_array().unwrap().is_empty());
        handle.stop().await;
    }
}
