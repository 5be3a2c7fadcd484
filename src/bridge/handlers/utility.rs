//! Diagnostic handlers.
//!
//! `/test_echo` needs no host capability at all - it exists to verify that
//! discovery, dispatch and the wire contract work end to end before any
//! real tool is tried.

use serde_json::{Value, json};

use crate::bridge::registry::{HandlerDescriptor, HandlerRegistry, HandlerResult};
use crate::host::HostAdapter;

pub fn register(registry: &mut HandlerRegistry) {
    registry.register(HandlerDescriptor::new(
        "/test_echo",
        "Echo a message back through the bridge",
        handle_test_echo,
    ));
}

fn handle_test_echo(_host: &dyn HostAdapter, body: Value) -> HandlerResult {
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("No message provided")
        .to_string();

    Ok(json!({
        "success": true,
        "original_message": message,
        "echo": format!("Echo: {message}"),
        "message": "Bridge dispatch is working correctly",
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::DetachedHost;

    #[test]
    fn test_echo_works_without_any_host() {
        let host = DetachedHost::new();
        let response = handle_test_echo(&host, json!({"message": "ping"})).unwrap();
        assert_eq!(response["success"], true);
        assert_eq!(response["echo"], "Echo: ping");
    }

    #[test]
    fn test_echo_with_empty_body() {
        let host = DetachedHost::new();
        let response = handle_test_echo(&host, json!({})).unwrap();
        assert_eq!(response["original_message"], "No message provided");
    }
}
