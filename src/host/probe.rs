//! Capability probe.
//!
//! Every handler that reads or mutates host state runs this two-step check
//! at call time: (1) is the subsystem loaded, (2) does an active document
//! exist. The host environment can change between any two calls - a plugin
//! may load later, the document may be closed - so there is no session state
//! to rely on and nothing here is cached.

use serde_json::{Value, json};

use super::HostAdapter;

/// Probe the modeling (Rhino) subsystem.
///
/// On failure returns the ready-to-send logical-error envelope:
/// `{success:false, error}` merged with the operation's empty defaults
/// (so a caller that expects `"truss_members"` still finds an empty list).
pub fn modeling(host: &dyn HostAdapter, defaults: Value) -> Result<(), Value> {
    probe(host.capabilities().rhino, "Rhino", host, defaults)
}

/// Probe the parametric (Grasshopper) subsystem.
pub fn parametric(host: &dyn HostAdapter, defaults: Value) -> Result<(), Value> {
    probe(host.capabilities().grasshopper, "Grasshopper", host, defaults)
}

fn probe(
    loaded: bool,
    subsystem: &str,
    host: &dyn HostAdapter,
    defaults: Value,
) -> Result<(), Value> {
    if !loaded {
        return Err(failure(
            format!("{subsystem} is not available"),
            defaults,
        ));
    }
    if !host.has_active_document() {
        return Err(failure("no active document found".to_string(), defaults));
    }
    Ok(())
}

fn failure(error: String, defaults: Value) -> Value {
    let mut envelope = json!({
        "success": false,
        "error": error,
    });
    if let (Some(envelope_map), Value::Object(default_map)) = (envelope.as_object_mut(), defaults)
    {
        for (key, value) in default_map {
            envelope_map.entry(key).or_insert(value);
        }
    }
    envelope
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{DetachedHost, InMemoryHost};

    #[test]
    fn test_detached_host_fails_probe_with_defaults() {
        let host = DetachedHost::new();
        let err = parametric(&host, json!({"sliders": []})).unwrap_err();
        assert_eq!(err["success"], false);
        assert_eq!(err["error"], "Grasshopper is not available");
        assert!(err["sliders"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_live_host_passes_both_steps() {
        let host = InMemoryHost::new();
        assert!(modeling(&host, json!({})).is_ok());
        assert!(parametric(&host, json!({})).is_ok());
    }

    #[test]
    fn test_defaults_never_override_the_error() {
        let host = DetachedHost::new();
        let err = modeling(&host, json!({"error": "x", "info": {}})).unwrap_err();
        assert_eq!(err["error"], "Rhino is not available");
        assert!(err["info"].is_object());
    }
}
