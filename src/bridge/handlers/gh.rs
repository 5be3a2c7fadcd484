//! Parametric-definition handlers: slider queries and mutations,
//! component inventory.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Value, json};
use tracing::warn;

use crate::bridge::registry::{HandlerDescriptor, HandlerRegistry, HandlerResult};
use crate::host::{HostAdapter, HostError, infer_slider_purpose, probe};

pub fn register(registry: &mut HandlerRegistry) {
    registry.register(HandlerDescriptor::new(
        "/list_sliders",
        "List slider components in the active definition",
        handle_list_sliders,
    ));
    registry.register(HandlerDescriptor::new(
        "/set_slider",
        "Set a slider value by name",
        handle_set_slider,
    ));
    registry.register(HandlerDescriptor::new(
        "/set_sliders",
        "Apply a batch of slider values in one recompute",
        handle_set_sliders,
    ));
    registry.register(HandlerDescriptor::new(
        "/list_components",
        "List components in the active definition by kind",
        handle_list_components,
    ));
}

// ============================================================================
// Solver pause guard
// ============================================================================

/// Suspends the recompute cycle for the lifetime of the guard. Resume runs
/// on drop, so a failing item in the middle of a batch can never leave the
/// solver suspended.
struct SolverPause<'a> {
    host: &'a dyn HostAdapter,
}

impl<'a> SolverPause<'a> {
    fn engage(host: &'a dyn HostAdapter) -> Result<Self, HostError> {
        host.suspend_solver()?;
        Ok(Self { host })
    }
}

impl Drop for SolverPause<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.host.resume_solver() {
            warn!("Failed to resume solver after batch update: {e}");
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

fn handle_list_sliders(host: &dyn HostAdapter, _body: Value) -> HandlerResult {
    if let Err(unavailable) = probe::parametric(host, json!({"sliders": []})) {
        return Ok(unavailable);
    }

    let sliders = host.sliders()?;
    // The purpose heuristic is presentation sugar; a panel read failure
    // only costs the hints.
    let panels = host.panels().unwrap_or_default();

    let mut entries = Vec::with_capacity(sliders.len());
    for slider in &sliders {
        let mut entry = serde_json::to_value(slider)?;
        if let Some(purpose) = infer_slider_purpose(slider, &panels) {
            entry["inferred_purpose"] = purpose.into();
        }
        entries.push(entry);
    }

    let count = entries.len();
    Ok(json!({
        "success": true,
        "sliders": entries,
        "count": count,
        "message": format!("Found {count} slider components"),
    }))
}

#[derive(Debug, Deserialize)]
struct SetSliderRequest {
    slider_name: String,
    new_value: f64,
}

fn handle_set_slider(host: &dyn HostAdapter, body: Value) -> HandlerResult {
    let request: SetSliderRequest = serde_json::from_value(body)?;

    let defaults = json!({
        "slider_name": request.slider_name.clone(),
        "new_value": request.new_value,
    });
    if let Err(unavailable) = probe::parametric(host, defaults) {
        return Ok(unavailable);
    }

    match host.set_slider(&request.slider_name, request.new_value) {
        Ok(update) => Ok(json!({
            "success": true,
            "slider_name": update.name,
            "old_value": update.old_value,
            "new_value": update.new_value,
            "clamped": update.clamped,
            "message": format!(
                "Slider '{}' updated to {}",
                update.name, update.new_value
            ),
        })),
        Err(HostError::SliderNotFound { name, available }) => Ok(json!({
            "success": false,
            "error": format!("Slider '{name}' not found"),
            "slider_name": name,
            "available_sliders": available,
        })),
        Err(other) => Err(other.into()),
    }
}

#[derive(Debug, Deserialize)]
struct SetSlidersRequest {
    /// Slider name → requested value. Reported back in name order.
    updates: BTreeMap<String, f64>,
}

/// Batch update. The batch as a whole succeeds even when individual items
/// fail - per-item outcomes and `failed_updates` carry the detail. The
/// recompute cycle is suspended once for the whole batch and resumed
/// exactly once at the end.
fn handle_set_sliders(host: &dyn HostAdapter, body: Value) -> HandlerResult {
    let request: SetSlidersRequest = serde_json::from_value(body)?;

    if let Err(unavailable) = probe::parametric(host, json!({"updates": []})) {
        return Ok(unavailable);
    }

    let pause = SolverPause::engage(host)?;

    let mut items = Vec::with_capacity(request.updates.len());
    let mut updated = 0usize;
    let mut failed_updates = 0usize;

    for (name, value) in &request.updates {
        match host.set_slider(name, *value) {
            Ok(update) => {
                updated += 1;
                items.push(json!({
                    "name": update.name,
                    "success": true,
                    "old_value": update.old_value,
                    "new_value": update.new_value,
                    "clamped": update.clamped,
                }));
            }
            Err(HostError::SliderNotFound { name, available }) => {
                failed_updates += 1;
                items.push(json!({
                    "name": name,
                    "success": false,
                    "error": format!("Slider '{name}' not found"),
                    "available_sliders": available,
                }));
            }
            Err(other) => return Err(other.into()),
        }
    }

    drop(pause);

    Ok(json!({
        "success": true,
        "updates": items,
        "updated": updated,
        "failed_updates": failed_updates,
        "message": format!("Applied {updated} slider updates, {failed_updates} failed"),
    }))
}

fn handle_list_components(host: &dyn HostAdapter, _body: Value) -> HandlerResult {
    if let Err(unavailable) = probe::parametric(host, json!({"components": []})) {
        return Ok(unavailable);
    }

    let components = host.components()?;
    let count = components.len();
    Ok(json!({
        "success": true,
        "components": serde_json::to_value(&components)?,
        "count": count,
        "message": format!("Found {count} components"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{DetachedHost, InMemoryHost};

    #[test]
    fn test_list_sliders_includes_purpose_hints() {
        let host = InMemoryHost::with_demo_definition();
        let response = handle_list_sliders(&host, json!({})).unwrap();
        assert_eq!(response["success"], true);
        assert_eq!(response["count"], 3);
        let sliders = response["sliders"].as_array().unwrap();
        let width = sliders.iter().find(|s| s["name"] == "Width").unwrap();
        assert_eq!(width["inferred_purpose"], "controls a width dimension");
    }

    #[test]
    fn test_list_sliders_unavailable_returns_empty_default() {
        let host = DetachedHost::new();
        let response = handle_list_sliders(&host, json!({})).unwrap();
        assert_eq!(response["success"], false);
        assert_eq!(response["error"], "Grasshopper is not available");
        assert!(response["sliders"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_set_slider_not_found_lists_alternatives() {
        let host = InMemoryHost::with_demo_definition();
        let response = handle_set_slider(
            &host,
            json!({"slider_name": "Ghost", "new_value": 1.0}),
        )
        .unwrap();
        assert_eq!(response["success"], false);
        let available = response["available_sliders"].as_array().unwrap();
        assert_eq!(available.len(), 3);
    }

    #[test]
    fn test_set_slider_clamps_and_says_so() {
        let host = InMemoryHost::with_demo_definition();
        let response = handle_set_slider(
            &host,
            json!({"slider_name": "Height", "new_value": 500.0}),
        )
        .unwrap();
        assert_eq!(response["success"], true);
        assert_eq!(response["new_value"], 50.0);
        assert_eq!(response["clamped"], true);
    }

    #[test]
    fn test_batch_partial_failure_keeps_batch_success() {
        let host = InMemoryHost::new();
        host.add_slider("A", 0.0, 0.0, 10.0, [0.0, 0.0], None);

        let response = handle_set_sliders(
            &host,
            json!({"updates": {"A": 42.0, "B": 999.0}}),
        )
        .unwrap();

        assert_eq!(response["success"], true);
        assert_eq!(response["updated"], 1);
        assert_eq!(response["failed_updates"], 1);

        let items = response["updates"].as_array().unwrap();
        let a = items.iter().find(|i| i["name"] == "A").unwrap();
        assert_eq!(a["success"], true);
        assert_eq!(a["new_value"], 10.0);
        assert_eq!(a["clamped"], true);
        let b = items.iter().find(|i| i["name"] == "B").unwrap();
        assert_eq!(b["success"], false);
    }

    #[test]
    fn test_batch_always_resumes_solver() {
        let host = InMemoryHost::new();
        host.add_slider("A", 0.0, 0.0, 10.0, [0.0, 0.0], None);
        handle_set_sliders(&host, json!({"updates": {"A": 3.0, "Missing": 1.0}})).unwrap();
        assert!(!host.solver_suspended());
    }

    #[test]
    fn test_list_components_round_trip() {
        let host = InMemoryHost::with_demo_definition();
        let response = handle_list_components(&host, json!({})).unwrap();
        assert_eq!(response["success"], true);
        let components = response["components"].as_array().unwrap();
        assert!(components.iter().any(|c| c["kind"] == "value_list"));
    }
}
