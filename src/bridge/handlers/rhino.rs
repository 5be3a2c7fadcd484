//! Modeling-document handlers: line creation and session info.

use serde::Deserialize;
use serde_json::{Value, json};

use crate::bridge::registry::{HandlerDescriptor, HandlerRegistry, HandlerResult};
use crate::host::{HostAdapter, probe};
use crate::truss::Point3;

pub fn register(registry: &mut HandlerRegistry) {
    registry.register(HandlerDescriptor::new(
        "/draw_line",
        "Draw a line in the modeling document",
        handle_draw_line,
    ));
    registry.register(HandlerDescriptor::new(
        "/get_rhino_info",
        "Report session and document information",
        handle_rhino_info,
    ));
}

#[derive(Debug, Deserialize)]
struct DrawLineRequest {
    #[serde(default)]
    start_x: f64,
    #[serde(default)]
    start_y: f64,
    #[serde(default)]
    start_z: f64,
    #[serde(default)]
    end_x: f64,
    #[serde(default)]
    end_y: f64,
    #[serde(default)]
    end_z: f64,
}

fn handle_draw_line(host: &dyn HostAdapter, body: Value) -> HandlerResult {
    let request: DrawLineRequest = serde_json::from_value(body)?;

    if let Err(unavailable) = probe::modeling(host, json!({"line_id": null})) {
        return Ok(unavailable);
    }

    let start = Point3::new(request.start_x, request.start_y, request.start_z);
    let end = Point3::new(request.end_x, request.end_y, request.end_z);
    let line_id = host.add_line(start, end, &[])?;
    let length = start.distance_to(end);

    Ok(json!({
        "success": true,
        "line_id": line_id.to_string(),
        "start_point": start.to_array(),
        "end_point": end.to_array(),
        "length": length,
        "message": format!("Line created successfully with length {length:.2}"),
    }))
}

fn handle_rhino_info(host: &dyn HostAdapter, _body: Value) -> HandlerResult {
    if let Err(unavailable) = probe::modeling(host, json!({"info": {}})) {
        return Ok(unavailable);
    }

    let capabilities = host.capabilities();
    let info = host.document_info()?;

    Ok(json!({
        "success": true,
        "info": {
            "rhino_available": capabilities.rhino,
            "grasshopper_available": capabilities.grasshopper,
            "document_units": info.units,
            "object_count": info.object_count,
            "solver_suspended": info.solver_suspended,
        },
        "message": "Rhino information retrieved successfully",
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{DetachedHost, InMemoryHost};

    #[test]
    fn test_draw_line_reports_length() {
        let host = InMemoryHost::new();
        let response = handle_draw_line(
            &host,
            json!({"start_x": 0, "start_y": 0, "start_z": 0, "end_x": 3, "end_y": 4, "end_z": 0}),
        )
        .unwrap();
        assert_eq!(response["success"], true);
        assert_eq!(response["length"], 5.0);
        assert_eq!(host.object_count(), 1);
    }

    #[test]
    fn test_draw_line_defaults_missing_coordinates_to_origin() {
        let host = InMemoryHost::new();
        let response = handle_draw_line(&host, json!({"end_x": 1})).unwrap();
        assert_eq!(response["start_point"], json!([0.0, 0.0, 0.0]));
    }

    #[test]
    fn test_draw_line_unavailable_short_circuits() {
        let host = DetachedHost::new();
        let response = handle_draw_line(&host, json!({})).unwrap();
        assert_eq!(response["success"], false);
        assert_eq!(response["error"], "Rhino is not available");
        assert!(response["line_id"].is_null());
    }

    #[test]
    fn test_draw_line_rejects_non_numeric_coordinates() {
        let host = InMemoryHost::new();
        assert!(handle_draw_line(&host, json!({"start_x": "abc"})).is_err());
    }

    #[test]
    fn test_rhino_info_snapshot() {
        let host = InMemoryHost::with_demo_definition();
        let response = handle_rhino_info(&host, json!({})).unwrap();
        assert_eq!(response["success"], true);
        assert_eq!(response["info"]["rhino_available"], true);
        assert_eq!(response["info"]["object_count"], 0);
    }
}
