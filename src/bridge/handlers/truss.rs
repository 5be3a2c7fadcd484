//! Truss generation handler.
//!
//! Computes the member set with [`crate::truss::generate`] and inserts each
//! member into the host document tagged `object_type=truss_member`, so a
//! later generation can find-and-delete exactly its own output.

use serde::Deserialize;
use serde_json::{Value, json};

use crate::bridge::registry::{HandlerDescriptor, HandlerRegistry, HandlerResult};
use crate::host::{HostAdapter, probe};
use crate::truss::{self, Point3, TrussTopology};

/// User-text tag identifying generated members.
const OBJECT_TYPE_TAG: &str = "object_type";
const TRUSS_MEMBER_TAG: &str = "truss_member";
const MEMBER_TYPE_TAG: &str = "member_type";

pub fn register(registry: &mut HandlerRegistry) {
    registry.register(HandlerDescriptor::new(
        "/generate_truss",
        "Generate a parametric roof truss from an upper chord line",
        handle_generate_truss,
    ));
}

#[derive(Debug, Deserialize)]
struct GenerateTrussRequest {
    #[serde(default)]
    upper_line_start_x: f64,
    #[serde(default)]
    upper_line_start_y: f64,
    #[serde(default)]
    upper_line_start_z: f64,
    #[serde(default = "default_end_x")]
    upper_line_end_x: f64,
    #[serde(default)]
    upper_line_end_y: f64,
    #[serde(default)]
    upper_line_end_z: f64,
    #[serde(default = "default_depth")]
    truss_depth: f64,
    #[serde(default = "default_divisions")]
    num_divisions: i64,
    #[serde(default = "default_topology")]
    truss_type: String,
    #[serde(default = "default_clear")]
    clear_previous: bool,
}

fn default_end_x() -> f64 {
    10.0
}
fn default_depth() -> f64 {
    2.0
}
fn default_divisions() -> i64 {
    4
}
fn default_topology() -> String {
    "Pratt".to_string()
}
fn default_clear() -> bool {
    true
}

fn handle_generate_truss(host: &dyn HostAdapter, body: Value) -> HandlerResult {
    let request: GenerateTrussRequest = serde_json::from_value(body)?;

    if let Err(unavailable) = probe::modeling(host, json!({"truss_members": []})) {
        return Ok(unavailable);
    }

    if request.num_divisions < 1 {
        return Ok(json!({
            "success": false,
            "error": "num_divisions must be at least 1",
            "truss_members": [],
        }));
    }

    let cleared = if request.clear_previous {
        host.delete_where_tag(OBJECT_TYPE_TAG, TRUSS_MEMBER_TAG)?
    } else {
        0
    };

    let upper_start = Point3::new(
        request.upper_line_start_x,
        request.upper_line_start_y,
        request.upper_line_start_z,
    );
    let upper_end = Point3::new(
        request.upper_line_end_x,
        request.upper_line_end_y,
        request.upper_line_end_z,
    );
    let topology = TrussTopology::parse_or_default(&request.truss_type);
    let members = truss::generate(
        upper_start,
        upper_end,
        request.truss_depth,
        request.num_divisions as u32,
        topology,
    );

    let mut emitted = Vec::with_capacity(members.len());
    for member in &members {
        let id = host.add_line(
            member.start,
            member.end,
            &[
                (OBJECT_TYPE_TAG, TRUSS_MEMBER_TAG),
                (MEMBER_TYPE_TAG, member.member_type.tag()),
            ],
        )?;
        emitted.push(json!({
            "id": id.to_string(),
            "type": member.member_type.tag(),
            "start": member.start.to_array(),
            "end": member.end.to_array(),
        }));
    }

    let num_members = emitted.len();
    Ok(json!({
        "success": true,
        "truss_members": emitted,
        "num_members": num_members,
        "cleared": cleared,
        "truss_depth": request.truss_depth,
        "num_divisions": request.num_divisions,
        "truss_type": topology.name(),
        "message": format!("{topology} truss created successfully with {num_members} members"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{DetachedHost, InMemoryHost};

    fn member_count(response: &Value, member_type: &str) -> usize {
        response["truss_members"]
            .as_array()
            .unwrap()
            .iter()
            .filter(|m| m["type"] == member_type)
            .count()
    }

    #[test]
    fn test_vierendeel_member_counts() {
        let host = InMemoryHost::new();
        let response = handle_generate_truss(
            &host,
            json!({"num_divisions": 4, "truss_type": "Vierendeel"}),
        )
        .unwrap();
        assert_eq!(response["success"], true);
        assert_eq!(member_count(&response, "vertical"), 5);
        assert_eq!(member_count(&response, "diagonal"), 0);
        assert_eq!(member_count(&response, "top_chord"), 4);
        assert_eq!(member_count(&response, "bottom_chord"), 4);
        // Every member landed in the document, tagged for later clearing.
        assert_eq!(host.tagged_lines(OBJECT_TYPE_TAG, TRUSS_MEMBER_TAG).len(), 13);
    }

    #[test]
    fn test_pratt_and_brown_member_counts() {
        let host = InMemoryHost::new();
        let pratt = handle_generate_truss(
            &host,
            json!({"num_divisions": 4, "truss_type": "Pratt"}),
        )
        .unwrap();
        assert_eq!(member_count(&pratt, "vertical"), 5);
        assert_eq!(member_count(&pratt, "diagonal"), 4);

        let brown = handle_generate_truss(
            &host,
            json!({"num_divisions": 4, "truss_type": "Brown"}),
        )
        .unwrap();
        assert_eq!(member_count(&brown, "vertical"), 5);
        assert_eq!(member_count(&brown, "diagonal"), 8);
    }

    #[test]
    fn test_regeneration_with_clear_is_idempotent() {
        let host = InMemoryHost::new();
        let args = json!({"num_divisions": 3, "truss_type": "Howe", "clear_previous": true});

        let first = handle_generate_truss(&host, args.clone()).unwrap();
        let after_first = host.object_count();
        let second = handle_generate_truss(&host, args).unwrap();

        assert_eq!(first["num_members"], second["num_members"]);
        assert_eq!(host.object_count(), after_first);
        assert_eq!(second["cleared"], first["num_members"]);
    }

    #[test]
    fn test_clear_spares_unrelated_objects() {
        let host = InMemoryHost::new();
        host.add_line(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 1.0),
            &[],
        )
        .unwrap();

        handle_generate_truss(&host, json!({"clear_previous": true})).unwrap();
        handle_generate_truss(&host, json!({"clear_previous": true})).unwrap();

        // The hand-drawn line survives both clears.
        let removed = host.delete_where_tag(OBJECT_TYPE_TAG, TRUSS_MEMBER_TAG).unwrap();
        assert!(removed > 0);
        assert_eq!(host.object_count(), 1);
    }

    #[test]
    fn test_unknown_topology_falls_back_to_pratt() {
        let host = InMemoryHost::new();
        let response =
            handle_generate_truss(&host, json!({"truss_type": "Zigzag", "num_divisions": 4}))
                .unwrap();
        assert_eq!(response["success"], true);
        assert_eq!(response["truss_type"], "Pratt");
        assert_eq!(member_count(&response, "diagonal"), 4);
    }

    #[test]
    fn test_zero_divisions_is_a_logical_error() {
        let host = InMemoryHost::new();
        let response = handle_generate_truss(&host, json!({"num_divisions": 0})).unwrap();
        assert_eq!(response["success"], false);
        assert!(response["truss_members"].as_array().unwrap().is_empty());
        assert_eq!(host.object_count(), 0);
    }

    #[test]
    fn test_unavailable_host_short_circuits() {
        let host = DetachedHost::new();
        let response = handle_generate_truss(&host, json!({})).unwrap();
        assert_eq!(response["success"], false);
        assert!(response["truss_members"].as_array().unwrap().is_empty());
    }
}
