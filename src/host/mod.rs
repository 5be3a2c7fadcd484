//! Host adapter layer.
//!
//! The bridge never touches the modeling host directly. Every handler goes
//! through the [`HostAdapter`] capability interface, so the same dispatch
//! code runs against a live session, a detached process with nothing loaded,
//! or the in-memory simulation used by tests.
//!
//! ## Architecture
//!
//! - `HostAdapter` - the narrow read/write contract onto the live session
//! - `memory` - in-memory simulated host with a seeded demo definition
//! - `detached` - adapter reporting every capability as unavailable
//! - `probe` - the two-step availability check handlers run at call time
//! - `context` - optional purpose-inference heuristic for sliders

mod context;
mod detached;
mod memory;
pub mod probe;

pub use context::infer_slider_purpose;
pub use detached::DetachedHost;
pub use memory::InMemoryHost;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::truss::Point3;

// ============================================================================
// Capability Flags
// ============================================================================

/// Which host subsystems are currently loaded.
///
/// Recomputed by the adapter on every call - the host environment can change
/// between two requests (a plugin may load later), so these flags are never
/// cached across calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// The modeling subsystem (document, geometry) is reachable.
    pub rhino: bool,
    /// The parametric subsystem (sliders, components) is reachable.
    pub grasshopper: bool,
}

impl Capabilities {
    pub const NONE: Capabilities = Capabilities {
        rhino: false,
        grasshopper: false,
    };

    pub const ALL: Capabilities = Capabilities {
        rhino: true,
        grasshopper: true,
    };
}

// ============================================================================
// Snapshot Records
// ============================================================================
//
// Read-only projections of live host objects. Validity is limited to the
// single response that carries them; only the name correlates two queries.

/// Identifier of an object inside the host document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub String);

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A number slider component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderRecord {
    pub name: String,
    pub current_value: f64,
    pub min: f64,
    pub max: f64,
    /// Canvas position, when the host exposes one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<[f64; 2]>,
    /// Group the component belongs to, when any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

/// A text annotation panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelRecord {
    pub name: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<[f64; 2]>,
}

/// A value-list (dropdown) component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueListRecord {
    pub name: String,
    pub items: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<String>,
}

/// Any other component, reported by name and category only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericComponentRecord {
    pub name: String,
    pub category: String,
}

/// Unified component snapshot with an explicit variant per component class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComponentRecord {
    Slider(SliderRecord),
    Panel(PanelRecord),
    ValueList(ValueListRecord),
    Generic(GenericComponentRecord),
}

impl ComponentRecord {
    pub fn name(&self) -> &str {
        match self {
            Self::Slider(s) => &s.name,
            Self::Panel(p) => &p.name,
            Self::ValueList(v) => &v.name,
            Self::Generic(g) => &g.name,
        }
    }
}

/// Result of applying a value to a slider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderUpdate {
    pub name: String,
    pub old_value: f64,
    /// The value actually applied, after clamping to the slider's bounds.
    pub new_value: f64,
    /// True when the requested value fell outside the bounds.
    pub clamped: bool,
    pub min: f64,
    pub max: f64,
}

/// Snapshot of the modeling document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub units: String,
    pub object_count: usize,
    pub solver_suspended: bool,
}

// ============================================================================
// Errors
// ============================================================================

/// Errors raised by adapter operations.
///
/// `SliderNotFound` carries the valid names so the caller can self-correct;
/// handlers turn it into an in-band logical failure. Everything else is a
/// host fault that the dispatch boundary converts to HTTP 500.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("Slider '{name}' not found")]
    SliderNotFound { name: String, available: Vec<String> },

    #[error("{subsystem} is not available")]
    Unavailable { subsystem: &'static str },

    #[error("no active document found")]
    NoActiveDocument,

    #[error("host document error: {0}")]
    Document(String),
}

// ============================================================================
// Adapter Contract
// ============================================================================

/// The capability interface onto a live modeling session.
///
/// Methods take `&self`: the bridge serializes handler execution with a
/// single lock, and implementations own whatever interior state they need.
/// Every operation is a single synchronous call - there is no session to
/// hold open between requests.
pub trait HostAdapter: Send + Sync {
    /// Current subsystem availability. Must re-probe on every call.
    fn capabilities(&self) -> Capabilities;

    /// Whether an active document/canvas exists right now.
    fn has_active_document(&self) -> bool;

    fn document_info(&self) -> Result<DocumentInfo, HostError>;

    /// Add a line object, writing the given user-text tags onto it.
    fn add_line(
        &self,
        start: Point3,
        end: Point3,
        tags: &[(&str, &str)],
    ) -> Result<ObjectId, HostError>;

    /// Delete every object whose user text carries `key = value`.
    /// Returns the number of objects removed. Unrelated objects are never
    /// touched.
    fn delete_where_tag(&self, key: &str, value: &str) -> Result<usize, HostError>;

    fn sliders(&self) -> Result<Vec<SliderRecord>, HostError>;

    /// Apply a value to the named slider, clamping to its bounds.
    fn set_slider(&self, name: &str, value: f64) -> Result<SliderUpdate, HostError>;

    fn panels(&self) -> Result<Vec<PanelRecord>, HostError>;

    fn components(&self) -> Result<Vec<ComponentRecord>, HostError>;

    /// Suspend the parametric recompute cycle for a batch mutation.
    fn suspend_solver(&self) -> Result<(), HostError>;

    /// Resume the recompute cycle. Must be safe to call even when the
    /// solver was never suspended.
    fn resume_solver(&self) -> Result<(), HostError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_record_tagged_serialization() {
        let record = ComponentRecord::Slider(SliderRecord {
            name: "Width".into(),
            current_value: 10.0,
            min: 0.0,
            max: 100.0,
            position: None,
            group: None,
        });
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["kind"], "slider");
        assert_eq!(value["name"], "Width");
        // Absent optionals stay off the wire.
        assert!(value.get("position").is_none());
    }

    #[test]
    fn test_slider_not_found_names_alternatives() {
        let err = HostError::SliderNotFound {
            name: "Widht".into(),
            available: vec!["Width".into(), "Height".into()],
        };
        assert_eq!(err.to_string(), "Slider 'Widht' not found");
    }
}
