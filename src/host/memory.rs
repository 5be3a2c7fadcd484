//! In-memory simulated host.
//!
//! Stands in for a live Rhino/Grasshopper session: a document of tagged
//! line objects plus a parametric definition of sliders, panels and a value
//! list. Used by the test suite and by `rhino-bridge` in simulation mode.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::truss::Point3;

use super::{
    Capabilities, ComponentRecord, DocumentInfo, GenericComponentRecord, HostAdapter, HostError,
    ObjectId, PanelRecord, SliderRecord, SliderUpdate, ValueListRecord,
};

struct SimObject {
    start: Point3,
    end: Point3,
    user_text: HashMap<String, String>,
}

struct SimSlider {
    name: String,
    value: f64,
    min: f64,
    max: f64,
    position: [f64; 2],
    group: Option<String>,
}

struct SimState {
    objects: Vec<SimObject>,
    sliders: Vec<SimSlider>,
    panels: Vec<PanelRecord>,
    value_lists: Vec<ValueListRecord>,
    generics: Vec<GenericComponentRecord>,
    solver_suspended: bool,
    next_id: u64,
}

/// Simulated host holding its whole document in memory.
pub struct InMemoryHost {
    state: Mutex<SimState>,
}

impl InMemoryHost {
    /// An empty document with both subsystems available.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SimState {
                objects: Vec::new(),
                sliders: Vec::new(),
                panels: Vec::new(),
                value_lists: Vec::new(),
                generics: Vec::new(),
                solver_suspended: false,
                next_id: 1,
            }),
        }
    }

    /// A document seeded with a small parametric definition: the classic
    /// Width/Height/Count sliders, labelling panels, and a materials list.
    pub fn with_demo_definition() -> Self {
        let host = Self::new();
        host.add_slider("Width", 10.0, 0.0, 100.0, [120.0, 40.0], None);
        host.add_slider("Height", 20.0, 0.0, 50.0, [120.0, 80.0], None);
        host.add_slider("Count", 5.0, 1.0, 20.0, [120.0, 120.0], Some("array"));
        {
            let mut state = host.lock();
            state.panels.push(PanelRecord {
                name: "Panel".into(),
                text: "beam width (m)".into(),
                position: Some([40.0, 40.0]),
            });
            state.panels.push(PanelRecord {
                name: "Notes".into(),
                text: "overall roof height".into(),
                position: Some([40.0, 80.0]),
            });
            state.value_lists.push(ValueListRecord {
                name: "Material".into(),
                items: vec!["steel".into(), "timber".into(), "aluminium".into()],
                selected: Some("steel".into()),
            });
            state.generics.push(GenericComponentRecord {
                name: "Loft".into(),
                category: "Surface".into(),
            });
        }
        host
    }

    /// Add a slider to the definition (test/simulation setup).
    pub fn add_slider(
        &self,
        name: &str,
        value: f64,
        min: f64,
        max: f64,
        position: [f64; 2],
        group: Option<&str>,
    ) {
        let mut state = self.lock();
        state.sliders.push(SimSlider {
            name: name.to_string(),
            value,
            min,
            max,
            position,
            group: group.map(str::to_string),
        });
    }

    /// Number of objects currently in the document (test observability).
    pub fn object_count(&self) -> usize {
        self.lock().objects.len()
    }

    /// Endpoints of every line whose user text carries `key = value`
    /// (test observability).
    pub fn tagged_lines(&self, key: &str, value: &str) -> Vec<(Point3, Point3)> {
        self.lock()
            .objects
            .iter()
            .filter(|o| o.user_text.get(key).map(String::as_str) == Some(value))
            .map(|o| (o.start, o.end))
            .collect()
    }

    /// Whether the solver is currently suspended (test observability).
    pub fn solver_suspended(&self) -> bool {
        self.lock().solver_suspended
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SimState> {
        // A poisoned lock means a panic mid-mutation; the simulated document
        // is still structurally sound, so keep serving.
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Default for InMemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostAdapter for InMemoryHost {
    fn capabilities(&self) -> Capabilities {
        Capabilities::ALL
    }

    fn has_active_document(&self) -> bool {
        true
    }

    fn document_info(&self) -> Result<DocumentInfo, HostError> {
        let state = self.lock();
        Ok(DocumentInfo {
            units: "millimeters".into(),
            object_count: state.objects.len(),
            solver_suspended: state.solver_suspended,
        })
    }

    fn add_line(
        &self,
        start: Point3,
        end: Point3,
        tags: &[(&str, &str)],
    ) -> Result<ObjectId, HostError> {
        let mut state = self.lock();
        let id = state.next_id;
        state.next_id += 1;
        state.objects.push(SimObject {
            start,
            end,
            user_text: tags
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        });
        Ok(ObjectId(format!("obj-{id}")))
    }

    fn delete_where_tag(&self, key: &str, value: &str) -> Result<usize, HostError> {
        let mut state = self.lock();
        let before = state.objects.len();
        state
            .objects
            .retain(|o| o.user_text.get(key).map(String::as_str) != Some(value));
        Ok(before - state.objects.len())
    }

    fn sliders(&self) -> Result<Vec<SliderRecord>, HostError> {
        let state = self.lock();
        Ok(state
            .sliders
            .iter()
            .map(|s| SliderRecord {
                name: s.name.clone(),
                current_value: s.value,
                min: s.min,
                max: s.max,
                position: Some(s.position),
                group: s.group.clone(),
            })
            .collect())
    }

    fn set_slider(&self, name: &str, value: f64) -> Result<SliderUpdate, HostError> {
        let mut state = self.lock();
        let available: Vec<String> = state.sliders.iter().map(|s| s.name.clone()).collect();
        let Some(slider) = state.sliders.iter_mut().find(|s| s.name == name) else {
            return Err(HostError::SliderNotFound {
                name: name.to_string(),
                available,
            });
        };
        let clamped_value = value.clamp(slider.min, slider.max);
        let old_value = slider.value;
        slider.value = clamped_value;
        Ok(SliderUpdate {
            name: slider.name.clone(),
            old_value,
            new_value: clamped_value,
            clamped: clamped_value != value,
            min: slider.min,
            max: slider.max,
        })
    }

    fn panels(&self) -> Result<Vec<PanelRecord>, HostError> {
        Ok(self.lock().panels.clone())
    }

    fn components(&self) -> Result<Vec<ComponentRecord>, HostError> {
        let sliders = self.sliders()?;
        let state = self.lock();
        let mut components: Vec<ComponentRecord> =
            sliders.into_iter().map(ComponentRecord::Slider).collect();
        components.extend(state.panels.iter().cloned().map(ComponentRecord::Panel));
        components.extend(
            state
                .value_lists
                .iter()
                .cloned()
                .map(ComponentRecord::ValueList),
        );
        components.extend(state.generics.iter().cloned().map(ComponentRecord::Generic));
        Ok(components)
    }

    fn suspend_solver(&self) -> Result<(), HostError> {
        self.lock().solver_suspended = true;
        Ok(())
    }

    fn resume_solver(&self) -> Result<(), HostError> {
        self.lock().solver_suspended = false;
        Ok(())
    }
}
