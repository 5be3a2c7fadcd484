//! Adapter for a bridge running without an attached host process.

use crate::truss::Point3;

use super::{
    Capabilities, ComponentRecord, DocumentInfo, HostAdapter, HostError, ObjectId, PanelRecord,
    SliderRecord, SliderUpdate,
};

/// Every capability reports unavailable; every operation that needs one
/// fails. The capability probe short-circuits before these methods are
/// reached in normal dispatch, so the errors here are a second line of
/// defense.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedHost;

impl DetachedHost {
    pub fn new() -> Self {
        Self
    }
}

impl HostAdapter for DetachedHost {
    fn capabilities(&self) -> Capabilities {
        Capabilities::NONE
    }

    fn has_active_document(&self) -> bool {
        false
    }

    fn document_info(&self) -> Result<DocumentInfo, HostError> {
        Err(HostError::Unavailable { subsystem: "Rhino" })
    }

    fn add_line(
        &self,
        _start: Point3,
        _end: Point3,
        _tags: &[(&str, &str)],
    ) -> Result<ObjectId, HostError> {
        Err(HostError::Unavailable { subsystem: "Rhino" })
    }

    fn delete_where_tag(&self, _key: &str, _value: &str) -> Result<usize, HostError> {
        Err(HostError::Unavailable { subsystem: "Rhino" })
    }

    fn sliders(&self) -> Result<Vec<SliderRecord>, HostError> {
        Err(HostError::Unavailable {
            subsystem: "Grasshopper",
        })
    }

    fn set_slider(&self, _name: &str, _value: f64) -> Result<SliderUpdate, HostError> {
        Err(HostError::Unavailable {
            subsystem: "Grasshopper",
        })
    }

    fn panels(&self) -> Result<Vec<PanelRecord>, HostError> {
        Err(HostError::Unavailable {
            subsystem: "Grasshopper",
        })
    }

    fn components(&self) -> Result<Vec<ComponentRecord>, HostError> {
        Err(HostError::Unavailable {
            subsystem: "Grasshopper",
        })
    }

    fn suspend_solver(&self) -> Result<(), HostError> {
        Err(HostError::Unavailable {
            subsystem: "Grasshopper",
        })
    }

    fn resume_solver(&self) -> Result<(), HostError> {
        Err(HostError::Unavailable {
            subsystem: "Grasshopper",
        })
    }
}
