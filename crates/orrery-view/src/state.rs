//! View modes and the per-frame snapshot handed to the host

use glam::{DQuat, DVec3};
use orrery_scene::{CameraUniform, EntityId, EntityKind, Geometry, SurfaceUniforms};
use serde::{Deserialize, Serialize};

/// Exactly one is active at a time
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "kebab-case")]
pub enum ViewState {
    #[default]
    SolarOverview,
    /// Flying toward a selected system; overview entities are still live
    SystemOverview { system: String },
    StarDetail {
        system: String,
        focus: Option<EntityId>,
    },
}

impl ViewState {
    pub fn is_overview(&self) -> bool {
        matches!(self, Self::SolarOverview | Self::SystemOverview { .. })
    }

    pub fn system(&self) -> Option<&str> {
        match self {
            Self::SolarOverview => None,
            Self::SystemOverview { system } | Self::StarDetail { system, .. } => {
                Some(system.as_str())
            }
        }
    }
}

/// State for UI chrome
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UiSnapshot {
    pub view: ViewState,
    pub hovered: Option<EntityId>,
    pub focused: Option<EntityId>,
    /// Catalog empty or unreadable
    pub no_data: bool,
    pub animating: bool,
    /// Simulated days since J2000 in the overview clock
    pub sim_days: f64,
}

/// Resolved, owned copy of one entity for the renderer
#[derive(Clone, Debug, PartialEq)]
pub struct RenderItem {
    pub id: EntityId,
    pub kind: EntityKind,
    pub position: DVec3,
    pub rotation: Option<DQuat>,
    pub geometry: Geometry,
    pub texture: Option<String>,
    pub uniforms: SurfaceUniforms,
}

#[derive(Clone, Debug)]
pub struct FrameSnapshot {
    pub camera: CameraUniform,
    pub items: Vec<RenderItem>,
    pub ui: UiSnapshot,
}

impl FrameSnapshot {
    pub fn item(&self, id: &EntityId) -> Option<&RenderItem> {
        self.items.iter().find(|item| &item.id == id)
    }
}
