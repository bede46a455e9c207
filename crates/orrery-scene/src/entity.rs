//! Scene entities: identity, geometry, picking volume and appearance

use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable entity identity (catalog name plus a kind prefix where needed)
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityKind {
    Star,
    Planet,
    OrbitCurve,
    SystemMarker,
    HabitableZoneBand,
}

impl EntityKind {
    /// Stars and planets: bodies with a surface
    pub fn is_body(&self) -> bool {
        matches!(self, Self::Star | Self::Planet)
    }
}

/// World transform of an unanchored entity
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: DVec3,
    pub rotation: Option<DQuat>,
}

impl Transform {
    pub fn at(position: DVec3) -> Self {
        Self { position, rotation: None }
    }
}

/// Placement relative to another entity, resolved to world space on read
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub parent: EntityId,
    pub offset: DVec3,
}

/// Visible shape, in the entity's local frame
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Geometry {
    Sphere { radius: f64 },
    Polyline { points: Vec<DVec3> },
    Annulus { inner: f64, outer: f64 },
    Point,
}

/// Region tested by the picker, distinct from the visible geometry
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PickVolume {
    /// Not pickable
    None,
    /// The visible sphere only
    Surface,
    /// Inflated sphere around a small body
    Enlarged { radius: f64 },
    /// Polyline geometry within a screen-space tolerance
    Curve { tolerance_px: f64 },
    /// Overview system marker
    Marker { radius: f64 },
}

/// Per-entity shader inputs
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SurfaceUniforms {
    pub color: [f32; 3],
    pub glow: f32,
    /// Seconds of shader time
    pub time: f32,
    /// Spin angle about the body axis (radians)
    pub spin: f32,
    /// 1.0 while hovered, 0.0 otherwise
    pub highlight: f32,
    pub _pad0: f32,
}

/// Opaque appearance handle, passed through to the renderer
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Appearance {
    /// Optional texture; the renderer falls back to the flat color when it
    /// is missing or still loading
    pub texture: Option<String>,
    pub uniforms: SurfaceUniforms,
}

impl Appearance {
    pub fn flat(color: [f32; 3]) -> Self {
        Self {
            texture: None,
            uniforms: SurfaceUniforms { color, ..Default::default() },
        }
    }

    pub fn with_texture(mut self, key: impl Into<String>) -> Self {
        self.texture = Some(key.into());
        self
    }

    pub fn with_glow(mut self, glow: f32) -> Self {
        self.uniforms.glow = glow;
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneEntity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub transform: Transform,
    pub anchor: Option<Anchor>,
    pub geometry: Geometry,
    pub pick: PickVolume,
    pub appearance: Appearance,
    /// Body this entity belongs to (orbit curves, zone bands)
    pub owner: Option<EntityId>,
}

impl SceneEntity {
    pub fn new(id: impl Into<EntityId>, kind: EntityKind, geometry: Geometry) -> Self {
        Self {
            id: id.into(),
            kind,
            transform: Transform::default(),
            anchor: None,
            geometry,
            pick: PickVolume::None,
            appearance: Appearance::default(),
            owner: None,
        }
    }

    pub fn at(mut self, position: DVec3) -> Self {
        self.transform.position = position;
        self
    }

    pub fn anchored(mut self, parent: EntityId, offset: DVec3) -> Self {
        self.anchor = Some(Anchor { parent, offset });
        self
    }

    pub fn with_pick(mut self, pick: PickVolume) -> Self {
        self.pick = pick;
        self
    }

    pub fn with_appearance(mut self, appearance: Appearance) -> Self {
        self.appearance = appearance;
        self
    }

    pub fn owned_by(mut self, owner: EntityId) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Radius of the visible sphere, if the geometry is one
    pub fn surface_radius(&self) -> Option<f64> {
        match self.geometry {
            Geometry::Sphere { radius } => Some(radius),
            _ => None,
        }
    }
}
