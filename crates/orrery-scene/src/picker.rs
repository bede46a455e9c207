//! Screen-space picking over the registry
//!
//! Candidates are grouped into tiers tested in priority order. The first tier
//! with any hit wins; inside a tier the hit nearest along the ray wins and
//! exact ties keep registry order.

use crate::camera::{Camera, Ray};
use crate::entity::{EntityId, EntityKind, Geometry, PickVolume, SceneEntity};
use crate::registry::SceneBodyRegistry;
use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PickTier {
    Enlarged,
    Surface,
    Curve,
    Marker,
}

impl PickTier {
    pub const ORDER: [PickTier; 4] = [
        PickTier::Enlarged,
        PickTier::Surface,
        PickTier::Curve,
        PickTier::Marker,
    ];
}

#[derive(Clone, Debug, PartialEq)]
pub struct PickHit {
    pub id: EntityId,
    pub kind: EntityKind,
    pub tier: PickTier,
    /// Distance from the ray origin
    pub distance: f64,
    pub owner: Option<EntityId>,
}

impl PickHit {
    /// The body a hit refers to: the owner for curves and bands, else itself
    pub fn target(&self) -> &EntityId {
        self.owner.as_ref().unwrap_or(&self.id)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickOptions {
    /// System markers take part (overview only)
    pub markers_enabled: bool,
    /// Smallest on-screen radius of enlarged and marker volumes (pixels)
    pub min_pick_px: f64,
}

impl Default for PickOptions {
    fn default() -> Self {
        Self { markers_enabled: false, min_pick_px: 8.0 }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Picker {
    pub options: PickOptions,
}

impl Picker {
    pub fn new(options: PickOptions) -> Self {
        Self { options }
    }

    /// Pick under a pointer position (pixels, top-left origin)
    pub fn pick(
        &self,
        registry: &SceneBodyRegistry,
        camera: &Camera,
        pointer: DVec2,
    ) -> Option<PickHit> {
        if !pointer.is_finite() {
            return None;
        }
        let ray = camera.screen_ray(pointer);
        let hit = self.pick_ray(registry, camera, &ray, pointer);
        if let Some(hit) = &hit {
            tracing::trace!("Pick {} via {:?} at {:.3}", hit.id, hit.tier, hit.distance);
        }
        hit
    }

    fn pick_ray(
        &self,
        registry: &SceneBodyRegistry,
        camera: &Camera,
        ray: &Ray,
        pointer: DVec2,
    ) -> Option<PickHit> {
        for tier in PickTier::ORDER {
            if tier == PickTier::Marker && !self.options.markers_enabled {
                continue;
            }
            let mut best: Option<PickHit> = None;
            for entity in registry.iter() {
                let Some(distance) = self.test(tier, registry, camera, ray, pointer, entity) else {
                    continue;
                };
                if best.as_ref().map_or(true, |b| distance < b.distance) {
                    best = Some(PickHit {
                        id: entity.id.clone(),
                        kind: entity.kind,
                        tier,
                        distance,
                        owner: entity.owner.clone(),
                    });
                }
            }
            if best.is_some() {
                return best;
            }
        }
        None
    }

    fn test(
        &self,
        tier: PickTier,
        registry: &SceneBodyRegistry,
        camera: &Camera,
        ray: &Ray,
        pointer: DVec2,
        entity: &SceneEntity,
    ) -> Option<f64> {
        match (tier, entity.pick) {
            (PickTier::Enlarged, PickVolume::Enlarged { radius }) if entity.kind.is_body() => {
                let center = registry.resolve(entity);
                let surface = entity.surface_radius().unwrap_or(0.0);
                let radius = self.inflate(camera, center, radius.max(surface));
                ray_sphere(ray, center, radius)
            }
            (PickTier::Surface, PickVolume::Enlarged { .. } | PickVolume::Surface)
                if entity.kind.is_body() =>
            {
                let radius = entity.surface_radius()?;
                ray_sphere(ray, registry.resolve(entity), radius)
            }
            (PickTier::Curve, PickVolume::Curve { tolerance_px }) => {
                let Geometry::Polyline { points } = &entity.geometry else {
                    return None;
                };
                let origin = registry.resolve(entity);
                curve_hit(camera, ray, pointer, origin, points, tolerance_px)
            }
            (PickTier::Marker, PickVolume::Marker { radius })
                if entity.kind == EntityKind::SystemMarker =>
            {
                let center = registry.resolve(entity);
                ray_sphere(ray, center, self.inflate(camera, center, radius))
            }
            _ => None,
        }
    }

    /// Grow a radius so it covers at least `min_pick_px` on screen
    fn inflate(&self, camera: &Camera, center: DVec3, radius: f64) -> f64 {
        let depth = camera.depth_of(center);
        if depth <= camera.near {
            return radius;
        }
        radius.max(self.options.min_pick_px / camera.pixels_per_unit(depth))
    }
}

/// Nearest non-negative ray parameter hitting a sphere. From inside the
/// sphere the exit point is returned.
pub fn ray_sphere(ray: &Ray, center: DVec3, radius: f64) -> Option<f64> {
    if !(radius > 0.0) {
        return None;
    }
    let oc = ray.origin - center;
    let b = oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let sq = disc.sqrt();
    let (t0, t1) = (-b - sq, -b + sq);
    if t1 < 0.0 {
        None
    } else if t0 >= 0.0 {
        Some(t0)
    } else {
        Some(t1)
    }
}

/// Closest approach of a projected polyline to the pointer, accepted when
/// within `tolerance_px`. Returns the ray distance of the closest point.
fn curve_hit(
    camera: &Camera,
    ray: &Ray,
    pointer: DVec2,
    origin: DVec3,
    points: &[DVec3],
    tolerance_px: f64,
) -> Option<f64> {
    let mut best: Option<(f64, f64)> = None;
    for pair in points.windows(2) {
        let Some((a, b)) = clip_to_near(camera, origin + pair[0], origin + pair[1]) else {
            continue;
        };
        let (Some(pa), Some(pb)) = (camera.project(a), camera.project(b)) else {
            continue;
        };
        let (px, u) = point_segment_2d(pointer, pa, pb);
        if px > tolerance_px {
            continue;
        }
        let world = a.lerp(b, u);
        let distance = (world - ray.origin).length();
        if best.map_or(true, |(bpx, bd)| px < bpx || (px == bpx && distance < bd)) {
            best = Some((px, distance));
        }
    }
    best.map(|(_, distance)| distance)
}

/// Trim a segment to the part in front of the near plane
fn clip_to_near(camera: &Camera, a: DVec3, b: DVec3) -> Option<(DVec3, DVec3)> {
    let limit = camera.near * 1.001;
    let (da, db) = (camera.depth_of(a), camera.depth_of(b));
    match (da > limit, db > limit) {
        (true, true) => Some((a, b)),
        (false, false) => None,
        (true, false) => Some((a, a.lerp(b, (da - limit) / (da - db)))),
        (false, true) => Some((b.lerp(a, (db - limit) / (db - da)), b)),
    }
}

/// Pixel distance from `p` to segment `ab` and the segment parameter
fn point_segment_2d(p: DVec2, a: DVec2, b: DVec2) -> (f64, f64) {
    let ab = b - a;
    let len2 = ab.length_squared();
    let u = if len2 > 0.0 {
        ((p - a).dot(ab) / len2).clamp(0.0, 1.0)
    } else {
        0.0
    };
    ((a + ab * u).distance(p), u)
}
