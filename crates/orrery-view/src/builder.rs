//! Entity construction for the two views
//!
//! Builders only add entities; clearing the registry is the orchestrator's
//! job and always happens first.

use crate::catalog::{Catalog, PlanetRecord, SystemRecord};
use crate::config::ViewConfig;
use glam::DVec3;
use orrery_core::constants::{EARTH_RADIUS_KM, SOLAR_RADIUS_KM};
use orrery_core::{
    blackbody_to_color, generate_orbit_curve, habitable_zone_annulus, periapsis_position,
    HabitableZone, StarPhysicalProfile,
};
use orrery_scene::{
    Appearance, CameraPose, EntityId, EntityKind, Geometry, PickVolume, SceneBodyRegistry,
    SceneEntity,
};
use orrery_sim::{Body, SolarSystem};
use std::collections::HashMap;

const ZONE_COLOR: [f32; 3] = [0.25, 0.8, 0.35];
const MARKER_GLOW_FLOOR: f32 = 0.5;

const PLANET_PALETTE: [[f32; 3]; 6] = [
    [0.62, 0.71, 0.88],
    [0.85, 0.66, 0.45],
    [0.55, 0.80, 0.70],
    [0.80, 0.55, 0.60],
    [0.75, 0.75, 0.55],
    [0.60, 0.60, 0.85],
];

/// Camera elevation above the reference plane for base poses
const BASE_ELEVATION_DEG: f64 = 30.0;

pub fn orbit_id(body: &EntityId) -> EntityId {
    EntityId::new(format!("{body}:orbit"))
}

pub fn marker_id(host_name: &str) -> EntityId {
    EntityId::new(format!("system:{host_name}"))
}

pub fn zone_id(host_name: &str) -> EntityId {
    EntityId::new(format!("{host_name}:habitable-zone"))
}

/// Pose looking at `target` from `distance` away, raised above the plane
pub fn elevated_pose(target: DVec3, distance: f64) -> CameraPose {
    let elevation = BASE_ELEVATION_DEG.to_radians();
    let offset = DVec3::new(0.0, -elevation.cos(), elevation.sin()) * distance;
    CameraPose::new(target + offset, target)
}

/// What the overview build produced
#[derive(Debug)]
pub struct OverviewLayout {
    pub base_pose: CameraPose,
    /// Solar-system bodies, in registry order
    pub bodies: Vec<(EntityId, Body)>,
    /// Marker entity to host name
    pub markers: HashMap<EntityId, String>,
}

/// Sun, planets, the Moon, their orbits and one marker per catalog system
pub fn build_overview(
    registry: &mut SceneBodyRegistry,
    catalog: &Catalog,
    config: &ViewConfig,
    solar: &SolarSystem,
) -> OverviewLayout {
    let scaler = config.overview_scaler();
    let factor = scaler.orbital.factor();
    let mut bodies = Vec::new();

    for &body in Body::all() {
        let id = EntityId::new(body.name());
        let entity = match body {
            Body::Sun => {
                let sun = StarPhysicalProfile::sun();
                let radius = body.radius_km() / SOLAR_RADIUS_KM * config.star_scale;
                SceneEntity::new(id.clone(), EntityKind::Star, Geometry::Sphere { radius })
                    .with_pick(PickVolume::Surface)
                    .with_appearance(
                        Appearance::flat(sun.color())
                            .with_texture(body.texture_key())
                            .with_glow(sun.glow() as f32),
                    )
            }
            _ => {
                let radius = body.radius_km() / EARTH_RADIUS_KM * config.planet_scale;
                let entity =
                    SceneEntity::new(id.clone(), EntityKind::Planet, Geometry::Sphere { radius })
                        .with_pick(PickVolume::Enlarged { radius: radius * config.pick_inflation })
                        .with_appearance(
                            Appearance::flat(body.base_color()).with_texture(body.texture_key()),
                        );
                match body.parent() {
                    Some(parent) if parent != Body::Sun => entity.anchored(
                        EntityId::new(parent.name()),
                        solar.local_position(body) * factor * config.satellite_exaggeration,
                    ),
                    _ => entity.at(solar.body_position(body) * factor),
                }
            }
        };
        registry.add(entity);
        bodies.push((id.clone(), body));

        if let Some(elements) = body.j2000_elements() {
            let satellite_of = body.parent().filter(|p| *p != Body::Sun);
            let scale = match satellite_of {
                Some(_) => factor * config.satellite_exaggeration,
                None => factor,
            };
            let points = generate_orbit_curve(&elements, config.orbit_samples)
                .into_iter()
                .map(|p| p * scale)
                .collect();
            let geometry = Geometry::Polyline { points };
            let mut curve = SceneEntity::new(orbit_id(&id), EntityKind::OrbitCurve, geometry)
                .with_pick(PickVolume::Curve { tolerance_px: config.curve_tolerance_px })
                .with_appearance(Appearance::flat(body.base_color()))
                .owned_by(id);
            // Satellite orbits travel with their planet
            if let Some(parent) = satellite_of {
                curve = curve.anchored(EntityId::new(parent.name()), DVec3::ZERO);
            }
            registry.add(curve);
        }
    }

    let mut markers = HashMap::new();
    for system in &catalog.systems {
        let id = marker_id(&system.host_name);
        let profile = system.profile();
        let glow = (profile.glow() as f32).max(MARKER_GLOW_FLOOR);
        registry.add(
            SceneEntity::new(id.clone(), EntityKind::SystemMarker, Geometry::Point)
                .at(scaler.place_system(&system.position()))
                .with_pick(PickVolume::Marker { radius: config.marker_radius })
                .with_appearance(
                    Appearance::flat(blackbody_to_color(profile.temperature())).with_glow(glow),
                ),
        );
        markers.insert(id, system.host_name.clone());
    }

    tracing::info!(
        "Built solar overview: {} bodies, {} systems",
        bodies.len(),
        markers.len()
    );

    OverviewLayout {
        base_pose: elevated_pose(DVec3::ZERO, config.overview_distance),
        bodies,
        markers,
    }
}

/// Move solar bodies to the clock's epoch and spin them
pub fn sync_solar_bodies(
    registry: &mut SceneBodyRegistry,
    bodies: &[(EntityId, Body)],
    solar: &SolarSystem,
    config: &ViewConfig,
) {
    let factor = config.solar_orbit.factor();
    for (id, body) in bodies {
        let Some(entity) = registry.get_mut(id) else {
            continue;
        };
        entity.appearance.uniforms.spin = solar.spin_angle(*body) as f32;
        if *body == Body::Sun {
            continue;
        }
        match entity.anchor.as_mut() {
            Some(anchor) => {
                anchor.offset =
                    solar.local_position(*body) * factor * config.satellite_exaggeration;
            }
            None => entity.transform.position = solar.body_position(*body) * factor,
        }
    }
}

/// What the detail build produced
#[derive(Debug)]
pub struct DetailLayout {
    pub base_pose: CameraPose,
    pub star: EntityId,
    pub planets: Vec<EntityId>,
    /// Records dropped for malformed elements
    pub skipped: usize,
    pub habitable_zone: Option<HabitableZone>,
}

/// Host star at the origin, Keplerian curves, planets at periapsis and the
/// habitable-zone band when it can be resolved
pub fn build_detail(
    registry: &mut SceneBodyRegistry,
    system: &SystemRecord,
    planets: &[PlanetRecord],
    config: &ViewConfig,
) -> DetailLayout {
    let scaler = config.detail_scaler();
    let profile = system.profile();
    let star = EntityId::new(system.host_name.as_str());
    let star_radius = profile.radius() * config.star_scale;

    registry.add(
        SceneEntity::new(star.clone(), EntityKind::Star, Geometry::Sphere { radius: star_radius })
            .with_pick(PickVolume::Surface)
            .with_appearance(Appearance::flat(profile.color()).with_glow(profile.glow() as f32)),
    );

    let mut extent = 0.0_f64;
    let mut built = Vec::new();
    let mut skipped = 0;

    for (n, record) in planets.iter().enumerate() {
        let elements = match record.elements() {
            Ok(elements) => elements,
            Err(err) => {
                tracing::warn!("Skipping planet {}: {}", record.planet_name, err);
                skipped += 1;
                continue;
            }
        };

        let id = EntityId::new(record.planet_name.as_str());
        let color = PLANET_PALETTE[n % PLANET_PALETTE.len()];
        let radius_earth = record
            .radius_earth
            .filter(|r| r.is_finite() && *r > 0.0)
            .unwrap_or(config.default_planet_radius_earth);
        let radius = radius_earth * config.planet_scale;

        let points = scaler.orbital_curve(&generate_orbit_curve(&elements, config.orbit_samples));
        registry.add(
            SceneEntity::new(orbit_id(&id), EntityKind::OrbitCurve, Geometry::Polyline { points })
                .with_pick(PickVolume::Curve { tolerance_px: config.curve_tolerance_px })
                .with_appearance(Appearance::flat(color))
                .owned_by(id.clone()),
        );
        registry.add(
            SceneEntity::new(id.clone(), EntityKind::Planet, Geometry::Sphere { radius })
                .at(scaler.orbital_point(periapsis_position(&elements)))
                .with_pick(PickVolume::Enlarged { radius: radius * config.pick_inflation })
                .with_appearance(Appearance::flat(color)),
        );

        extent = extent.max(scaler.orbital_radius(elements.apoapsis_distance()));
        built.push(id);
    }

    let habitable_zone = habitable_zone_annulus(&profile);
    if let Some(zone) = habitable_zone {
        let (inner, outer) = (
            scaler.orbital_radius(zone.inner_au),
            scaler.orbital_radius(zone.outer_au),
        );
        registry.add(
            SceneEntity::new(
                zone_id(&system.host_name),
                EntityKind::HabitableZoneBand,
                Geometry::Annulus { inner, outer },
            )
            .with_appearance(Appearance::flat(ZONE_COLOR))
            .owned_by(star.clone()),
        );
        if built.is_empty() {
            extent = extent.max(outer);
        }
    }

    let distance = (extent * config.detail_framing)
        .max(star_radius * config.focus_framing)
        .clamp(config.min_camera_distance, config.max_camera_distance);

    tracing::info!(
        "Built detail view for {}: {} planets, {} skipped",
        system.host_name,
        built.len(),
        skipped
    );

    DetailLayout {
        base_pose: elevated_pose(DVec3::ZERO, distance),
        star,
        planets: built,
        skipped,
        habitable_zone,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn system(host: &str) -> SystemRecord {
        SystemRecord {
            host_name: host.to_string(),
            ra: 0.0,
            dec: 0.0,
            distance_pc: Some(10.0),
            star_temperature_k: Some(5778.0),
            star_radius_solar: Some(1.0),
            star_mass_solar: None,
            star_luminosity_solar: None,
        }
    }

    fn planet(name: &str, a: Option<f64>, e: Option<f64>) -> PlanetRecord {
        PlanetRecord {
            host_name: "Host".to_string(),
            planet_name: name.to_string(),
            semi_major_axis_au: a,
            eccentricity: e,
            inclination_deg: None,
            arg_of_periastron_deg: None,
            radius_earth: None,
        }
    }

    #[test]
    fn test_detail_places_circular_planet_on_x() {
        let config = ViewConfig::default();
        let mut registry = SceneBodyRegistry::new();
        let layout = build_detail(
            &mut registry,
            &system("Host"),
            &[planet("Host b", Some(1.0), None)],
            &config,
        );
        let p = registry.world_position(&"Host b".into()).unwrap();
        assert_abs_diff_eq!(p.x, config.detail_orbit.factor(), epsilon = 1e-9);
        assert_abs_diff_eq!(p.y, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(p.z, 0.0, epsilon = 1e-9);
        assert_eq!(layout.planets.len(), 1);
        assert!(registry.contains(&zone_id("Host")));
    }

    #[test]
    fn test_detail_skips_malformed_planets() {
        let config = ViewConfig::default();
        let mut registry = SceneBodyRegistry::new();
        let layout = build_detail(
            &mut registry,
            &system("Host"),
            &[
                planet("Host b", Some(0.5), Some(1.2)),
                planet("Host c", None, None),
                planet("Host d", Some(2.0), Some(0.1)),
            ],
            &config,
        );
        assert_eq!(layout.skipped, 2);
        assert_eq!(layout.planets, vec![EntityId::new("Host d")]);
        assert!(registry.find(&"Host b".into()).is_none());
        assert!(registry.find(&orbit_id(&"Host b".into())).is_none());
    }

    #[test]
    fn test_detail_without_zone_inputs_omits_band() {
        let config = ViewConfig::default();
        let mut registry = SceneBodyRegistry::new();
        let mut bare = system("Bare");
        bare.star_temperature_k = None;
        bare.star_radius_solar = None;
        let layout = build_detail(&mut registry, &bare, &[], &config);
        assert!(layout.habitable_zone.is_none());
        assert!(!registry.contains(&zone_id("Bare")));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_overview_contains_bodies_orbits_and_markers() {
        let config = ViewConfig::default();
        let mut registry = SceneBodyRegistry::new();
        let catalog = Catalog::new(vec![system("A"), system("B")], vec![]);
        let layout = build_overview(&mut registry, &catalog, &config, &SolarSystem::new());

        assert_eq!(layout.bodies.len(), Body::all().len());
        assert_eq!(layout.markers.len(), 2);
        assert!(registry.contains(&orbit_id(&"Earth".into())));
        assert!(registry.contains(&orbit_id(&"Moon".into())));

        let earth = registry.world_position(&"Earth".into()).unwrap();
        let moon = registry.world_position(&"Moon".into()).unwrap();
        assert!(moon.distance(earth) > 0.0);
        let anchor = registry.find(&"Moon".into()).and_then(|m| m.anchor.clone());
        assert_eq!(anchor.map(|a| a.parent), Some(EntityId::new("Earth")));
    }
}
