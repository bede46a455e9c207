//! Catalog coordinates to scene space
//!
//! Two independent contexts share one scene frame: interstellar placement of
//! host stars (parsecs) and orbital placement inside a system (AU).

use crate::constants::FALLBACK_DISTANCE_PC;
use crate::coordinates::EquatorialPosition;
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Scaling of host-star distances
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StellarScale {
    /// Scene units per (compressed) parsec
    pub scene_per_parsec: f64,
    /// Distance exponent: 1.0 is linear, < 1.0 pulls far systems in
    pub distance_exponent: f64,
    /// Distance used for systems without a usable distance (parsecs)
    pub fallback_distance_pc: f64,
}

impl Default for StellarScale {
    fn default() -> Self {
        Self {
            scene_per_parsec: 1.0,
            distance_exponent: 1.0,
            fallback_distance_pc: FALLBACK_DISTANCE_PC,
        }
    }
}

/// Scaling of orbital distances inside a system
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitalScale {
    /// Scene units per AU
    pub scene_per_au: f64,
    /// Uniform visual compression applied on top of `scene_per_au`
    pub compression: f64,
}

impl Default for OrbitalScale {
    fn default() -> Self {
        Self { scene_per_au: 10.0, compression: 1.0 }
    }
}

impl OrbitalScale {
    /// Effective AU to scene factor
    pub fn factor(&self) -> f64 {
        self.scene_per_au * self.compression
    }
}

/// Maps catalog coordinates into the shared scene frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CoordinateScaler {
    #[serde(default)]
    pub stellar: StellarScale,
    #[serde(default)]
    pub orbital: OrbitalScale,
}

impl CoordinateScaler {
    pub fn new(stellar: StellarScale, orbital: OrbitalScale) -> Self {
        Self { stellar, orbital }
    }

    /// Scene position of a host star.
    ///
    /// Missing, zero, negative or non-finite distances use the fallback
    /// distance along the star's own direction, so undated systems neither
    /// sit on the reference body nor on each other.
    pub fn place_system(&self, pos: &EquatorialPosition) -> DVec3 {
        let distance_pc = pos
            .usable_distance()
            .unwrap_or(self.stellar.fallback_distance_pc);
        pos.direction() * self.stellar_distance(distance_pc)
    }

    /// Scene distance for a parsec distance
    pub fn stellar_distance(&self, distance_pc: f64) -> f64 {
        distance_pc.max(0.0).powf(self.stellar.distance_exponent) * self.stellar.scene_per_parsec
    }

    /// Scene distance for an orbital radius (linear in the context factor)
    pub fn orbital_radius(&self, radius_au: f64) -> f64 {
        radius_au * self.orbital.factor()
    }

    /// Scene position for a point given in AU relative to the reference body
    pub fn orbital_point(&self, point_au: DVec3) -> DVec3 {
        point_au * self.orbital.factor()
    }

    pub fn orbital_curve(&self, points_au: &[DVec3]) -> Vec<DVec3> {
        points_au.iter().map(|p| self.orbital_point(*p)).collect()
    }
}
