//! Keplerian orbital elements and orbit geometry
//!
//! Orbits are described in the frame of their reference body: the reference
//! plane is x-y, its normal is +z, and the periapsis of an unrotated ellipse
//! lies on +x.

use crate::constants::{DEFAULT_ORBIT_SAMPLES, MAX_ORBIT_SAMPLES, MIN_ORBIT_SAMPLES};
use crate::error::{ElementsError, ElementsResult};
use glam::DVec3;
use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

/// Classical Keplerian orbital elements, in catalog units
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements {
    /// Semi-major axis (AU)
    a: f64,
    /// Eccentricity (dimensionless, 0 = circular)
    e: f64,
    /// Inclination (degrees)
    i: f64,
    /// Argument of periastron (degrees)
    omega_small: f64,
    /// Longitude of ascending node (degrees)
    omega_big: f64,
}

impl OrbitalElements {
    /// Validated constructor. Rejects `a <= 0` and `e` outside `[0, 1)`.
    pub fn new(a: f64, e: f64, i: f64, omega_small: f64) -> ElementsResult<Self> {
        for (field, value) in [
            ("semi-major axis", a),
            ("eccentricity", e),
            ("inclination", i),
            ("argument of periastron", omega_small),
        ] {
            if !value.is_finite() {
                return Err(ElementsError::NonFinite { field });
            }
        }
        if a <= 0.0 {
            return Err(ElementsError::NonPositiveSemiMajorAxis(a));
        }
        if !(0.0..1.0).contains(&e) {
            return Err(ElementsError::EccentricityOutOfRange(e));
        }
        Ok(Self { a, e, i, omega_small, omega_big: 0.0 })
    }

    /// Build from a catalog row, defaulting the optional fields to zero
    pub fn from_catalog(
        a: f64,
        e: Option<f64>,
        i: Option<f64>,
        omega_small: Option<f64>,
    ) -> ElementsResult<Self> {
        Self::new(a, e.unwrap_or(0.0), i.unwrap_or(0.0), omega_small.unwrap_or(0.0))
    }

    /// Circular, uninclined orbit
    pub fn circular(a: f64) -> ElementsResult<Self> {
        Self::new(a, 0.0, 0.0, 0.0)
    }

    /// Set the longitude of the ascending node (degrees)
    pub fn with_ascending_node(mut self, omega_big: f64) -> Self {
        if omega_big.is_finite() {
            self.omega_big = omega_big;
        }
        self
    }

    pub fn semi_major_axis(&self) -> f64 {
        self.a
    }

    pub fn eccentricity(&self) -> f64 {
        self.e
    }

    pub fn inclination_deg(&self) -> f64 {
        self.i
    }

    pub fn arg_periastron_deg(&self) -> f64 {
        self.omega_small
    }

    pub fn ascending_node_deg(&self) -> f64 {
        self.omega_big
    }

    /// Closest approach distance `a(1 - e)` (AU)
    pub fn periapsis_distance(&self) -> f64 {
        self.a * (1.0 - self.e)
    }

    /// Farthest distance `a(1 + e)` (AU)
    pub fn apoapsis_distance(&self) -> f64 {
        self.a * (1.0 + self.e)
    }

    /// Distance from focus at given true anomaly
    pub fn radius(&self, true_anomaly: f64) -> f64 {
        self.a * (1.0 - self.e.powi(2)) / (1.0 + self.e * true_anomaly.cos())
    }

    /// Rotation matrix from the perifocal frame to the reference frame
    pub fn perifocal_to_reference(&self) -> Matrix3<f64> {
        perifocal_rotation(
            self.omega_big.to_radians(),
            self.i.to_radians(),
            self.omega_small.to_radians(),
        )
    }

    /// Position in the reference frame at given true anomaly (AU)
    pub fn position_at(&self, true_anomaly: f64) -> DVec3 {
        let (x, y) = ellipse_point(self, true_anomaly);
        let v = self.perifocal_to_reference() * Vector3::new(x, y, 0.0);
        DVec3::new(v.x, v.y, v.z)
    }

    /// Position at given mean anomaly, solving Kepler's equation
    pub fn position_at_mean_anomaly(&self, mean_anomaly: f64) -> DVec3 {
        let ea = solve_kepler(mean_anomaly, self.e);
        self.position_at(true_anomaly(ea, self.e))
    }
}

/// Combined rotation `R_z(Ω) · R_x(i) · R_z(ω)`, angles in radians
fn perifocal_rotation(omega_big: f64, i: f64, omega_small: f64) -> Matrix3<f64> {
    let cos_o = omega_big.cos();
    let sin_o = omega_big.sin();
    let cos_i = i.cos();
    let sin_i = i.sin();
    let cos_w = omega_small.cos();
    let sin_w = omega_small.sin();

    Matrix3::new(
        cos_o * cos_w - sin_o * sin_w * cos_i,
        -cos_o * sin_w - sin_o * cos_w * cos_i,
        sin_o * sin_i,

        sin_o * cos_w + cos_o * sin_w * cos_i,
        -sin_o * sin_w + cos_o * cos_w * cos_i,
        -cos_o * sin_i,

        sin_w * sin_i,
        cos_w * sin_i,
        cos_i,
    )
}

/// Point on the orbital ellipse in the perifocal plane.
/// Returns (x, y) where x points to periapsis.
pub fn ellipse_point(elements: &OrbitalElements, true_anomaly: f64) -> (f64, f64) {
    let r = elements.radius(true_anomaly);
    (r * true_anomaly.cos(), r * true_anomaly.sin())
}

/// Rotate a perifocal point by the argument of periastron about the orbit
/// normal, then by the inclination about the reference x axis.
pub fn apply_orbital_rotation(
    point: (f64, f64),
    omega_small_deg: f64,
    inclination_deg: f64,
) -> DVec3 {
    let rot = perifocal_rotation(0.0, inclination_deg.to_radians(), omega_small_deg.to_radians());
    let v = rot * Vector3::new(point.0, point.1, 0.0);
    DVec3::new(v.x, v.y, v.z)
}

/// Sample the orbit uniformly in true anomaly over [0, 2π).
///
/// The returned sequence has `samples + 1` points: the first point is
/// repeated at the end so line renderers draw a closed loop. `samples` is
/// clamped to `[MIN_ORBIT_SAMPLES, MAX_ORBIT_SAMPLES]`.
pub fn generate_orbit_curve(elements: &OrbitalElements, samples: usize) -> Vec<DVec3> {
    let n = samples.clamp(MIN_ORBIT_SAMPLES, MAX_ORBIT_SAMPLES);
    let rot = elements.perifocal_to_reference();

    let mut points = Vec::with_capacity(n + 1);
    for k in 0..n {
        let theta = TAU * k as f64 / n as f64;
        let (x, y) = ellipse_point(elements, theta);
        let v = rot * Vector3::new(x, y, 0.0);
        points.push(DVec3::new(v.x, v.y, v.z));
    }
    points.push(points[0]);
    points
}

/// Orbit curve with the default sample count
pub fn default_orbit_curve(elements: &OrbitalElements) -> Vec<DVec3> {
    generate_orbit_curve(elements, DEFAULT_ORBIT_SAMPLES)
}

/// Position of periapsis, used as the static placement of a body whose
/// orbital phase is unknown
pub fn periapsis_position(elements: &OrbitalElements) -> DVec3 {
    elements.position_at(0.0)
}

/// Solve Kepler's equation `M = E - e sin E` for the eccentric anomaly
pub fn solve_kepler(mean_anomaly: f64, e: f64) -> f64 {
    let m = normalize_angle(mean_anomaly);

    // Newton-Raphson iteration
    let mut ea = if e < 0.8 { m } else { PI };

    for _ in 0..50 {
        let f = ea - e * ea.sin() - m;
        let fp = 1.0 - e * ea.cos();
        let delta = f / fp;
        ea -= delta;

        if delta.abs() < 1e-12 {
            break;
        }
    }

    ea
}

/// True anomaly from eccentric anomaly
pub fn true_anomaly(eccentric_anomaly: f64, e: f64) -> f64 {
    // tan(ν/2) = sqrt((1+e)/(1-e)) * tan(E/2)
    let half_nu = ((1.0 + e) / (1.0 - e)).sqrt() * (eccentric_anomaly / 2.0).tan();
    2.0 * half_nu.atan()
}

/// Normalize angle to [0, 2π)
pub fn normalize_angle(angle: f64) -> f64 {
    let mut a = angle % TAU;
    if a < 0.0 { a += TAU; }
    a
}
