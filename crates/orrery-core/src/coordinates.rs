use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Catalog position of a host star (J2000 equatorial)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EquatorialPosition {
    /// Right ascension in degrees [0, 360)
    pub ra_deg: f64,
    /// Declination in degrees [-90, 90]
    pub dec_deg: f64,
    /// Distance in parsecs, if the catalog has one
    pub distance_pc: Option<f64>,
}

impl EquatorialPosition {
    pub fn new(ra_deg: f64, dec_deg: f64, distance_pc: Option<f64>) -> Self {
        Self { ra_deg, dec_deg, distance_pc }
    }

    /// Unit vector toward the star. Non-finite angles fall back to +x.
    pub fn direction(&self) -> DVec3 {
        if !(self.ra_deg.is_finite() && self.dec_deg.is_finite()) {
            return DVec3::X;
        }
        spherical_to_cartesian(1.0, self.ra_deg.to_radians(), self.dec_deg.to_radians())
    }

    /// Distance when it is a usable positive number
    pub fn usable_distance(&self) -> Option<f64> {
        self.distance_pc.filter(|d| d.is_finite() && *d > 0.0)
    }
}

/// Equatorial spherical (r, α, δ) to Cartesian, angles in radians
pub fn spherical_to_cartesian(r: f64, ra: f64, dec: f64) -> DVec3 {
    let cos_dec = dec.cos();
    DVec3::new(
        r * cos_dec * ra.cos(),
        r * cos_dec * ra.sin(),
        r * dec.sin(),
    )
}

/// Cartesian to (r, α, δ), angles in radians with α in [0, 2π)
pub fn cartesian_to_spherical(v: DVec3) -> (f64, f64, f64) {
    let r = v.length();
    if r == 0.0 {
        return (0.0, 0.0, 0.0);
    }
    let ra = v.y.atan2(v.x).rem_euclid(std::f64::consts::TAU);
    let dec = (v.z / r).clamp(-1.0, 1.0).asin();
    (r, ra, dec)
}
