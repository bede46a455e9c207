//! Solar system state management

use crate::planets::Body;
use glam::DVec3;
use hifitime::Epoch;
use orrery_core::elements::normalize_angle;
use std::f64::consts::TAU;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// J2000.0 reference epoch
pub fn j2000() -> Epoch {
    Epoch::from_gregorian_utc(2000, 1, 1, 12, 0, 0, 0)
}

/// Days elapsed since J2000 (negative before)
pub fn days_since_j2000(epoch: Epoch) -> f64 {
    (epoch - j2000()).to_seconds() / SECONDS_PER_DAY
}

/// Body state at a specific time
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyState {
    /// Position relative to the parent body (AU)
    pub local_au: DVec3,
    /// Heliocentric position (AU)
    pub position_au: DVec3,
    /// Spin angle about the body's axis (radians, [0, 2π))
    pub spin_angle: f64,
}

/// Solar system model: circular-in-time Keplerian propagation from J2000
/// mean anomalies and sidereal periods. No perturbations.
pub struct SolarSystem {
    /// Current epoch
    current_epoch: Epoch,
    /// Days since J2000 for the current epoch
    days: f64,
}

impl SolarSystem {
    /// Create at J2000 epoch
    pub fn new() -> Self {
        Self::at_epoch(j2000())
    }

    /// Create at specific epoch
    pub fn at_epoch(epoch: Epoch) -> Self {
        Self { current_epoch: epoch, days: days_since_j2000(epoch) }
    }

    /// Set current time
    pub fn set_epoch(&mut self, epoch: Epoch) {
        self.current_epoch = epoch;
        self.days = days_since_j2000(epoch);
    }

    /// Get current epoch
    pub fn epoch(&self) -> Epoch {
        self.current_epoch
    }

    /// Mean anomaly of a body at the current epoch (radians)
    pub fn mean_anomaly(&self, body: Body) -> Option<f64> {
        let m0 = body.mean_anomaly_j2000_deg()?.to_radians();
        let period = body.orbital_period_days()?;
        Some(normalize_angle(m0 + TAU * self.days / period))
    }

    /// Position relative to the parent body (AU)
    pub fn local_position(&self, body: Body) -> DVec3 {
        match (body.j2000_elements(), self.mean_anomaly(body)) {
            (Some(elements), Some(m)) => elements.position_at_mean_anomaly(m),
            _ => DVec3::ZERO,
        }
    }

    /// Heliocentric position (AU)
    pub fn body_position(&self, body: Body) -> DVec3 {
        let local = self.local_position(body);
        match body.parent() {
            Some(parent) if parent != Body::Sun => self.body_position(parent) + local,
            _ => local,
        }
    }

    /// Spin angle about the body's own axis
    pub fn spin_angle(&self, body: Body) -> f64 {
        let period_days = body.rotation_period_hours() / 24.0;
        normalize_angle(TAU * self.days / period_days)
    }

    /// Get body state
    pub fn body_state(&self, body: Body) -> BodyState {
        BodyState {
            local_au: self.local_position(body),
            position_au: self.body_position(body),
            spin_angle: self.spin_angle(body),
        }
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use hifitime::Duration;

    #[test]
    fn test_sun_at_origin() {
        let system = SolarSystem::new();
        assert_eq!(system.body_position(Body::Sun), DVec3::ZERO);
    }

    #[test]
    fn test_earth_distance_near_one_au() {
        let system = SolarSystem::new();
        let r = system.body_position(Body::Earth).length();
        assert!(r > 0.98 && r < 1.02, "Earth at {} AU", r);
    }

    #[test]
    fn test_one_period_returns_to_start() {
        let start = j2000();
        let a = SolarSystem::at_epoch(start).body_position(Body::Mars);
        let later = start + Duration::from_days(Body::Mars.orbital_period_days().unwrap());
        let b = SolarSystem::at_epoch(later).body_position(Body::Mars);
        assert_abs_diff_eq!(a.distance(b), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_moon_follows_earth() {
        let system = SolarSystem::new();
        let earth = system.body_position(Body::Earth);
        let moon = system.body_position(Body::Moon);
        let sep = earth.distance(moon);
        assert!(sep > 0.002 && sep < 0.003, "Moon-Earth separation {} AU", sep);
        assert_abs_diff_eq!(sep, system.local_position(Body::Moon).length(), epsilon = 1e-12);
    }

    #[test]
    fn test_body_state_combines_frames() {
        let system = SolarSystem::new();
        let moon = system.body_state(Body::Moon);
        let earth = system.body_position(Body::Earth);
        let offset = moon.position_au - earth;
        assert_abs_diff_eq!(offset.distance(moon.local_au), 0.0, epsilon = 1e-12);
        assert!((0.0..TAU).contains(&moon.spin_angle));
    }
}
