//! Playback clock driving the overview's planet motion

use crate::system::{days_since_j2000, j2000};
use hifitime::{Duration, Epoch};

/// Largest playback rate accepted in either direction (days per second)
pub const MAX_DAYS_PER_SECOND: f64 = 1.0e4;

/// Playable span on each side of J2000, in days
const WINDOW_DAYS: f64 = 5000.0 * 365.25;

/// Simulation clock. Time runs at a signed rate in simulated days per
/// real second and stays inside a fixed window around J2000.
#[derive(Debug, Clone, Copy)]
pub struct SimClock {
    epoch: Epoch,
    days_per_second: f64,
    paused: bool,
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl SimClock {
    /// Clock at J2000 running at `days_per_second`
    pub fn new(days_per_second: f64) -> Self {
        let mut clock = Self {
            epoch: j2000(),
            days_per_second: 0.0,
            paused: false,
        };
        clock.set_days_per_second(days_per_second);
        clock
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Days elapsed since J2000
    pub fn elapsed_days(&self) -> f64 {
        days_since_j2000(self.epoch)
    }

    pub fn days_per_second(&self) -> f64 {
        self.days_per_second
    }

    /// Negative rates run backwards. Non-finite rates are ignored.
    pub fn set_days_per_second(&mut self, days_per_second: f64) {
        if days_per_second.is_finite() {
            self.days_per_second = days_per_second.clamp(-MAX_DAYS_PER_SECOND, MAX_DAYS_PER_SECOND);
        }
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Advance by `dt` real seconds and return the new epoch
    pub fn tick(&mut self, dt: f64) -> Epoch {
        if !self.paused && dt.is_finite() && dt > 0.0 {
            let days = (self.elapsed_days() + self.days_per_second * dt)
                .clamp(-WINDOW_DAYS, WINDOW_DAYS);
            self.epoch = j2000() + Duration::from_days(days);
        }
        self.epoch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_tick_advances_by_rate() {
        let mut clock = SimClock::new(1.0);
        clock.tick(2.0);
        assert_abs_diff_eq!(clock.elapsed_days(), 2.0, epsilon = 1e-6);

        clock.set_days_per_second(-0.5);
        clock.tick(2.0);
        assert_abs_diff_eq!(clock.elapsed_days(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_paused_clock_holds() {
        let mut clock = SimClock::default();
        clock.pause();
        let before = clock.epoch();
        assert_eq!(clock.tick(10.0), before);
        clock.toggle_pause();
        assert!(!clock.is_paused());
        clock.tick(1.0);
        assert!(clock.epoch() > before);
    }

    #[test]
    fn test_rate_and_window_are_bounded() {
        let mut clock = SimClock::new(1.0e9);
        assert_eq!(clock.days_per_second(), MAX_DAYS_PER_SECOND);
        clock.set_days_per_second(f64::NAN);
        assert_eq!(clock.days_per_second(), MAX_DAYS_PER_SECOND);

        for _ in 0..1000 {
            clock.tick(1000.0);
        }
        assert_abs_diff_eq!(clock.elapsed_days(), WINDOW_DAYS, epsilon = 1e-3);
    }

    #[test]
    fn test_negative_or_invalid_dt_ignored() {
        let mut clock = SimClock::new(1.0);
        clock.tick(-3.0);
        clock.tick(f64::INFINITY);
        assert_abs_diff_eq!(clock.elapsed_days(), 0.0, epsilon = 1e-9);
    }
}
