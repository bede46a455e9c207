//! Camera fly-to transitions
//!
//! One controller per camera. Starting a transition while another is in
//! flight drops the old one without completing it and restarts from the
//! camera's current, partially interpolated pose.

use crate::camera::{Camera, CameraPose};
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// How progress advances per tick
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum ProgressMode {
    /// Fixed step per tick, independent of frame time
    PerTick { step: f64 },
    /// Step scaled by elapsed time over a total duration
    Elapsed { duration_secs: f64 },
}

impl Default for ProgressMode {
    fn default() -> Self {
        Self::PerTick { step: 0.02 }
    }
}

impl ProgressMode {
    /// Unusable steps or durations finish the transition in one tick
    fn step(&self, dt: f64) -> f64 {
        match *self {
            Self::PerTick { step } if step.is_finite() && step > 0.0 => step,
            Self::Elapsed { duration_secs } if duration_secs.is_finite() && duration_secs > 0.0 => {
                dt.max(0.0) / duration_secs
            }
            _ => 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CameraTransition<C> {
    pub start: CameraPose,
    pub end: CameraPose,
    /// In [0, 1]
    pub progress: f64,
    pub completion: C,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TransitionState<C> {
    Idle,
    Animating(CameraTransition<C>),
}

impl<C> Default for TransitionState<C> {
    fn default() -> Self {
        Self::Idle
    }
}

/// Result of one tick
#[derive(Clone, Debug, PartialEq)]
pub enum TickOutcome<C> {
    Idle,
    Progressed(f64),
    /// Reached the end pose; carries the completion exactly once
    Completed(C),
}

#[derive(Clone, Debug)]
pub struct CameraTransitionController<C> {
    state: TransitionState<C>,
    mode: ProgressMode,
}

impl<C> Default for CameraTransitionController<C> {
    fn default() -> Self {
        Self::new(ProgressMode::default())
    }
}

impl<C> CameraTransitionController<C> {
    pub fn new(mode: ProgressMode) -> Self {
        Self { state: TransitionState::Idle, mode }
    }

    pub fn mode(&self) -> ProgressMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ProgressMode) {
        self.mode = mode;
    }

    pub fn state(&self) -> &TransitionState<C> {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, TransitionState::Idle)
    }

    /// Progress of the active transition, None when idle
    pub fn progress(&self) -> Option<f64> {
        match &self.state {
            TransitionState::Idle => None,
            TransitionState::Animating(t) => Some(t.progress),
        }
    }

    /// Start a transition from the camera's current pose.
    /// Returns the superseded transition's completion, which will never fire.
    pub fn begin(&mut self, camera: &Camera, end: CameraPose, completion: C) -> Option<C> {
        let start = camera.pose();
        let previous = std::mem::replace(
            &mut self.state,
            TransitionState::Animating(CameraTransition { start, end, progress: 0.0, completion }),
        );
        match previous {
            TransitionState::Animating(old) => {
                tracing::debug!("Superseding transition at {:.2}", old.progress);
                Some(old.completion)
            }
            TransitionState::Idle => {
                tracing::debug!("Camera transition started");
                None
            }
        }
    }

    /// Translate the end pose of the active transition, as when its
    /// destination is a moving body. Returns false when idle.
    pub fn shift_end(&mut self, delta: DVec3) -> bool {
        match &mut self.state {
            TransitionState::Animating(t) => {
                t.end = CameraPose::new(t.end.position + delta, t.end.target + delta);
                true
            }
            TransitionState::Idle => false,
        }
    }

    /// Drop the active transition without completing it
    pub fn cancel(&mut self) -> Option<C> {
        match std::mem::take(&mut self.state) {
            TransitionState::Animating(old) => {
                tracing::debug!("Transition cancelled at {:.2}", old.progress);
                Some(old.completion)
            }
            TransitionState::Idle => None,
        }
    }

    /// Advance and apply the interpolated pose to the camera
    pub fn tick(&mut self, camera: &mut Camera, dt: f64) -> TickOutcome<C> {
        let step = self.mode.step(dt);
        let finished = match &mut self.state {
            TransitionState::Idle => return TickOutcome::Idle,
            TransitionState::Animating(t) => {
                t.progress = (t.progress + step).min(1.0);
                if t.progress < 1.0 {
                    camera.set_pose(t.start.lerp(&t.end, t.progress));
                    return TickOutcome::Progressed(t.progress);
                }
                t.end
            }
        };

        camera.set_pose(finished);
        match std::mem::take(&mut self.state) {
            TransitionState::Animating(t) => {
                tracing::debug!("Camera transition complete");
                TickOutcome::Completed(t.completion)
            }
            TransitionState::Idle => TickOutcome::Idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn camera() -> Camera {
        Camera::new(CameraPose::new(DVec3::new(0.0, -10.0, 0.0), DVec3::ZERO))
    }

    fn pose(x: f64) -> CameraPose {
        CameraPose::new(DVec3::new(x, -10.0, 0.0), DVec3::new(x, 0.0, 0.0))
    }

    #[test]
    fn test_completes_once_at_exact_end() {
        let mut cam = camera();
        let mut ctl = CameraTransitionController::new(ProgressMode::PerTick { step: 0.3 });
        ctl.begin(&cam, pose(10.0), "done");

        let mut completions = Vec::new();
        for _ in 0..10 {
            if let TickOutcome::Completed(c) = ctl.tick(&mut cam, 0.016) {
                completions.push(c);
            }
        }
        assert_eq!(completions, vec!["done"]);
        assert_eq!(cam.pose(), pose(10.0));
        assert!(ctl.is_idle());
    }

    #[test]
    fn test_superseded_transition_never_completes() {
        let mut cam = camera();
        let mut ctl = CameraTransitionController::new(ProgressMode::PerTick { step: 0.25 });
        ctl.begin(&cam, pose(8.0), 1);
        ctl.tick(&mut cam, 0.0);
        ctl.tick(&mut cam, 0.0);
        let cancelled_at = cam.pose();
        assert_abs_diff_eq!(cancelled_at.position.x, 4.0, epsilon = 1e-12);

        assert_eq!(ctl.begin(&cam, pose(-4.0), 2), Some(1));
        match ctl.state() {
            TransitionState::Animating(t) => assert_eq!(t.start, cancelled_at),
            TransitionState::Idle => panic!("expected animating"),
        }

        let mut completions = Vec::new();
        for _ in 0..20 {
            if let TickOutcome::Completed(c) = ctl.tick(&mut cam, 0.0) {
                completions.push(c);
            }
        }
        assert_eq!(completions, vec![2]);
        assert_eq!(cam.pose(), pose(-4.0));
    }

    #[test]
    fn test_progress_is_linear_per_tick() {
        let mut cam = camera();
        let mut ctl = CameraTransitionController::new(ProgressMode::PerTick { step: 0.1 });
        ctl.begin(&cam, pose(10.0), ());
        assert_eq!(ctl.tick(&mut cam, 5.0), TickOutcome::Progressed(0.1));
        assert_abs_diff_eq!(cam.position.x, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_elapsed_mode_uses_frame_time() {
        let mut cam = camera();
        let mut ctl = CameraTransitionController::new(ProgressMode::Elapsed { duration_secs: 2.0 });
        ctl.begin(&cam, pose(10.0), ());
        assert_eq!(ctl.tick(&mut cam, 0.5), TickOutcome::Progressed(0.25));
        assert_eq!(ctl.tick(&mut cam, 2.0), TickOutcome::Completed(()));
    }

    #[test]
    fn test_degenerate_step_finishes_in_one_tick() {
        for mode in [
            ProgressMode::PerTick { step: 0.0 },
            ProgressMode::PerTick { step: -0.1 },
            ProgressMode::PerTick { step: f64::NAN },
            ProgressMode::Elapsed { duration_secs: f64::INFINITY },
        ] {
            let mut cam = camera();
            let mut ctl = CameraTransitionController::new(mode);
            ctl.begin(&cam, pose(10.0), "landed");
            assert_eq!(ctl.tick(&mut cam, 0.016), TickOutcome::Completed("landed"));
            assert_eq!(cam.pose(), pose(10.0));
            assert!(ctl.is_idle());
        }
    }

    #[test]
    fn test_shifted_end_lands_on_moved_destination() {
        let mut cam = camera();
        let mut ctl = CameraTransitionController::new(ProgressMode::PerTick { step: 0.5 });
        assert!(!ctl.shift_end(DVec3::X));

        ctl.begin(&cam, pose(10.0), ());
        ctl.tick(&mut cam, 0.0);
        assert!(ctl.shift_end(DVec3::new(2.0, 0.0, 0.0)));
        assert_eq!(ctl.tick(&mut cam, 0.0), TickOutcome::Completed(()));
        assert_eq!(cam.pose(), pose(12.0));
    }

    #[test]
    fn test_cancel_returns_to_idle() {
        let mut cam = camera();
        let mut ctl = CameraTransitionController::<u8>::default();
        assert_eq!(ctl.tick(&mut cam, 0.1), TickOutcome::Idle);
        ctl.begin(&cam, pose(1.0), 7);
        assert_eq!(ctl.cancel(), Some(7));
        assert!(ctl.is_idle());
        assert_eq!(ctl.tick(&mut cam, 0.1), TickOutcome::Idle);
    }
}
