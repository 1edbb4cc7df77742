//! Simulation state and entity types
//!
//! Everything the tick mutates lives in [`SimulationState`]; nothing is
//! shared through globals.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::input::FlickState;
use crate::stage::Stage;
use crate::tuning::Tuning;

/// The player's marble
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marble {
    pub pos: DVec2,
    /// Displacement per tick
    pub vel: DVec2,
    pub radius: f64,
    /// Inner circle radius as a fraction of `radius` (visual only)
    pub inset_ratio: f64,
}

impl Marble {
    pub fn new(pos: DVec2, radius: f64, inset_ratio: f64) -> Self {
        Self {
            pos,
            vel: DVec2::ZERO,
            radius,
            inset_ratio,
        }
    }

    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self::new(tuning.spawn, tuning.marble_radius, tuning.visual_inset_ratio)
    }

    pub fn speed(&self) -> f64 {
        self.vel.length()
    }

    /// Radius of the inner (visual) circle
    pub fn inner_radius(&self) -> f64 {
        self.radius * self.inset_ratio
    }
}

/// Exponentially smoothed follow camera
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub pos: DVec2,
    /// Where the camera is heading
    pub focus: DVec2,
    /// 0 snaps to the focus; larger values lag further behind
    pub smoothness: f64,
}

impl Camera {
    pub fn new(pos: DVec2, smoothness: f64) -> Self {
        Self {
            pos,
            focus: pos,
            smoothness: smoothness.max(0.0),
        }
    }

    /// Retarget the camera (takes a copy of `target`)
    pub fn follow(&mut self, target: DVec2) {
        self.focus = target;
    }

    /// Advance one tick: a convex blend of the current position and the focus
    pub fn update(&mut self) {
        self.pos = (self.pos * self.smoothness + self.focus) / (self.smoothness + 1.0);
    }
}

/// Complete simulation state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationState {
    pub tuning: Tuning,
    /// Static walls for the current stage
    pub stage: Stage,
    pub marble: Marble,
    pub camera: Camera,
    pub flick: FlickState,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl SimulationState {
    /// Start a session: marble at the spawn point, at rest
    pub fn new(tuning: Tuning, stage: Stage) -> Self {
        let marble = Marble::from_tuning(&tuning);
        let camera = Camera::new(DVec2::ZERO, tuning.camera_smoothness);
        log::info!(
            "New session: {} wall(s), marble at ({:.1}, {:.1})",
            stage.wall_count(),
            marble.pos.x,
            marble.pos.y
        );
        Self {
            tuning,
            stage,
            marble,
            camera,
            flick: FlickState::default(),
            time_ticks: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_session() {
        let state = SimulationState::new(Tuning::default(), Stage::dev());
        assert_eq!(state.marble.pos, DVec2::new(100.0, 100.0));
        assert_eq!(state.marble.vel, DVec2::ZERO);
        assert_eq!(state.marble.inner_radius(), 16.0);
        assert_eq!(state.camera.pos, DVec2::ZERO);
        assert!(!state.flick.is_charging());
        assert!(!state.flick.impulse_ready());
    }

    #[test]
    fn test_camera_follow_copies_target() {
        let mut marble = Marble::new(DVec2::new(1.0, 2.0), 5.0, 0.5);
        let mut camera = Camera::new(DVec2::ZERO, 5.0);
        camera.follow(marble.pos);
        marble.pos.x = 99.0;
        assert_ne!(camera.focus, marble.pos);
        assert_eq!(camera.focus, DVec2::new(1.0, 2.0));
    }

    #[test]
    fn test_camera_zero_smoothness_snaps() {
        let mut camera = Camera::new(DVec2::ZERO, 0.0);
        camera.follow(DVec2::new(30.0, -4.0));
        camera.update();
        assert_eq!(camera.pos, DVec2::new(30.0, -4.0));
    }

    #[test]
    fn test_camera_step() {
        let mut camera = Camera::new(DVec2::ZERO, 5.0);
        camera.follow(DVec2::new(60.0, 0.0));
        camera.update();
        assert!((camera.pos.x - 10.0).abs() < 1e-12);
        // Never arrives in finite time
        for _ in 0..100 {
            camera.update();
        }
        assert!(camera.pos.x < 60.0);
    }

    proptest! {
        #[test]
        fn prop_camera_converges_monotonically(
            tx in -1e4f64..1e4,
            ty in -1e4f64..1e4,
            smoothness in 0.0f64..50.0,
        ) {
            let target = DVec2::new(tx, ty);
            let mut camera = Camera::new(DVec2::ZERO, smoothness);
            camera.follow(target);
            let tol = 1e-9 * (1.0 + target.length());
            let mut gap = (camera.pos - target).length();
            for _ in 0..200 {
                camera.update();
                let next = (camera.pos - target).length();
                prop_assert!(next <= gap + tol);
                gap = next;
            }
        }
    }
}
