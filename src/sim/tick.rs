//! Fixed timestep simulation tick
//!
//! Per tick: flick input, impulse, motion and collisions, then the camera.
//! The outer driver is responsible for calling [`tick`] at a steady rate.

use glam::DVec2;

use super::collision::{self, Bounce};
use super::input::{FlickOutcome, InputSnapshot, impulse_velocity};
use super::state::SimulationState;

/// What happened during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub flick: FlickOutcome,
    /// Velocity assigned by a flick this tick (before drag)
    pub launched: Option<DVec2>,
    pub bounce: Bounce,
}

/// Advance the simulation by one tick
///
/// Reads `input` and clears its edges before returning, whatever fired.
pub fn tick(state: &mut SimulationState, input: &mut InputSnapshot) -> TickReport {
    state.time_ticks += 1;

    let flick = state.flick.update(input, state.tuning.flick_power_min);
    input.consume_edges();

    let launched = state.flick.take_impulse().map(|motion| {
        let vel = impulse_velocity(motion, &state.tuning);
        // Replaces any residual motion
        state.marble.vel = vel;
        log::debug!(
            "Flick at tick {}: velocity ({:.2}, {:.2})",
            state.time_ticks,
            vel.x,
            vel.y
        );
        vel
    });

    let bounce = collision::advance(
        &mut state.marble,
        state.stage.walls(),
        state.tuning.resistance,
    );

    state.camera.follow(state.marble.pos);
    state.camera.update();

    TickReport {
        flick,
        launched,
        bounce,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::input::FlickPhase;
    use crate::stage::Stage;
    use crate::tuning::Tuning;

    fn new_state() -> SimulationState {
        SimulationState::new(Tuning::default(), Stage::dev())
    }

    fn idle(state: &mut SimulationState) -> TickReport {
        tick(state, &mut InputSnapshot::default())
    }

    #[test]
    fn test_idle_tick() {
        let mut state = new_state();
        let report = idle(&mut state);
        assert_eq!(state.time_ticks, 1);
        assert_eq!(report.flick, FlickOutcome::Unchanged);
        assert_eq!(report.launched, None);
        assert!(!report.bounce.any());
        assert_eq!(state.marble.pos, DVec2::new(100.0, 100.0));
        // Camera moved a sixth of the way toward the marble
        assert!((state.camera.pos - DVec2::new(100.0 / 6.0, 100.0 / 6.0)).length() < 1e-9);
    }

    #[test]
    fn test_edges_cleared_after_tick() {
        let mut state = new_state();
        let mut input = InputSnapshot::press(DVec2::new(100.0, 100.0));
        tick(&mut state, &mut input);
        assert!(!input.pointer_down);
        assert_eq!(input.pointer_pos, DVec2::new(100.0, 100.0));
        assert!(state.flick.is_charging());

        // Re-feeding the same snapshot does not press again
        let report = tick(&mut state, &mut input);
        assert_eq!(report.flick, FlickOutcome::Unchanged);
    }

    #[test]
    fn test_flick_scenario_hits_left_wall() {
        let mut state = new_state();

        tick(&mut state, &mut InputSnapshot::press(DVec2::new(100.0, 100.0)));
        assert_eq!(
            state.flick.phase(),
            FlickPhase::Charging {
                anchor: DVec2::new(100.0, 100.0)
            }
        );

        let report = tick(&mut state, &mut InputSnapshot::release(DVec2::new(150.0, 100.0)));
        assert_eq!(report.flick, FlickOutcome::Released);
        let launched = report.launched.unwrap();
        assert!((launched - DVec2::new(-5.0, 0.0)).length() < 1e-9);
        // Same tick: moved by the launch velocity, then drag
        assert!((state.marble.pos.x - 95.0).abs() < 1e-9);
        assert!((state.marble.vel.x + 4.75).abs() < 1e-9);
        assert!(!state.flick.impulse_ready());

        let mut last_x = state.marble.pos.x;
        let mut bounced_at = None;
        for n in 0..40 {
            let report = idle(&mut state);
            assert!(state.marble.pos.x >= 60.0);
            assert_eq!(state.marble.pos.y, 100.0);
            if report.bounce.x {
                bounced_at = Some(n);
                break;
            }
            assert!(state.marble.pos.x < last_x);
            last_x = state.marble.pos.x;
        }

        assert!(bounced_at.is_some());
        assert!(state.marble.vel.x > 0.0);
        assert_eq!(state.marble.vel.y, 0.0);
    }

    #[test]
    fn test_flick_replaces_velocity() {
        let mut state = new_state();
        state.marble.pos = DVec2::new(400.0, 300.0);
        state.marble.vel = DVec2::new(0.0, 7.0);

        tick(&mut state, &mut InputSnapshot::press(DVec2::ZERO));
        let report = tick(&mut state, &mut InputSnapshot::release(DVec2::new(0.0, -100.0)));
        let launched = report.launched.unwrap();
        assert!((launched - DVec2::new(0.0, 10.0)).length() < 1e-9);
        assert!((state.marble.vel - DVec2::new(0.0, 9.5)).length() < 1e-9);
    }

    #[test]
    fn test_weak_flick_keeps_marble_still() {
        let mut state = new_state();
        tick(&mut state, &mut InputSnapshot::press(DVec2::new(100.0, 100.0)));
        let report = tick(&mut state, &mut InputSnapshot::release(DVec2::new(110.0, 100.0)));
        assert_eq!(report.flick, FlickOutcome::Weak);
        assert_eq!(report.launched, None);
        assert_eq!(state.marble.vel, DVec2::ZERO);
    }

    #[test]
    fn test_one_impulse_per_release() {
        let mut state = new_state();
        state.marble.pos = DVec2::new(400.0, 300.0);
        tick(&mut state, &mut InputSnapshot::press(DVec2::ZERO));
        let first = tick(&mut state, &mut InputSnapshot::release(DVec2::new(0.0, 50.0)));
        assert!(first.launched.is_some());
        let again = tick(&mut state, &mut InputSnapshot::release(DVec2::new(0.0, 50.0)));
        assert_eq!(again.launched, None);
    }

    #[test]
    fn test_launch_speed_clamped() {
        let mut state = new_state();
        state.marble.pos = DVec2::new(400.0, 300.0);
        tick(&mut state, &mut InputSnapshot::press(DVec2::ZERO));
        let report = tick(&mut state, &mut InputSnapshot::release(DVec2::new(3000.0, 4000.0)));
        let (_, fast) = state.tuning.flick_speed_range();
        assert!((report.launched.unwrap().length() - fast).abs() < 1e-9);
    }

    #[test]
    fn test_determinism() {
        let inputs = [
            InputSnapshot::press(DVec2::new(300.0, 300.0)),
            InputSnapshot::hover(DVec2::new(350.0, 320.0)),
            InputSnapshot::release(DVec2::new(420.0, 360.0)),
            InputSnapshot::default(),
            InputSnapshot::default(),
        ];

        let mut state1 = new_state();
        let mut state2 = new_state();
        for _ in 0..20 {
            for input in &inputs {
                tick(&mut state1, &mut input.clone());
                tick(&mut state2, &mut input.clone());
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.marble, state2.marble);
        assert_eq!(state1.camera, state2.camera);
    }

    #[test]
    fn test_camera_settles_on_resting_marble() {
        let mut state = new_state();
        for _ in 0..300 {
            idle(&mut state);
        }
        assert!((state.camera.pos - state.marble.pos).length() < 1e-6);
    }
}
