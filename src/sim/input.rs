//! Pointer input and the flick state machine
//!
//! A flick is a press, drag and release. The drag direction is pulled back
//! like a slingshot: releasing to the right of the press launches the marble
//! to the left.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;
use crate::vector;

/// Input for a single tick, produced by the platform layer
///
/// `pointer_down`, `pointer_up` and `cancel_requested` are edges: true for
/// exactly one tick per physical event. The tick clears them once read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSnapshot {
    /// Pointer pressed since the last tick
    pub pointer_down: bool,
    /// Pointer released since the last tick
    pub pointer_up: bool,
    /// Latest pointer position (world space, y-up)
    pub pointer_pos: DVec2,
    /// Cancel key pressed since the last tick
    pub cancel_requested: bool,
}

impl InputSnapshot {
    pub fn press(pos: DVec2) -> Self {
        Self {
            pointer_down: true,
            pointer_pos: pos,
            ..Default::default()
        }
    }

    pub fn release(pos: DVec2) -> Self {
        Self {
            pointer_up: true,
            pointer_pos: pos,
            ..Default::default()
        }
    }

    pub fn hover(pos: DVec2) -> Self {
        Self {
            pointer_pos: pos,
            ..Default::default()
        }
    }

    pub fn cancel() -> Self {
        Self {
            cancel_requested: true,
            ..Default::default()
        }
    }

    /// Clear the one-shot edges; the pointer position persists
    pub fn consume_edges(&mut self) {
        self.pointer_down = false;
        self.pointer_up = false;
        self.cancel_requested = false;
    }
}

/// Convert a y-down screen coordinate into the simulation's y-up space
#[inline]
pub fn screen_to_world(screen_x: f64, screen_y: f64, viewport_height: f64) -> DVec2 {
    DVec2::new(screen_x, viewport_height - screen_y)
}

/// Flick charge phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum FlickPhase {
    #[default]
    Idle,
    /// Pointer held since `anchor`
    Charging { anchor: DVec2 },
}

/// What a tick's input did to the flick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlickOutcome {
    /// Nothing happened
    Unchanged,
    /// A charge began (or re-anchored)
    Charged,
    /// The charge was abandoned
    Cancelled,
    /// Released, but the drag was too short to count
    Weak,
    /// Released with enough drag; an impulse is pending
    Released,
}

/// Converts input snapshots into discrete flick impulses
///
/// At most one impulse is delivered per press/release cycle, and a taken
/// impulse is gone for good.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlickState {
    phase: FlickPhase,
    /// Release displacement (release minus anchor) awaiting pickup
    pending: Option<DVec2>,
}

impl FlickState {
    pub fn phase(&self) -> FlickPhase {
        self.phase
    }

    pub fn is_charging(&self) -> bool {
        matches!(self.phase, FlickPhase::Charging { .. })
    }

    pub fn impulse_ready(&self) -> bool {
        self.pending.is_some()
    }

    /// Apply one tick of input
    ///
    /// Transitions run in a fixed order: press, cancel, release. A press always
    /// re-anchors, even mid-charge.
    pub fn update(&mut self, input: &InputSnapshot, power_min: f64) -> FlickOutcome {
        let mut outcome = FlickOutcome::Unchanged;

        if input.pointer_down {
            self.phase = FlickPhase::Charging {
                anchor: input.pointer_pos,
            };
            outcome = FlickOutcome::Charged;
        }

        if input.cancel_requested && self.is_charging() {
            self.phase = FlickPhase::Idle;
            log::debug!("Flick cancelled");
            return FlickOutcome::Cancelled;
        }

        if input.pointer_up {
            if let FlickPhase::Charging { anchor } = self.phase {
                self.phase = FlickPhase::Idle;
                let motion = input.pointer_pos - anchor;
                if motion.length() > power_min {
                    self.pending = Some(motion);
                    outcome = FlickOutcome::Released;
                } else {
                    log::debug!("Flick too weak: {:.2} <= {:.2}", motion.length(), power_min);
                    outcome = FlickOutcome::Weak;
                }
            }
        }

        outcome
    }

    /// Take the pending release displacement, if any
    pub fn take_impulse(&mut self) -> Option<DVec2> {
        self.pending.take()
    }
}

/// Velocity a release displacement launches the marble with
///
/// Points opposite the drag, with the drag length clamped to the flick power
/// range before the gain is applied.
pub fn impulse_velocity(released_motion: DVec2, tuning: &Tuning) -> DVec2 {
    vector::clamp_magnitude(
        vector::inverse(released_motion),
        tuning.flick_power_min,
        tuning.flick_power_max,
    ) * tuning.flick_power
}
