//! Flick Marble - simulation core for a single-screen marble flicking game
//!
//! Core modules:
//! - `vector`: 2D vector helpers on top of `glam::DVec2`
//! - `geometry`: Point/rect/circle predicates used by the collision resolver
//! - `stage`: Static wall layouts, loaded once per session
//! - `tuning`: Data-driven game balance
//! - `sim`: Deterministic simulation (flick input, motion, collisions, camera)
//! - `renderer`: Abstract draw pass for an external canvas

pub mod geometry;
pub mod renderer;
pub mod sim;
pub mod stage;
pub mod tuning;
pub mod vector;

pub use geometry::WallRect;
pub use stage::{Stage, StageError, StageSet};
pub use tuning::{Tuning, TuningError};
pub use vector::{Vector2, VectorError};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Reference tick rate of the outer driver (ticks per second)
    pub const TICK_RATE: f64 = 60.0;

    /// Release displacement must be strictly greater than this to flick
    pub const FLICK_POWER_MIN: f64 = 10.0;
    /// Release displacement is clamped to this before the gain is applied
    pub const FLICK_POWER_MAX: f64 = 200.0;
    /// Gain from release displacement to marble speed (units/tick)
    pub const FLICK_POWER: f64 = 0.1;
    /// Upper bound on `FLICK_POWER_MAX * FLICK_POWER`; also bounds the
    /// collision sub-steps per tick
    pub const FLICK_SPEED_CAP: f64 = 1000.0;

    /// Per-tick velocity multiplier
    pub const RESISTANCE: f64 = 0.95;

    /// Marble defaults
    pub const MARBLE_RADIUS: f64 = 20.0;
    pub const MARBLE_INSIDE_RATIO: f64 = 0.8;
    pub const MARBLE_SPAWN: (f64, f64) = (100.0, 100.0);

    /// Higher is lazier camera tracking
    pub const CAMERA_SMOOTHNESS: f64 = 5.0;

    /// Stage selected when none is named
    pub const DEFAULT_STAGE: &str = "dev";
}
