//! Game tuning knobs
//!
//! Every knob is a plain scalar. Missing fields in a tuning file fall back to
//! the defaults in [`crate::consts`].

use std::time::Duration;

use glam::DVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Tuning load/validation failures
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tuning `{name}` = {value} is out of range ({expected})")]
    OutOfRange {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },
}

/// Simulation balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Flick ===
    /// Release displacement must exceed this to launch
    pub flick_power_min: f64,
    /// Release displacement is capped here
    pub flick_power_max: f64,
    /// Displacement-to-velocity gain
    pub flick_power: f64,

    // === Motion ===
    /// Per-tick drag multiplier, in (0, 1)
    pub resistance: f64,

    // === Marble ===
    pub marble_radius: f64,
    /// Inner circle radius as a fraction of `marble_radius`
    pub visual_inset_ratio: f64,
    pub spawn: DVec2,

    // === Camera ===
    pub camera_smoothness: f64,

    // === Driver ===
    /// Ticks per second
    pub tick_rate: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            flick_power_min: FLICK_POWER_MIN,
            flick_power_max: FLICK_POWER_MAX,
            flick_power: FLICK_POWER,

            resistance: RESISTANCE,

            marble_radius: MARBLE_RADIUS,
            visual_inset_ratio: MARBLE_INSIDE_RATIO,
            spawn: DVec2::new(MARBLE_SPAWN.0, MARBLE_SPAWN.1),

            camera_smoothness: CAMERA_SMOOTHNESS,

            tick_rate: TICK_RATE,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON tuning file and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!("Loaded tuning");
        Ok(tuning)
    }

    /// Check every knob is in the range the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        fn check(
            name: &'static str,
            value: f64,
            ok: bool,
            expected: &'static str,
        ) -> Result<(), TuningError> {
            if value.is_finite() && ok {
                Ok(())
            } else {
                Err(TuningError::OutOfRange {
                    name,
                    value,
                    expected,
                })
            }
        }

        check(
            "flick_power_min",
            self.flick_power_min,
            self.flick_power_min > 0.0,
            "> 0",
        )?;
        check(
            "flick_power_max",
            self.flick_power_max,
            self.flick_power_max >= self.flick_power_min,
            ">= flick_power_min",
        )?;
        check("flick_power", self.flick_power, self.flick_power > 0.0, "> 0")?;
        let (_, fastest) = self.flick_speed_range();
        check(
            "flick_power_max * flick_power",
            fastest,
            fastest <= FLICK_SPEED_CAP,
            "<= 1000",
        )?;
        check(
            "resistance",
            self.resistance,
            self.resistance > 0.0 && self.resistance < 1.0,
            "in (0, 1)",
        )?;
        check(
            "marble_radius",
            self.marble_radius,
            self.marble_radius > 0.0,
            "> 0",
        )?;
        check(
            "visual_inset_ratio",
            self.visual_inset_ratio,
            (0.0..=1.0).contains(&self.visual_inset_ratio),
            "in [0, 1]",
        )?;
        check("spawn.x", self.spawn.x, true, "finite")?;
        check("spawn.y", self.spawn.y, true, "finite")?;
        check(
            "camera_smoothness",
            self.camera_smoothness,
            self.camera_smoothness >= 0.0,
            ">= 0",
        )?;
        check("tick_rate", self.tick_rate, self.tick_rate > 0.0, "> 0")?;
        Ok(())
    }

    /// Period between ticks for the outer driver
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_rate)
    }

    /// Slowest and fastest speeds a flick can launch at
    pub fn flick_speed_range(&self) -> (f64, f64) {
        (
            self.flick_power_min * self.flick_power,
            self.flick_power_max * self.flick_power,
        )
    }
}
