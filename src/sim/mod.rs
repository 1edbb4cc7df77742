//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one call to `tick` per frame of the outer driver)
//! - Single marble, static walls
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod state;
pub mod tick;

pub use collision::{Bounce, advance, hits_any_wall};
pub use input::{FlickOutcome, FlickPhase, FlickState, InputSnapshot, impulse_velocity, screen_to_world};
pub use state::{Camera, Marble, SimulationState};
pub use tick::{TickReport, tick};
