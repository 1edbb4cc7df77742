//! Motion integration and wall collision
//!
//! The marble moves by its full velocity each tick when the destination is
//! clear. Otherwise the move is split into sub-steps of under one unit and each
//! axis is tested separately, so a fast marble cannot skip over a thin wall.
//! A hit on an axis flips that velocity component and parks the marble at the
//! last clear sub-step.

use glam::DVec2;

use super::state::Marble;
use crate::geometry::WallRect;

/// Which axes bounced during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bounce {
    pub x: bool,
    pub y: bool,
}

impl Bounce {
    pub fn any(&self) -> bool {
        self.x || self.y
    }
}

/// Does a circle at `center` overlap any wall
pub fn hits_any_wall<'a>(
    walls: impl IntoIterator<Item = &'a WallRect>,
    center: DVec2,
    radius: f64,
) -> bool {
    walls
        .into_iter()
        .any(|wall| wall.overlaps_circle(center, radius))
}

/// Number of sub-steps for a move of `speed` units (always at least one)
#[inline]
pub fn sub_step_count(speed: f64) -> usize {
    (speed.floor() as usize).saturating_add(1)
}

/// Move the marble one tick against `walls`, then apply drag
///
/// Every sub-step is tested from the tick-start position along one axis at a
/// time, using the tick-start velocity. An X-axis hit ends the search for
/// this tick immediately; a Y-axis hit does not, but later sub-steps only
/// test X. Corner hits can therefore resolve only the X component.
///
/// When both axes hit, the two parked coordinates were never tested together.
/// If that combined position overlaps a wall, the Y coordinate falls back to
/// its tick-start value so the marble ends on a tested position. A marble
/// that starts clear of every wall therefore stays clear.
pub fn advance<'a, W>(marble: &mut Marble, walls: W, resistance: f64) -> Bounce
where
    W: IntoIterator<Item = &'a WallRect> + Clone,
{
    let bounce = resolve(marble, walls);
    marble.vel *= resistance;
    bounce
}

fn resolve<'a, W>(marble: &mut Marble, walls: W) -> Bounce
where
    W: IntoIterator<Item = &'a WallRect> + Clone,
{
    let mut bounce = Bounce::default();
    let radius = marble.radius;
    let start = marble.pos;

    let next = start + marble.vel;
    if !hits_any_wall(walls.clone(), next, radius) {
        marble.pos = next;
        return bounce;
    }

    let steps = sub_step_count(marble.vel.length());
    let step = marble.vel / steps as f64;
    for i in 1..=steps {
        let i = i as f64;

        let along_x = DVec2::new(start.x + step.x * i, start.y);
        if hits_any_wall(walls.clone(), along_x, radius) {
            marble.vel.x = -marble.vel.x;
            marble.pos.x = start.x + step.x * (i - 1.0);
            bounce.x = true;
            if bounce.y && hits_any_wall(walls.clone(), marble.pos, radius) {
                marble.pos.y = start.y;
                log::debug!("Corner overlap, keeping y at {:.2}", start.y);
            }
            log::debug!("Bounce on x at ({:.2}, {:.2})", marble.pos.x, marble.pos.y);
            return bounce;
        }

        if bounce.y {
            continue;
        }
        let along_y = DVec2::new(start.x, start.y + step.y * i);
        if hits_any_wall(walls.clone(), along_y, radius) {
            marble.vel.y = -marble.vel.y;
            marble.pos.y = start.y + step.y * (i - 1.0);
            bounce.y = true;
            log::debug!("Bounce on y at ({:.2}, {:.2})", marble.pos.x, marble.pos.y);
        }
    }

    bounce
}
