//! 2D vector algebra
//!
//! `glam::DVec2` already covers add/sub/scale (`+`, `-`, `*`), `dot` and
//! `length`. The helpers here fill in the rest with value semantics: nothing
//! mutates its input, every function is an O(1) pure computation.

use glam::DVec2;
use thiserror::Error;

/// 2D vector used throughout the simulation (y-up)
pub type Vector2 = DVec2;

pub const ZERO: Vector2 = DVec2::ZERO;
pub const ONE: Vector2 = DVec2::ONE;
pub const RIGHT: Vector2 = DVec2::X;
pub const LEFT: Vector2 = DVec2::NEG_X;
pub const UP: Vector2 = DVec2::Y;
pub const DOWN: Vector2 = DVec2::NEG_Y;

/// Vector algebra failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VectorError {
    /// Normalizing a zero-length vector
    #[error("cannot normalize a zero-length vector")]
    DivideByZero,
}

/// Scalar z component of the 3D cross product of `a` and `b`
#[inline]
pub fn cross(a: Vector2, b: Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Negated vector
#[inline]
pub fn inverse(v: Vector2) -> Vector2 {
    -v
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vector2, b: Vector2) -> f64 {
    (a - b).length()
}

/// Unit vector pointing along `v`
///
/// Fails with [`VectorError::DivideByZero`] when `v` has zero magnitude.
pub fn normalized(v: Vector2) -> Result<Vector2, VectorError> {
    let magnitude = v.length();
    if magnitude == 0.0 {
        return Err(VectorError::DivideByZero);
    }
    Ok(v / magnitude)
}

/// Rotate `v` counter-clockwise by `theta` radians
#[inline]
pub fn rotate(v: Vector2, theta: f64) -> Vector2 {
    let (sin, cos) = theta.sin_cos();
    DVec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Rescale `v` to the nearest magnitude within `[min, max]`, keeping its
/// direction. A zero vector has no direction and comes back as zero.
///
/// Never panics: if `min > max`, `max` wins.
pub fn clamp_magnitude(v: Vector2, min: f64, max: f64) -> Vector2 {
    match normalized(v) {
        Ok(direction) => direction * v.length().max(min).min(max),
        Err(VectorError::DivideByZero) => ZERO,
    }
}

/// True when `a` and `b` lie on the same line through the origin
#[inline]
pub fn is_parallel(a: Vector2, b: Vector2) -> bool {
    cross(a, b) == 0.0
}

/// True when `a` and `b` are at right angles
#[inline]
pub fn is_perpendicular(a: Vector2, b: Vector2) -> bool {
    a.dot(b) == 0.0
}
