//! Point, rectangle and circle predicates
//!
//! The tests are written as scalar math on plain `f64` coordinates so they
//! work for any pairing of shapes; the `DVec2` wrappers are a convenience for
//! the resolver.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned wall rectangle
///
/// Serialized as `[origin_x, origin_y, size_x, size_y]`, the layout stage
/// files use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct WallRect {
    pub origin_x: f64,
    pub origin_y: f64,
    pub size_x: f64,
    pub size_y: f64,
}

impl WallRect {
    pub const fn new(origin_x: f64, origin_y: f64, size_x: f64, size_y: f64) -> Self {
        Self {
            origin_x,
            origin_y,
            size_x,
            size_y,
        }
    }

    #[inline]
    pub fn min_x(&self) -> f64 {
        self.origin_x
    }

    #[inline]
    pub fn max_x(&self) -> f64 {
        self.origin_x + self.size_x
    }

    #[inline]
    pub fn min_y(&self) -> f64 {
        self.origin_y
    }

    #[inline]
    pub fn max_y(&self) -> f64 {
        self.origin_y + self.size_y
    }

    /// Point on (or in) the rectangle closest to `(x, y)`
    #[inline]
    pub fn nearest_point(&self, x: f64, y: f64) -> (f64, f64) {
        (
            x.max(self.min_x()).min(self.max_x()),
            y.max(self.min_y()).min(self.max_y()),
        )
    }

    pub fn contains(&self, point: DVec2) -> bool {
        point_in_rect(self, point.x, point.y)
    }

    pub fn overlaps_circle(&self, center: DVec2, radius: f64) -> bool {
        rect_overlaps_circle(self, center.x, center.y, radius)
    }
}

impl From<[f64; 4]> for WallRect {
    fn from([x, y, w, h]: [f64; 4]) -> Self {
        Self::new(x, y, w, h)
    }
}

impl From<WallRect> for [f64; 4] {
    fn from(rect: WallRect) -> Self {
        [rect.origin_x, rect.origin_y, rect.size_x, rect.size_y]
    }
}

/// Is `(x, y)` inside the rectangle, edges included
#[inline]
pub fn point_in_rect(rect: &WallRect, x: f64, y: f64) -> bool {
    x >= rect.min_x() && x <= rect.max_x() && y >= rect.min_y() && y <= rect.max_y()
}

/// Is `(x, y)` inside the circle, boundary included
#[inline]
pub fn point_in_circle(center_x: f64, center_y: f64, radius: f64, x: f64, y: f64) -> bool {
    let dx = x - center_x;
    let dy = y - center_y;
    dx * dx + dy * dy <= radius * radius
}

/// Does the circle overlap the rectangle
///
/// True if the rectangle holds the circle's center, or the nearest point of
/// the rectangle is strictly closer than `radius`. A circle exactly touching
/// an edge does not overlap.
pub fn rect_overlaps_circle(rect: &WallRect, center_x: f64, center_y: f64, radius: f64) -> bool {
    if point_in_rect(rect, center_x, center_y) {
        return true;
    }
    let (near_x, near_y) = rect.nearest_point(center_x, center_y);
    let dx = center_x - near_x;
    let dy = center_y - near_y;
    dx * dx + dy * dy < radius * radius
}
