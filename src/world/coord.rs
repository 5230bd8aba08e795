//! Axial hex coordinates.
//!
//! Grid cells are addressed by `(q, r)` axial coordinates. The grid itself
//! only needs bounds checks; neighbour, distance and pixel conversions are
//! provided for the collaborators that place things on screen.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

const SQRT_3: f32 = 1.732_051;

/// Orientation of hexagons when converting to pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HexLayout {
    /// Pointy-top hexagons (rows offset horizontally).
    #[default]
    Pointy,
    /// Flat-top hexagons (columns offset vertically).
    Flat,
}

/// An axial coordinate on the hex grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HexCoord {
    /// Axial q.
    pub q: i32,
    /// Axial r.
    pub r: i32,
}

impl HexCoord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Convert to cube coordinates `(x, y, z)` with `x + y + z == 0`.
    ///
    /// Widened to `i64` so every axial coordinate has a cube form.
    #[must_use]
    #[allow(clippy::cast_lossless)]
    pub const fn to_cube(self) -> (i64, i64, i64) {
        let q = self.q as i64;
        let r = self.r as i64;
        (q, -q - r, r)
    }

    /// The six neighbouring coordinates, starting east and turning
    /// counter-clockwise. Neighbours are not bounds-checked.
    ///
    /// At the edge of the `i32` range a step saturates, so the neighbour
    /// there repeats the coordinate itself.
    #[must_use]
    pub const fn neighbors(self) -> [HexCoord; 6] {
        let Self { q, r } = self;
        [
            HexCoord::new(q.saturating_add(1), r),
            HexCoord::new(q.saturating_add(1), r.saturating_sub(1)),
            HexCoord::new(q, r.saturating_sub(1)),
            HexCoord::new(q.saturating_sub(1), r),
            HexCoord::new(q.saturating_sub(1), r.saturating_add(1)),
            HexCoord::new(q, r.saturating_add(1)),
        ]
    }

    /// Distance to another coordinate in hex steps.
    #[must_use]
    pub const fn distance(self, other: HexCoord) -> i64 {
        let (x1, y1, z1) = self.to_cube();
        let (x2, y2, z2) = other.to_cube();
        ((x1 - x2).abs() + (y1 - y2).abs() + (z1 - z2).abs()) / 2
    }

    /// Centre of this hex in pixel space for hexes of the given `size`
    /// (centre-to-corner distance).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_pixel(self, layout: HexLayout, size: f32) -> Vec2 {
        let q = self.q as f32;
        let r = self.r as f32;
        match layout {
            HexLayout::Pointy => Vec2::new(
                size * (SQRT_3 * q + SQRT_3 / 2.0 * r),
                size * (1.5 * r),
            ),
            HexLayout::Flat => Vec2::new(
                size * (1.5 * q),
                size * (SQRT_3 / 2.0 * q + SQRT_3 * r),
            ),
        }
    }
}

impl fmt::Display for HexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.q, self.r)
    }
}
