//! Hitboxes for overlap tests.

use embedded_graphics::prelude::*;

use crate::TILE;

/// Axis-aligned box covering `[x0, x1] x [y0, y1]`, edges included.
///
/// A tile spans `x0..=x0 + 16`, so neighbouring tiles share an edge and
/// count as touching. Built on the fly for each test; sprites only store
/// their top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Hitbox {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Hitbox {
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Full 16x16 box of a tile whose top-left corner is `top_left`.
    pub const fn tile(top_left: Point) -> Self {
        Self::new(top_left.x, top_left.y, top_left.x + TILE, top_left.y + TILE)
    }

    /// Shrinks the box by `dx` on the left and right, `dy` on the top and bottom.
    pub const fn inset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x0 + dx, self.y0 + dy, self.x1 - dx, self.y1 - dy)
    }

    pub const fn shifted(self, by: Point) -> Self {
        Self::new(self.x0 + by.x, self.y0 + by.y, self.x1 + by.x, self.y1 + by.y)
    }

    /// Boxes that only share an edge or a corner still overlap.
    pub const fn overlaps(&self, other: &Hitbox) -> bool {
        self.x0 <= other.x1 && other.x0 <= self.x1 && self.y0 <= other.y1 && other.y0 <= self.y1
    }
}
