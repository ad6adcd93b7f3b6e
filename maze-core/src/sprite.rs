use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::TILE;
use crate::geometry::Hitbox;

/// A 16x16 bank frame drawn with its top-left corner at `position`.
///
/// Moving a sprite is a single write; the stage remembers where it drew the
/// sprite last time and erases that area itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sprite {
    frame: u8,
    position: Point,
}

impl Sprite {
    pub const fn new(frame: u8, x: i32, y: i32) -> Self {
        Self {
            frame,
            position: Point::new(x, y),
        }
    }

    pub const fn frame(&self) -> u8 {
        self.frame
    }

    pub fn set_frame(&mut self, frame: u8) {
        self.frame = frame;
    }

    pub const fn position(&self) -> Point {
        self.position
    }

    pub fn translate(&mut self, by: Point) {
        self.position += by;
    }

    pub const fn hitbox(&self) -> Hitbox {
        Hitbox::tile(self.position)
    }

    /// Screen area the sprite covers.
    pub fn bounding_box(&self) -> Rectangle {
        Rectangle::new(self.position, Size::new(TILE as u32, TILE as u32))
    }
}
