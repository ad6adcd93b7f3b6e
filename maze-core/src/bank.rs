//! Sprite bank: a column of 16x16 frames stored as a BMP image.
//!
//! The embedded asset is `img/sprites.bmp`, 16 pixels wide and 16 pixels
//! tall per frame. Frame `n` is rows `16n..16n+16`. Magenta is transparent.

use core::fmt;

use embedded_graphics::image::GetPixel;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use tinybmp::{Bmp, ParseError};

use crate::TILE;

/// Cut-out colour, magenta in RGB565.
pub const TRANSPARENT: Rgb565 = Rgb565::new(31, 0, 31);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BankError {
    /// Not a BMP tinybmp can read.
    Image(ParseError),
    /// Width is not one tile.
    BadWidth(u32),
    /// Height is zero or not a whole number of tiles.
    BadHeight(u32),
}

impl From<ParseError> for BankError {
    fn from(e: ParseError) -> Self {
        BankError::Image(e)
    }
}

impl fmt::Display for BankError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BankError::Image(e) => write!(f, "bank image: {e:?}"),
            BankError::BadWidth(w) => write!(f, "bank width {w}, expected {TILE}"),
            BankError::BadHeight(h) => write!(f, "bank height {h} is not a multiple of {TILE}"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for BankError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            BankError::Image(e) => defmt::write!(f, "bank image: {}", defmt::Debug2Format(e)),
            BankError::BadWidth(w) => defmt::write!(f, "bank width {}", w),
            BankError::BadHeight(h) => defmt::write!(f, "bank height {}", h),
        }
    }
}

/// Parsed view over an embedded bank image.
#[derive(Debug)]
pub struct Bank<'a> {
    image: Bmp<'a, Rgb565>,
    frames: usize,
}

impl<'a> Bank<'a> {
    pub fn new(data: &'a [u8]) -> Result<Self, BankError> {
        let image = Bmp::<Rgb565>::from_slice(data)?;
        let Size { width, height } = image.size();
        if width != TILE as u32 {
            return Err(BankError::BadWidth(width));
        }
        if height == 0 || height % TILE as u32 != 0 {
            return Err(BankError::BadHeight(height));
        }

        Ok(Self {
            image,
            frames: (height / TILE as u32) as usize,
        })
    }

    pub fn frame_count(&self) -> usize {
        self.frames
    }

    /// Colour at `(x, y)` inside `frame`; `None` where the frame is
    /// transparent or the coordinates fall outside it.
    pub fn pixel(&self, frame: u8, x: i32, y: i32) -> Option<Rgb565> {
        if usize::from(frame) >= self.frames || !(0..TILE).contains(&x) || !(0..TILE).contains(&y) {
            return None;
        }
        self.image
            .pixel(Point::new(x, i32::from(frame) * TILE + y))
            .filter(|&c| c != TRANSPARENT)
    }
}
