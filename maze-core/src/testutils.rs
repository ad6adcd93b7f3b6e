use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::pixelcolor::{Rgb565, Rgb888};
use embedded_graphics::prelude::*;

use crate::bank::{Bank, TRANSPARENT};
use crate::{SCREEN_H, SCREEN_W, TILE};

/// Solid colour of frame `n` in the test bank.
pub(crate) fn color(frame: u8) -> Rgb565 {
    Rgb565::from(RawU16::new(0x0841 * (u16::from(frame) + 1)))
}

/// Uncompressed 24-bit bottom-up BMP of `width` x `height` pixels.
pub(crate) fn bmp_bytes(width: u32, height: u32, pixel: impl Fn(i32, i32) -> Rgb565) -> Vec<u8> {
    let stride = (width * 3).next_multiple_of(4);
    let image_len = stride * height;
    let offset = 14 + 40;

    let mut data = Vec::new();
    data.extend_from_slice(b"BM");
    data.extend_from_slice(&(offset + image_len).to_le_bytes());
    data.extend_from_slice(&[0; 4]);
    data.extend_from_slice(&offset.to_le_bytes());

    data.extend_from_slice(&40u32.to_le_bytes());
    data.extend_from_slice(&(width as i32).to_le_bytes());
    data.extend_from_slice(&(height as i32).to_le_bytes());
    data.extend_from_slice(&1u16.to_le_bytes());
    data.extend_from_slice(&24u16.to_le_bytes());
    data.extend_from_slice(&0u32.to_le_bytes());
    data.extend_from_slice(&image_len.to_le_bytes());
    data.extend_from_slice(&2835u32.to_le_bytes());
    data.extend_from_slice(&2835u32.to_le_bytes());
    data.extend_from_slice(&0u32.to_le_bytes());
    data.extend_from_slice(&0u32.to_le_bytes());

    for y in (0..height as i32).rev() {
        let row_start = data.len();
        for x in 0..width as i32 {
            let c = Rgb888::from(pixel(x, y));
            data.extend_from_slice(&[c.b(), c.g(), c.r()]);
        }
        data.resize(row_start + stride as usize, 0);
    }
    data
}

/// Eight solid frames. The two player frames keep a 2 px transparent border.
pub(crate) fn bank_bytes() -> Vec<u8> {
    let frames = 8;
    bmp_bytes(TILE as u32, frames * TILE as u32, |x, y| {
        let frame = (y / TILE) as u8;
        let (x, y) = (x, y % TILE);
        let border = !(2..TILE - 2).contains(&x) || !(2..TILE - 2).contains(&y);
        if (frame == 1 || frame == 2) && border {
            TRANSPARENT
        } else {
            color(frame)
        }
    })
}

pub(crate) fn test_bank() -> Bank<'static> {
    Bank::new(bank_bytes().leak()).unwrap()
}

/// Colour no frame of the test bank uses.
pub(crate) const UNPAINTED: Rgb565 = Rgb565::new(31, 0, 0);

/// In-memory screen that counts every pixel written to it.
pub(crate) struct Canvas {
    pixels: Vec<Rgb565>,
    pub writes: usize,
}

impl Canvas {
    pub fn new() -> Self {
        Self {
            pixels: vec![UNPAINTED; (SCREEN_W * SCREEN_H) as usize],
            writes: 0,
        }
    }

    pub fn at(&self, x: i32, y: i32) -> Rgb565 {
        self.pixels[(y * SCREEN_W + x) as usize]
    }

    pub fn all(&self, pred: impl Fn(Rgb565) -> bool) -> bool {
        self.pixels.iter().all(|&c| pred(c))
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        Size::new(SCREEN_W as u32, SCREEN_H as u32)
    }
}

impl DrawTarget for Canvas {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, c) in pixels {
            if (0..SCREEN_W).contains(&p.x) && (0..SCREEN_H).contains(&p.y) {
                self.pixels[(p.y * SCREEN_W + p.x) as usize] = c;
                self.writes += 1;
            }
        }
        Ok(())
    }
}
