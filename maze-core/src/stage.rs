//! Stage: composites the session's sprites over a tiled floor.
//!
//! Layers, front to back: message text, player, walls, enemies, goal, floor.
//! Each pixel takes the first opaque sprite pixel, else the floor tile. The
//! stage remembers what it drew last time, so an incremental render only
//! repaints the old and new rectangles of sprites that changed.

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PointsIter, Rectangle};
use embedded_graphics::text::{Alignment, Text};
use heapless::Vec;

use crate::bank::Bank;
use crate::session::{GameSession, Step};
use crate::sprite::Sprite;
use crate::world::{MAX_ENEMIES, MAX_WALLS};
use crate::{FLOOR_FRAME, GRID_H, GRID_W, TILE};

/// Player, walls, enemies and the goal.
pub const MAX_SPRITES: usize = 1 + MAX_WALLS + MAX_ENEMIES + 1;
/// Sprites that can cover one area at the same time.
const MAX_STACK: usize = 16;

/// Anchor of the message text (centred horizontally).
pub const TEXT_POS: Point = Point::new(80, 24);

pub struct Stage<'a> {
    bank: Bank<'a>,
    floor: u8,
    text_style: MonoTextStyle<'static, Rgb565>,
    /// Sprites as they were on screen after the last render.
    drawn: Vec<Sprite, MAX_SPRITES>,
}

impl<'a> Stage<'a> {
    pub fn new(bank: Bank<'a>) -> Self {
        Self {
            bank,
            floor: FLOOR_FRAME,
            text_style: MonoTextStyleBuilder::new()
                .font(&FONT_6X10)
                .text_color(Rgb565::WHITE)
                .background_color(Rgb565::BLACK)
                .build(),
            drawn: Vec::new(),
        }
    }

    /// Draws the frame `step` just produced.
    ///
    /// The frame that ends the game gets a full redraw so the message is on
    /// screen; every other frame only repaints what changed.
    pub fn render_step<D>(&mut self, target: &mut D, session: &GameSession, step: &Step) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if step.finished {
            self.render_block(target, session)
        } else {
            self.render_sprites(target, session)
        }
    }

    /// Redraws the whole screen, one tile at a time.
    pub fn render_block<D>(&mut self, target: &mut D, session: &GameSession) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        for row in 0..GRID_H {
            for col in 0..GRID_W {
                let cell = Rectangle::new(
                    Point::new(col * TILE, row * TILE),
                    Size::new(TILE as u32, TILE as u32),
                );
                self.composite(target, session, cell)?;
            }
        }
        self.draw_text(target, session)?;
        self.remember(session);
        Ok(())
    }

    /// Repaints only where a sprite moved or changed frame since the last
    /// render.
    pub fn render_sprites<D>(&mut self, target: &mut D, session: &GameSession) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let text_box = self.text(session).map(|t| t.bounding_box());
        let mut text_dirty = false;

        for (i, sprite) in session.sprites().enumerate() {
            let last = self.drawn.get(i).copied();
            if last == Some(*sprite) {
                continue;
            }
            let old = last.map(|s| s.bounding_box());
            for area in old.into_iter().chain(core::iter::once(sprite.bounding_box())) {
                self.composite(target, session, area)?;
                if let Some(text_box) = text_box {
                    text_dirty |= !text_box.intersection(&area).is_zero_sized();
                }
            }
        }

        if text_dirty {
            self.draw_text(target, session)?;
        }
        self.remember(session);
        Ok(())
    }

    fn composite<D>(&self, target: &mut D, session: &GameSession, area: Rectangle) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let area = area.intersection(&target.bounding_box());
        if area.is_zero_sized() {
            return Ok(());
        }

        let mut stack: Vec<Sprite, MAX_STACK> = Vec::new();
        for sprite in session.sprites() {
            if sprite.bounding_box().intersection(&area).is_zero_sized() {
                continue;
            }
            if stack.push(*sprite).is_err() {
                log::warn!("more than {} sprites overlap, dropping the rest", MAX_STACK);
                break;
            }
        }

        target.fill_contiguous(&area, area.points().map(|p| self.color_at(&stack, p)))
    }

    fn color_at(&self, stack: &[Sprite], p: Point) -> Rgb565 {
        for sprite in stack {
            let local = p - sprite.position();
            if let Some(color) = self.bank.pixel(sprite.frame(), local.x, local.y) {
                return color;
            }
        }
        self.bank
            .pixel(self.floor, p.x.rem_euclid(TILE), p.y.rem_euclid(TILE))
            .unwrap_or(Rgb565::BLACK)
    }

    fn text(&self, session: &GameSession) -> Option<Text<'static, MonoTextStyle<'static, Rgb565>>> {
        session
            .message()
            .map(|msg| Text::with_alignment(msg, TEXT_POS, self.text_style, Alignment::Center))
    }

    fn draw_text<D>(&self, target: &mut D, session: &GameSession) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if let Some(text) = self.text(session) {
            text.draw(target)?;
        }
        Ok(())
    }

    fn remember(&mut self, session: &GameSession) {
        self.drawn.clear();
        for sprite in session.sprites() {
            if self.drawn.push(*sprite).is_err() {
                break;
            }
        }
    }
}
