//! D-pad state and the world displacement it asks for.

use bitflags::bitflags;
use embedded_graphics::prelude::Point;

bitflags! {
    /// Directional buttons currently held down.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Buttons: u8 {
        const UP = 1 << 0;
        const DOWN = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Buttons {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Buttons({=u8:b})", self.bits())
    }
}

impl Buttons {
    /// Builds the mask from four "is pressed" readings.
    pub fn from_pressed(up: bool, down: bool, left: bool, right: bool) -> Self {
        let mut buttons = Buttons::empty();
        buttons.set(Buttons::UP, up);
        buttons.set(Buttons::DOWN, down);
        buttons.set(Buttons::LEFT, left);
        buttons.set(Buttons::RIGHT, right);
        buttons
    }
}

/// Candidate world displacement for this frame, before any collision.
///
/// The world moves opposite to the player: holding Right shifts the world
/// left. Right wins over Left and Up wins over Down when both are held.
pub fn candidate_delta(buttons: Buttons, speed: i32) -> Point {
    let dx = if buttons.contains(Buttons::RIGHT) {
        -speed
    } else if buttons.contains(Buttons::LEFT) {
        speed
    } else {
        0
    };
    let dy = if buttons.contains(Buttons::UP) {
        speed
    } else if buttons.contains(Buttons::DOWN) {
        -speed
    } else {
        0
    };
    Point::new(dx, dy)
}
