use crate::session::Rules;

/// Default world displacement per frame while a direction is held.
pub const MOVE_SPEED: i32 = 6;

/// Per-version tuning. Everything is fixed at compile time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Maximum frame rate; the frame loop sleeps out the rest of each period.
    pub fps: u32,
    pub move_speed: i32,
}

impl Config {
    pub const fn for_rules(rules: Rules) -> Self {
        match rules {
            Rules::Room => Self {
                fps: 6,
                move_speed: 0,
            },
            Rules::Scroll | Rules::Maze => Self {
                fps: 12,
                move_speed: MOVE_SPEED,
            },
        }
    }

    /// Length of one frame in milliseconds.
    pub const fn frame_period_ms(&self) -> u64 {
        if self.fps == 0 {
            1000
        } else {
            1000 / self.fps as u64
        }
    }
}
