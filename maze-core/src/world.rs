//! Everything that scrolls: walls, enemies and the goal.

use core::fmt;

use embedded_graphics::prelude::*;
use heapless::Vec;

use crate::session::PLAYER_SCREEN_POS;
use crate::sprite::Sprite;
use crate::{ENEMY_FRAME, GOAL_FRAME, MAZE_WALL_FRAME, ROOM_WALL_FRAME, TILE};

pub const MAX_WALLS: usize = 160;
pub const MAX_ENEMIES: usize = 8;

/// Maze drawn one character per tile:
///   `#` wall, `E` enemy, `G` goal, `P` player start, `.` floor.
pub const MAZE_LAYOUT: [&str; 16] = [
    "####################",
    "#P.....#...........#",
    "#......#...E.......#",
    "#..##..#..####..####",
    "#..#.......#.......#",
    "#..#.......#...E...#",
    "#..#####...#..###..#",
    "#......#......#....#",
    "#......#......#....#",
    "####...####...#..###",
    "#......E......#....#",
    "#.............#....#",
    "#..######..####....#",
    "#.......#.......#..#",
    "#.......#.......#G.#",
    "####################",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LayoutError {
    TooManyWalls,
    TooManyEnemies,
    DuplicateGoal,
    MissingStart,
    UnknownTile(char),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::TooManyWalls => write!(f, "more than {MAX_WALLS} walls"),
            LayoutError::TooManyEnemies => write!(f, "more than {MAX_ENEMIES} enemies"),
            LayoutError::DuplicateGoal => write!(f, "layout has more than one goal"),
            LayoutError::MissingStart => write!(f, "layout has no player start"),
            LayoutError::UnknownTile(c) => write!(f, "unknown layout tile {c:?}"),
        }
    }
}

/// The scrolling part of the scene. All sprites move together.
#[derive(Clone, Debug, Default)]
pub struct World {
    walls: Vec<Sprite, MAX_WALLS>,
    enemies: Vec<Sprite, MAX_ENEMIES>,
    goal: Option<Sprite>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// The 20x20 tile room: a wall column down each side and a wall row
    /// along the top and bottom.
    ///
    /// The loops stop one tile short at the bottom of each column and leave
    /// the top and bottom rows open next to the right column.
    pub fn room() -> Result<Self, LayoutError> {
        let mut world = World::new();
        for y in (0..304).step_by(TILE as usize) {
            world.add_wall(Sprite::new(ROOM_WALL_FRAME, 0, y))?;
            world.add_wall(Sprite::new(ROOM_WALL_FRAME, 304, y))?;
        }
        for x in (16..288).step_by(TILE as usize) {
            world.add_wall(Sprite::new(ROOM_WALL_FRAME, x, 0))?;
            world.add_wall(Sprite::new(ROOM_WALL_FRAME, x, 304))?;
        }
        Ok(world)
    }

    pub fn maze() -> Result<Self, LayoutError> {
        Self::from_layout(&MAZE_LAYOUT)
    }

    /// Builds a world from character rows, placed so that the `P` tile sits
    /// under the player's fixed screen position.
    pub fn from_layout(rows: &[&str]) -> Result<Self, LayoutError> {
        let (start_col, start_row) = find_start(rows).ok_or(LayoutError::MissingStart)?;
        let origin = PLAYER_SCREEN_POS - Point::new(start_col * TILE, start_row * TILE);

        let mut world = World::new();
        for (row, line) in (0i32..).zip(rows) {
            for (col, tile) in (0i32..).zip(line.chars()) {
                let x = origin.x + col * TILE;
                let y = origin.y + row * TILE;
                match tile {
                    '#' => world.add_wall(Sprite::new(MAZE_WALL_FRAME, x, y))?,
                    'E' => world.add_enemy(Sprite::new(ENEMY_FRAME, x, y))?,
                    'G' => world.set_goal(Sprite::new(GOAL_FRAME, x, y))?,
                    '.' | 'P' | ' ' => {}
                    other => return Err(LayoutError::UnknownTile(other)),
                }
            }
        }
        log::debug!(
            "layout: {} walls, {} enemies, goal {}",
            world.walls.len(),
            world.enemies.len(),
            world.goal.is_some()
        );
        Ok(world)
    }

    pub fn add_wall(&mut self, wall: Sprite) -> Result<(), LayoutError> {
        self.walls.push(wall).map_err(|_| LayoutError::TooManyWalls)
    }

    pub fn add_enemy(&mut self, enemy: Sprite) -> Result<(), LayoutError> {
        self.enemies
            .push(enemy)
            .map_err(|_| LayoutError::TooManyEnemies)
    }

    pub fn set_goal(&mut self, goal: Sprite) -> Result<(), LayoutError> {
        if self.goal.is_some() {
            return Err(LayoutError::DuplicateGoal);
        }
        self.goal = Some(goal);
        Ok(())
    }

    pub fn walls(&self) -> &[Sprite] {
        &self.walls
    }

    pub fn enemies(&self) -> &[Sprite] {
        &self.enemies
    }

    pub fn goal(&self) -> Option<&Sprite> {
        self.goal.as_ref()
    }

    /// Walls, then enemies, then the goal.
    pub fn sprites(&self) -> impl Iterator<Item = &Sprite> {
        self.walls
            .iter()
            .chain(self.enemies.iter())
            .chain(self.goal.iter())
    }

    pub(crate) fn len(&self) -> usize {
        self.walls.len() + self.enemies.len() + usize::from(self.goal.is_some())
    }

    /// Moves every sprite by the same amount.
    pub fn translate(&mut self, by: Point) {
        self.walls
            .iter_mut()
            .chain(self.enemies.iter_mut())
            .chain(self.goal.iter_mut())
            .for_each(|s| s.translate(by));
    }
}

fn find_start(rows: &[&str]) -> Option<(i32, i32)> {
    (0i32..).zip(rows).find_map(|(row, line)| {
        (0i32..)
            .zip(line.chars())
            .find(|&(_, c)| c == 'P')
            .map(|(col, _)| (col, row))
    })
}
