//! Blinka maze - game logic for a 160x128 handheld.
//!
//! The player sprite stays pinned at the middle of the screen and the world
//! scrolls under it. Three rule sets build on each other:
//!   Room   = static walled room, animated player
//!   Scroll = same room, d-pad scrolls the world
//!   Maze   = walls clamp movement, enemies lose the game, the goal wins it
//!
//! Everything here is `no_std` and draws through `embedded_graphics`, so the
//! firmware and the host tests share the same code.

#![cfg_attr(not(test), no_std)]

pub mod bank;
pub mod collision;
pub mod config;
pub mod geometry;
pub mod input;
pub mod session;
pub mod sprite;
pub mod stage;
pub mod world;

#[cfg(test)]
mod testutils;

pub use bank::{Bank, BankError};
pub use config::Config;
pub use input::Buttons;
pub use session::{GameSession, GameState, Rules, Step};
pub use sprite::Sprite;
pub use stage::Stage;
pub use world::World;

// --- Screen ---
pub const SCREEN_W: i32 = 160;
pub const SCREEN_H: i32 = 128;

// --- Tiles ---
pub const TILE: i32 = 16;
pub const GRID_W: i32 = SCREEN_W / TILE;
pub const GRID_H: i32 = SCREEN_H / TILE;

// --- Bank frames ---
pub const FLOOR_FRAME: u8 = 0;
pub const PLAYER_FRAME: u8 = 1;
pub const PLAYER_FRAME_COUNT: u8 = 2;
pub const ROOM_WALL_FRAME: u8 = 3;
pub const MAZE_WALL_FRAME: u8 = 5;
pub const ENEMY_FRAME: u8 = 6;
pub const GOAL_FRAME: u8 = 7;
