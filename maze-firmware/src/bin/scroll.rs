//! Blinka Maze, scroll version: the room scrolls with the d-pad.

#![no_std]
#![no_main]

use embassy_executor::Spawner;
use maze_core::Rules;
use {defmt_rtt as _, panic_probe as _};

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    maze_firmware::run(spawner, Rules::Scroll).await;
}
