//! Game session: state machine plus the per-frame update.

use embedded_graphics::prelude::Point;

use crate::collision;
use crate::config::Config;
use crate::input::{self, Buttons};
use crate::sprite::Sprite;
use crate::world::{LayoutError, World};
use crate::{PLAYER_FRAME, PLAYER_FRAME_COUNT};

/// Where the player is drawn. It never moves; the world does.
pub const PLAYER_SCREEN_POS: Point = Point::new(72, 56);

pub const LOSE_MESSAGE: &str = "GAME OVER";
pub const WIN_MESSAGE: &str = "YOU WIN!";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GameState {
    Play,
    Win,
    Lose,
}

impl GameState {
    pub const fn is_over(self) -> bool {
        !matches!(self, GameState::Play)
    }

    pub const fn message(self) -> Option<&'static str> {
        match self {
            GameState::Play => None,
            GameState::Win => Some(WIN_MESSAGE),
            GameState::Lose => Some(LOSE_MESSAGE),
        }
    }
}

/// Which version of the game is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rules {
    /// Static room, input ignored.
    Room,
    /// Room scrolls with the d-pad, nothing blocks.
    Scroll,
    /// Walls block, enemies and the goal end the game.
    Maze,
}

/// Outcome of one frame's update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Step {
    /// Displacement applied to every world sprite.
    pub delta: Point,
    pub state: GameState,
    /// Set on the frame the game ends; the screen needs a full redraw so the
    /// message shows up.
    pub finished: bool,
}

impl Step {
    const fn idle(state: GameState) -> Self {
        Self {
            delta: Point::zero(),
            state,
            finished: false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct GameSession {
    rules: Rules,
    config: Config,
    state: GameState,
    player: Sprite,
    world: World,
    /// Sum of every delta applied to the world.
    scrolled: Point,
}

impl GameSession {
    pub fn new(rules: Rules) -> Result<Self, LayoutError> {
        let world = match rules {
            Rules::Room | Rules::Scroll => World::room()?,
            Rules::Maze => World::maze()?,
        };
        Ok(Self::with_world(rules, Config::for_rules(rules), world))
    }

    pub fn with_world(rules: Rules, config: Config, world: World) -> Self {
        log::info!(
            "session: {:?}, {} world sprites, {} fps",
            rules,
            world.len(),
            config.fps
        );
        Self {
            rules,
            config,
            state: GameState::Play,
            player: Sprite::new(PLAYER_FRAME, PLAYER_SCREEN_POS.x, PLAYER_SCREEN_POS.y),
            world,
            scrolled: Point::zero(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn message(&self) -> Option<&'static str> {
        self.state.message()
    }

    pub fn player(&self) -> &Sprite {
        &self.player
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Player first, then walls, enemies and the goal.
    pub fn sprites(&self) -> impl Iterator<Item = &Sprite> {
        core::iter::once(&self.player).chain(self.world.sprites())
    }

    /// Where the player is in the world's starting coordinates.
    pub fn player_world_position(&self) -> Point {
        PLAYER_SCREEN_POS - self.scrolled
    }

    /// Works out this frame's displacement and state without touching the
    /// session.
    pub fn plan(&self, buttons: Buttons) -> Step {
        if self.state.is_over() {
            return Step::idle(self.state);
        }
        let candidate = input::candidate_delta(buttons, self.config.move_speed);
        match self.rules {
            Rules::Room => Step::idle(self.state),
            Rules::Scroll => Step {
                delta: candidate,
                state: self.state,
                finished: false,
            },
            Rules::Maze => self.plan_maze(candidate),
        }
    }

    fn plan_maze(&self, candidate: Point) -> Step {
        let player = self.player.position();
        let delta = collision::clamp_to_walls(player, self.world.walls(), candidate);

        // every check runs; a later hit overwrites an earlier one
        let mut state = self.state;
        for enemy in self.world.enemies() {
            if collision::touches_enemy(player, enemy, delta) {
                state = GameState::Lose;
            }
        }
        if let Some(goal) = self.world.goal() {
            if collision::touches_goal(player, goal, delta) {
                state = GameState::Win;
            }
        }

        Step {
            delta,
            state,
            finished: state.is_over(),
        }
    }

    /// Runs one frame: plan, apply the displacement, animate the player.
    pub fn step(&mut self, buttons: Buttons) -> Step {
        let step = self.plan(buttons);
        if !self.state.is_over() {
            if step.finished {
                log::info!(
                    "game over: {:?} at world ({}, {})",
                    step.state,
                    self.player_world_position().x,
                    self.player_world_position().y
                );
            }
            self.state = step.state;
            if step.delta != Point::zero() {
                self.world.translate(step.delta);
                self.scrolled += step.delta;
            }
        }
        self.animate();
        step
    }

    /// Advances the player to the next animation frame.
    fn animate(&mut self) {
        let next = (self.player.frame() - PLAYER_FRAME + 1) % PLAYER_FRAME_COUNT + PLAYER_FRAME;
        self.player.set_frame(next);
    }
}
