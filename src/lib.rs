//! Maze Raider - a scrolling maze arena arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, combat, levels)
//! - `driver`: Frame-driven game loop around the simulation
//! - `input`: Keyboard/pointer state sampled at tick start
//! - `renderer`: WebGPU rendering of world snapshots and HUD text
//! - `audio`: Named sound effects, never fatal
//! - `config`: Data-driven game balance

pub mod audio;
pub mod config;
pub mod driver;
pub mod error;
pub mod input;
pub mod renderer;
pub mod sim;

pub use config::{GameConfig, MazeStrategy};
pub use driver::{FrameOutcome, GameLoop};
pub use error::{GameError, GameResult};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per displayed frame at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Scrollable level dimensions
    pub const WORLD_WIDTH: f32 = 2000.0;
    pub const WORLD_HEIGHT: f32 = 2000.0;

    /// Visible window (canvas) dimensions
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;

    /// Where the player appears at the start of every level
    pub const PLAYER_SPAWN_X: f32 = 50.0;
    pub const PLAYER_SPAWN_Y: f32 = 50.0;

    /// Score awards
    pub const TREASURE_BONUS: u64 = 10;
    pub const ENEMY_KILL_BONUS: u64 = 10;
    pub const BOSS_KILL_BONUS: u64 = 50;

    /// End-of-run banners
    pub const GAME_OVER_BANNER: &str = "Game Over! Refresh to Restart";
    pub const VICTORY_BANNER: &str = "Congratulations! You defeated the boss!";
}

/// Unit vector for a heading angle (radians)
#[inline]
pub fn heading_to_dir(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}

/// Heading angle (radians) pointing from `from` to `to`
#[inline]
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Normalized angle to [0, 2π)
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    angle.rem_euclid(std::f32::consts::TAU)
}
