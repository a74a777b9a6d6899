//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod camera;
pub mod collision;
pub mod level;
pub mod maze;
pub mod state;
pub mod tick;

pub use camera::{Camera, follow_offset};
pub use collision::{Aabb, distance, hits_any, overlaps};
pub use level::{advance_level, generate_level};
pub use maze::{clear_safe_zone, coverage, generate_maze};
pub use state::{
    Boss, Bullet, Enemy, EnemyBehavior, GameEvent, GamePhase, Launcher, Player, Snapshot,
    Treasure, Wall, World,
};
pub use tick::{Held, TickInput, tick};
