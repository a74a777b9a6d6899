//! Maze generation
//!
//! Walls come from one of two strategies (random rooms or a sampled tile
//! grid). Whatever the strategy, walls touching the spawn safe zone are
//! dropped afterwards so the player never starts boxed in.

use glam::Vec2;
use rand::Rng;

use super::collision::Aabb;
use super::state::Wall;
use crate::config::MazeStrategy;

/// Produce the raw wall set for a `bounds`-sized world
pub fn generate_maze<R: Rng>(rng: &mut R, bounds: Vec2, strategy: &MazeStrategy) -> Vec<Wall> {
    match *strategy {
        MazeStrategy::Rooms {
            min_rooms,
            max_rooms,
            min_side,
            max_side,
        } => {
            let count = rng.random_range(min_rooms..=max_rooms);
            let mut walls = Vec::with_capacity(count as usize);
            for _ in 0..count {
                let width = rng.random_range(min_side..=max_side).min(bounds.x);
                let height = rng.random_range(min_side..=max_side).min(bounds.y);
                let x = rng.random_range(0.0..=bounds.x - width);
                let y = rng.random_range(0.0..=bounds.y - height);
                walls.push(Aabb::new(x, y, width, height));
            }
            walls
        }
        MazeStrategy::TileGrid {
            tile_size,
            wall_chance,
        } => {
            let cols = (bounds.x / tile_size).floor() as u32;
            let rows = (bounds.y / tile_size).floor() as u32;
            let mut walls = Vec::new();
            for row in 0..rows {
                for col in 0..cols {
                    if rng.random_bool(wall_chance as f64) {
                        walls.push(Aabb::new(
                            col as f32 * tile_size,
                            row as f32 * tile_size,
                            tile_size,
                            tile_size,
                        ));
                    }
                }
            }
            walls
        }
    }
}

/// Drop every wall intersecting the circle around the spawn point, or the
/// spawn box itself
pub fn clear_safe_zone(walls: &mut Vec<Wall>, spawn: &Aabb, radius: f32) {
    let center = spawn.center();
    let before = walls.len();
    walls.retain(|w| !w.intersects_circle(center, radius) && !w.overlaps(spawn));
    log::debug!(
        "Safe zone cleared {} of {} walls",
        before - walls.len(),
        before
    );
}

/// Fraction of the world area covered by walls (overlaps counted twice)
pub fn coverage(walls: &[Wall], bounds: Vec2) -> f32 {
    let area: f32 = walls.iter().map(|w| w.size.x * w.size.y).sum();
    area / (bounds.x * bounds.y)
}
