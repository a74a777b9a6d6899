//! Level population and progression
//!
//! Level `n` gets `n * per_level` enemies moving a little faster than the
//! level before, `n * treasures_per_level` treasures, a fresh maze, a dormant
//! boss and a dormant launcher.

use glam::Vec2;
use rand::Rng;

use super::collision::{Aabb, hits_any};
use super::maze::{clear_safe_zone, coverage, generate_maze};
use super::state::{Boss, Enemy, EnemyBehavior, GameEvent, Launcher, Treasure, World};
use crate::wrap_angle;

/// Random placement tries before scanning the grid
const PLACEMENT_ATTEMPTS: u32 = 64;

/// Grid step for the fallback placement scan
const PLACEMENT_GRID: f32 = 10.0;

/// Populate `world` for `world.level`, replacing whatever was there
pub fn generate_level(world: &mut World) {
    let config = world.config.clone();
    let bounds = world.size();
    let level = world.level;

    world.enemies.clear();
    world.treasures.clear();
    world.bullets.clear();

    // Player back at spawn; score and launcher carry over
    let (sx, sy) = config.spawn;
    world.player.pos = Vec2::new(sx, sy);
    world.player.health = world.player.max_health;

    let spawn = world.player.bounds();
    let mut walls = generate_maze(&mut world.rng, bounds, &config.maze.strategy);
    clear_safe_zone(&mut walls, &spawn, config.maze.safe_radius);
    world.walls = walls;

    let keep_out = SafeZone {
        center: spawn.center(),
        radius: config.maze.safe_radius,
    };

    let enemy_count = level * config.enemy.per_level;
    let enemy_speed = config.enemy_speed_for_level(level);
    for i in 0..enemy_count {
        let pos = open_position(world, config.enemy.size, &keep_out);
        let heading = world.rng.random_range(0.0..std::f32::consts::TAU);
        let pursues = config.enemy.pursue_every > 0 && (i + 1) % config.enemy.pursue_every == 0;
        let behavior = if pursues {
            EnemyBehavior::Pursue {
                follow_range: config.enemy.follow_range,
                jitter: config.enemy.jitter,
            }
        } else {
            EnemyBehavior::Wander
        };
        let id = world.next_entity_id();
        world.enemies.push(Enemy {
            id,
            pos,
            size: config.enemy.size,
            health: config.enemy.health,
            speed: enemy_speed,
            heading: wrap_angle(heading),
            behavior,
        });
    }

    for _ in 0..level * config.pickups.treasures_per_level {
        let pos = open_position(world, config.pickups.treasure_size, &keep_out);
        let id = world.next_entity_id();
        world.treasures.push(Treasure {
            id,
            pos,
            size: config.pickups.treasure_size,
        });
    }

    let launcher_pos = open_position(world, config.pickups.launcher_size, &keep_out);
    world.launcher = Launcher::new(launcher_pos, config.pickups.launcher_size);

    let boss_pos = open_position(world, config.boss.size, &keep_out);
    world.boss = Boss::new(boss_pos, &config);

    world.camera.follow(world.player.pos, bounds);
    world.normalize_order();

    log::info!(
        "Level {}: {} walls ({:.0}% coverage), {} enemies (speed {:.0}), {} treasures",
        level,
        world.walls.len(),
        coverage(&world.walls, bounds) * 100.0,
        world.enemies.len(),
        enemy_speed,
        world.treasures.len()
    );
}

/// Move on to the next level after a boss kill
pub fn advance_level(world: &mut World) {
    world.level += 1;
    generate_level(world);
    world.events.push(GameEvent::LevelAdvanced { level: world.level });
}

struct SafeZone {
    center: Vec2,
    radius: f32,
}

/// Top-left corner for a `size` box clear of walls and the spawn zone.
///
/// Random tries first, then a grid scan. If the maze leaves no such spot the
/// scan is repeated ignoring the spawn zone, and only a fully walled world
/// falls back to the spawn point.
fn open_position(world: &mut World, size: f32, keep_out: &SafeZone) -> Vec2 {
    let max = (world.size() - Vec2::splat(size)).max(Vec2::ZERO);
    let clear = |walls: &[Aabb], pos: Vec2, avoid_spawn: bool| {
        let bx = Aabb::square(pos, size);
        !hits_any(&bx, walls)
            && !(avoid_spawn && bx.intersects_circle(keep_out.center, keep_out.radius))
    };

    for _ in 0..PLACEMENT_ATTEMPTS {
        let candidate = Vec2::new(
            world.rng.random_range(0.0..=max.x),
            world.rng.random_range(0.0..=max.y),
        );
        if clear(&world.walls, candidate, true) {
            return candidate;
        }
    }

    if let Some(pos) = grid_scan(max, |p| clear(&world.walls, p, true)) {
        log::debug!("Placed a {}-unit entity by grid scan at {:?}", size, pos);
        return pos;
    }

    if let Some(pos) = grid_scan(max, |p| clear(&world.walls, p, false)) {
        log::warn!(
            "No open spot for a {}-unit entity outside the spawn zone, using {:?}",
            size,
            pos
        );
        return pos;
    }

    log::warn!("No wall-free spot for a {}-unit entity, using spawn", size);
    Vec2::new(world.config.spawn.0, world.config.spawn.1).min(max)
}

/// First grid point in `[0, max]` accepted by `open`, row by row
fn grid_scan(max: Vec2, open: impl Fn(Vec2) -> bool) -> Option<Vec2> {
    let cols = (max.x / PLACEMENT_GRID) as u32;
    let rows = (max.y / PLACEMENT_GRID) as u32;
    (0..=rows)
        .flat_map(|row| (0..=cols).map(move |col| (col, row)))
        .map(|(col, row)| Vec2::new(col as f32, row as f32) * PLACEMENT_GRID)
        .find(|&p| open(p))
}
