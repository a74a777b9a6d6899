//! Fixed timestep simulation tick
//!
//! One call advances the world by `dt` seconds in a fixed order: player
//! movement and walls, camera, enemies, contact damage, pickups, boss, melee,
//! shooting, projectiles, then level progression. Removals are collected
//! during a pass and compacted once at the end of it.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{distance, hits_any};
use super::level::advance_level;
use super::state::{Bullet, EnemyBehavior, GameEvent, GamePhase, World};
use crate::consts::*;
use crate::{angle_between, heading_to_dir, wrap_angle};

/// Directional keys currently held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Held {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Held {
    /// Per-axis direction, diagonals are not normalized
    pub fn axis(&self) -> Vec2 {
        let mut axis = Vec2::ZERO;
        if self.up {
            axis.y -= 1.0;
        }
        if self.down {
            axis.y += 1.0;
        }
        if self.left {
            axis.x -= 1.0;
        }
        if self.right {
            axis.x += 1.0;
        }
        axis
    }
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    pub held: Held,
    /// Melee swing (one-shot)
    pub melee: bool,
    /// Fire the launcher (one-shot)
    pub shoot: bool,
    /// Last known pointer position in world coordinates
    pub aim: Option<Vec2>,
}

/// Advance the world by one fixed timestep
pub fn tick(world: &mut World, input: &TickInput, dt: f32) {
    if world.phase.is_terminal() {
        return;
    }

    world.events.clear();
    world.time_ticks += 1;

    move_player(world, input, dt);

    let world_size = world.size();
    let target = world.player.pos;
    world.camera.follow(target, world_size);

    move_enemies(world, dt);

    if apply_enemy_contact(world) {
        return;
    }

    collect_treasures(world);
    update_launcher(world);
    maybe_activate_boss(world);

    if update_boss(world, dt) {
        return;
    }

    if input.melee {
        melee_attack(world);
    }
    if input.shoot {
        fire_launcher(world, input.aim);
    }

    update_bullets(world, dt);
    progress_level(world);

    // Ensure deterministic ordering
    world.normalize_order();
}

/// Held keys, bounds clamp, then undo the move on any wall overlap
fn move_player(world: &mut World, input: &TickInput, dt: f32) {
    let max = world.size() - Vec2::splat(world.player.size);
    let player = &mut world.player;
    let previous = player.pos;

    let step = input.held.axis() * player.speed * dt;
    if step == Vec2::ZERO {
        return;
    }

    player.pos = (player.pos + step).clamp(Vec2::ZERO, max);

    if hits_any(&player.bounds(), &world.walls) {
        player.pos = previous;
    }
}

/// Wander/pursue, bounce off world edges, reverse off walls
fn move_enemies(world: &mut World, dt: f32) {
    let world_size = world.size();
    let player_center = world.player.center();

    for enemy in &mut world.enemies {
        if let EnemyBehavior::Pursue {
            follow_range,
            jitter,
        } = enemy.behavior
        {
            let center = enemy.center();
            if center.distance(player_center) <= follow_range {
                let noise = if jitter > 0.0 {
                    world.rng.random_range(-jitter..=jitter)
                } else {
                    0.0
                };
                enemy.heading = wrap_angle(angle_between(center, player_center) + noise);
            }
        }

        let previous = enemy.pos;
        enemy.pos += heading_to_dir(enemy.heading) * enemy.speed * dt;

        // Reflect off world edges
        let max = world_size - Vec2::splat(enemy.size);
        if enemy.pos.x < 0.0 || enemy.pos.x > max.x {
            enemy.pos.x = enemy.pos.x.clamp(0.0, max.x);
            enemy.heading = wrap_angle(std::f32::consts::PI - enemy.heading);
        }
        if enemy.pos.y < 0.0 || enemy.pos.y > max.y {
            enemy.pos.y = enemy.pos.y.clamp(0.0, max.y);
            enemy.heading = wrap_angle(-enemy.heading);
        }

        if hits_any(&enemy.bounds(), &world.walls) {
            enemy.pos = previous;
            enemy.heading = wrap_angle(enemy.heading + std::f32::consts::PI);
        }
    }
}

/// Contact damage from every overlapping enemy. Returns true on game over.
fn apply_enemy_contact(world: &mut World) -> bool {
    let player_box = world.player.bounds();
    let touching = world
        .enemies
        .iter()
        .filter(|e| e.bounds().overlaps(&player_box))
        .count();
    if touching == 0 {
        return false;
    }

    let damage = touching as f32 * world.config.enemy.contact_damage;
    hurt_player(world, damage)
}

/// Returns true when the hit ended the life
fn hurt_player(world: &mut World, damage: f32) -> bool {
    world.player.take_damage(damage);
    world.events.push(GameEvent::PlayerHit { damage });

    if world.player.is_dead() {
        world.phase = GamePhase::GameOver;
        world.events.push(GameEvent::GameOver);
        log::info!(
            "Game over on level {} with score {}",
            world.level,
            world.player.score
        );
        return true;
    }
    false
}

fn collect_treasures(world: &mut World) {
    let player_box = world.player.bounds();
    let mut collected = Vec::new();
    world.treasures.retain(|t| {
        if t.bounds().overlaps(&player_box) {
            collected.push(t.id);
            false
        } else {
            true
        }
    });

    for id in collected {
        world.player.score += TREASURE_BONUS;
        world.events.push(GameEvent::TreasureCollected { id });
    }
}

/// Launcher shows up once the enemies are gone; touching it arms the player
fn update_launcher(world: &mut World) {
    let launcher = &mut world.launcher;
    if !launcher.active && !launcher.picked_up && world.enemies.is_empty() {
        launcher.active = true;
        world.events.push(GameEvent::LauncherAvailable);
        log::debug!("Launcher available at {:?}", launcher.pos);
    }

    if launcher.active && !launcher.picked_up && launcher.bounds().overlaps(&world.player.bounds())
    {
        launcher.picked_up = true;
        launcher.active = false;
        world.player.has_launcher = true;
        world.events.push(GameEvent::LauncherPickedUp);
    }
}

/// The boss wakes up once per level, when the last treasure is taken
fn maybe_activate_boss(world: &mut World) {
    let boss = &mut world.boss;
    if !boss.activated && world.treasures.is_empty() {
        boss.active = true;
        boss.activated = true;
        world.events.push(GameEvent::BossActivated);
        log::info!("Boss awake on level {}", world.level);
    }
}

/// Chase the player, revert on walls, hit on contact. Returns true on game over.
fn update_boss(world: &mut World, dt: f32) -> bool {
    if !world.boss.active {
        return false;
    }

    let player_center = world.player.center();
    let max = world.size() - Vec2::splat(world.boss.size);
    let boss = &mut world.boss;
    let previous = boss.pos;

    let dir = (player_center - boss.center()).normalize_or_zero();
    boss.pos = (boss.pos + dir * boss.speed * dt).clamp(Vec2::ZERO, max);
    if hits_any(&boss.bounds(), &world.walls) {
        boss.pos = previous;
    }

    if boss.bounds().overlaps(&world.player.bounds()) {
        let damage = world.config.boss.contact_damage;
        return hurt_player(world, damage);
    }
    false
}

/// Damage everything whose center is within reach of the player's center
fn melee_attack(world: &mut World) {
    world.events.push(GameEvent::MeleeSwing);

    let origin = world.player.center();
    let reach = world.player.attack_range;
    let damage = world.config.player.melee_damage;

    for enemy in &mut world.enemies {
        if distance(enemy.center(), origin) <= reach {
            enemy.health = enemy.health.saturating_sub(damage);
            world.events.push(GameEvent::EnemyHit { id: enemy.id });
        }
    }
    remove_dead_enemies(world);

    if world.boss.active && distance(world.boss.center(), origin) <= reach {
        damage_boss(world, damage);
    }
}

fn remove_dead_enemies(world: &mut World) {
    let mut killed = Vec::new();
    world.enemies.retain(|e| {
        if e.health == 0 {
            killed.push(e.id);
            false
        } else {
            true
        }
    });

    for id in killed {
        world.player.score += ENEMY_KILL_BONUS;
        world.events.push(GameEvent::EnemyKilled { id });
    }
}

fn damage_boss(world: &mut World, damage: u32) {
    let boss = &mut world.boss;
    boss.health = boss.health.saturating_sub(damage);
    world.events.push(GameEvent::BossHit {
        health: boss.health,
    });

    if boss.health == 0 {
        boss.active = false;
        boss.defeated = true;
        world.player.score += BOSS_KILL_BONUS;
        world.events.push(GameEvent::BossDefeated);
        log::info!("Boss defeated on level {}", world.level);
    }
}

/// Spawn one bullet from the player's center toward the aim point
fn fire_launcher(world: &mut World, aim: Option<Vec2>) {
    if !world.player.has_launcher {
        log::trace!("Shot ignored, no launcher");
        return;
    }

    let origin = world.player.center();
    let dir = aim
        .map(|target| (target - origin).normalize_or_zero())
        .filter(|d| *d != Vec2::ZERO)
        .unwrap_or(Vec2::X);

    let size = world.config.bullet.size;
    let speed = world.config.bullet.speed;
    let id = world.next_entity_id();
    world.bullets.push(Bullet {
        id,
        pos: origin - Vec2::splat(size * 0.5),
        size,
        dir,
        speed,
    });
    world.events.push(GameEvent::Shot);
}

/// Move bullets, drop the ones that left the world, resolve hits
fn update_bullets(world: &mut World, dt: f32) {
    if world.bullets.is_empty() {
        return;
    }

    let world_size = world.size();
    let damage = world.config.bullet.damage;
    let mut spent = vec![false; world.bullets.len()];
    let mut boss_hits = 0u32;

    for (i, bullet) in world.bullets.iter_mut().enumerate() {
        bullet.pos += bullet.dir * bullet.speed * dt;

        let p = bullet.pos;
        if p.x < 0.0 || p.y < 0.0 || p.x > world_size.x || p.y > world_size.y {
            spent[i] = true;
            continue;
        }

        let bx = bullet.bounds();
        if let Some(enemy) = world
            .enemies
            .iter_mut()
            .find(|e| e.health > 0 && e.bounds().overlaps(&bx))
        {
            enemy.health = enemy.health.saturating_sub(damage);
            world.events.push(GameEvent::EnemyHit { id: enemy.id });
            spent[i] = true;
        } else if world.boss.active
            && world.boss.health > boss_hits * damage
            && world.boss.bounds().overlaps(&bx)
        {
            boss_hits += 1;
            spent[i] = true;
        }
    }

    let mut flags = spent.into_iter();
    world.bullets.retain(|_| !flags.next().unwrap_or(false));

    remove_dead_enemies(world);
    for _ in 0..boss_hits {
        if world.boss.active {
            damage_boss(world, damage);
        }
    }
}

/// Boss down: next level, or the run is won
fn progress_level(world: &mut World) {
    if !world.boss.defeated {
        return;
    }

    if world.level >= world.config.levels {
        world.phase = GamePhase::Victory;
        world.events.push(GameEvent::Victory);
        log::info!("Victory with score {}", world.player.score);
    } else {
        advance_level(world);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::collision::Aabb;
    use crate::sim::state::{Enemy, Treasure};
    use proptest::prelude::*;

    fn empty_world() -> World {
        World::empty(GameConfig::default(), 12345)
    }

    fn held_right() -> TickInput {
        TickInput {
            held: Held {
                right: true,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn melee() -> TickInput {
        TickInput {
            melee: true,
            ..Default::default()
        }
    }

    fn enemy_at(world: &mut World, pos: Vec2, behavior: EnemyBehavior) -> u32 {
        let id = world.next_entity_id();
        world.enemies.push(Enemy {
            id,
            pos,
            size: 40.0,
            health: 3,
            speed: 0.0,
            heading: 0.0,
            behavior,
        });
        id
    }

    /// Keep the boss asleep so it does not wander into a test
    fn park_boss(world: &mut World) {
        world.boss.activated = true;
    }

    /// Awake boss far from the spawn
    fn boss_at(world: &mut World, pos: Vec2, health: u32) {
        world.boss.pos = pos;
        world.boss.health = health;
        world.boss.active = true;
        world.boss.activated = true;
    }

    /// Bullet heading right at 10 units per tick
    fn bullet_at(world: &mut World, pos: Vec2) -> u32 {
        let id = world.next_entity_id();
        world.bullets.push(Bullet {
            id,
            pos,
            size: 10.0,
            dir: Vec2::X,
            speed: 600.0,
        });
        id
    }

    fn boss_hits(world: &World) -> usize {
        world
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::BossHit { .. }))
            .count()
    }

    #[test]
    fn test_scenario_a_player_walks_right() {
        let mut world = empty_world();
        park_boss(&mut world);
        for _ in 0..10 {
            tick(&mut world, &held_right(), SIM_DT);
        }
        assert!((world.player.pos.x - 100.0).abs() < 1e-3);
        assert_eq!(world.player.pos.y, 50.0);
    }

    #[test]
    fn test_player_clamped_to_world() {
        let mut world = empty_world();
        park_boss(&mut world);
        world.player.pos = Vec2::new(1955.0, 50.0);
        for _ in 0..10 {
            tick(&mut world, &held_right(), SIM_DT);
        }
        assert_eq!(world.player.pos.x, 1960.0);
    }

    #[test]
    fn test_diagonal_moves_both_axes() {
        let mut world = empty_world();
        park_boss(&mut world);
        let input = TickInput {
            held: Held {
                down: true,
                right: true,
                ..Default::default()
            },
            ..Default::default()
        };
        tick(&mut world, &input, SIM_DT);
        assert!((world.player.pos.x - 55.0).abs() < 1e-3);
        assert!((world.player.pos.y - 55.0).abs() < 1e-3);
    }

    #[test]
    fn test_wall_reverts_player_move() {
        let mut world = empty_world();
        park_boss(&mut world);
        world.walls.push(Aabb::new(92.0, 0.0, 50.0, 200.0));
        tick(&mut world, &held_right(), SIM_DT);
        assert!((world.player.pos.x - 50.0).abs() < 1e-3);
        assert!(!world.player.bounds().overlaps(&world.walls[0]));
    }

    #[test]
    fn test_scenario_b_treasure_pickup() {
        let mut world = empty_world();
        park_boss(&mut world);
        let id = world.next_entity_id();
        world.treasures.push(Treasure {
            id,
            pos: world.player.pos,
            size: 30.0,
        });
        tick(&mut world, &TickInput::default(), SIM_DT);
        assert!(world.treasures.is_empty());
        assert_eq!(world.player.score, 10);
        assert!(world.events.contains(&GameEvent::TreasureCollected { id }));
    }

    #[test]
    fn test_scenario_c_boss_dies_on_twentieth_hit() {
        let mut config = GameConfig::default();
        config.levels = 1;
        let mut world = World::empty(config, 1);
        world.boss.pos = world.player.pos;
        world.boss.active = true;
        world.boss.activated = true;

        for hit in 1..=20u32 {
            assert!(!world.boss.defeated, "defeated early at hit {hit}");
            tick(&mut world, &melee(), SIM_DT);
            if hit < 20 {
                assert_eq!(world.boss.health, 20 - hit);
            }
        }
        assert!(world.boss.defeated);
        assert_eq!(world.boss.health, 0);
        assert_eq!(world.player.score, 50);
        assert_eq!(world.phase, GamePhase::Victory);
    }

    #[test]
    fn test_scenario_d_bullet_leaves_world() {
        let mut world = empty_world();
        park_boss(&mut world);
        let id = world.next_entity_id();
        world.bullets.push(Bullet {
            id,
            pos: Vec2::new(1995.0, 500.0),
            size: 10.0,
            dir: Vec2::X,
            speed: 600.0,
        });
        tick(&mut world, &TickInput::default(), SIM_DT);
        assert!(world.bullets.is_empty());
    }

    #[test]
    fn test_enemy_contact_drains_every_tick() {
        let mut world = empty_world();
        park_boss(&mut world);
        let pos = world.player.pos;
        enemy_at(&mut world, pos, EnemyBehavior::Wander);
        for _ in 0..4 {
            tick(&mut world, &TickInput::default(), SIM_DT);
        }
        assert_eq!(world.player.health, 98.0);
    }

    #[test]
    fn test_game_over_is_terminal() {
        let mut world = empty_world();
        park_boss(&mut world);
        world.player.health = 0.5;
        let pos = world.player.pos;
        enemy_at(&mut world, pos, EnemyBehavior::Wander);

        tick(&mut world, &held_right(), SIM_DT);
        assert_eq!(world.phase, GamePhase::GameOver);
        assert_eq!(world.player.health, 0.0);
        assert!(world.events.contains(&GameEvent::GameOver));

        let frozen_pos = world.player.pos;
        let frozen_ticks = world.time_ticks;
        for _ in 0..5 {
            tick(&mut world, &held_right(), SIM_DT);
        }
        assert_eq!(world.player.pos, frozen_pos);
        assert_eq!(world.player.health, 0.0);
        assert_eq!(world.time_ticks, frozen_ticks);
    }

    #[test]
    fn test_melee_kills_enemy_in_three_hits() {
        let mut world = empty_world();
        park_boss(&mut world);
        // Centers 40 apart, boxes only touching
        let id = enemy_at(&mut world, Vec2::new(90.0, 50.0), EnemyBehavior::Wander);

        tick(&mut world, &melee(), SIM_DT);
        assert_eq!(world.enemies[0].health, 2);
        tick(&mut world, &melee(), SIM_DT);
        assert_eq!(world.enemies[0].health, 1);
        tick(&mut world, &melee(), SIM_DT);
        assert!(world.enemies.is_empty());
        assert_eq!(world.player.score, 10);
        assert!(world.events.contains(&GameEvent::EnemyKilled { id }));
    }

    #[test]
    fn test_melee_out_of_reach_misses() {
        let mut world = empty_world();
        park_boss(&mut world);
        enemy_at(&mut world, Vec2::new(400.0, 400.0), EnemyBehavior::Wander);
        tick(&mut world, &melee(), SIM_DT);
        assert_eq!(world.enemies[0].health, 3);
    }

    #[test]
    fn test_launcher_appears_when_enemies_cleared() {
        let mut world = empty_world();
        park_boss(&mut world);
        enemy_at(&mut world, Vec2::new(1000.0, 1000.0), EnemyBehavior::Wander);
        tick(&mut world, &TickInput::default(), SIM_DT);
        assert!(!world.launcher.active);

        world.enemies.clear();
        tick(&mut world, &TickInput::default(), SIM_DT);
        assert!(world.launcher.active);
        assert!(world.events.contains(&GameEvent::LauncherAvailable));

        world.launcher.pos = world.player.pos;
        tick(&mut world, &TickInput::default(), SIM_DT);
        assert!(world.launcher.picked_up);
        assert!(world.player.has_launcher);
    }

    #[test]
    fn test_shooting_requires_launcher() {
        let mut world = empty_world();
        park_boss(&mut world);
        let shoot = TickInput {
            shoot: true,
            aim: Some(Vec2::new(500.0, 70.0)),
            ..Default::default()
        };
        tick(&mut world, &shoot, SIM_DT);
        assert!(world.bullets.is_empty());

        world.player.has_launcher = true;
        tick(&mut world, &shoot, SIM_DT);
        assert_eq!(world.bullets.len(), 1);
        let b = &world.bullets[0];
        assert!((b.dir - Vec2::X).length() < 1e-5);
        assert!(world.events.contains(&GameEvent::Shot));
    }

    #[test]
    fn test_unaimed_shot_goes_right() {
        let mut world = empty_world();
        park_boss(&mut world);
        world.player.has_launcher = true;
        let center = world.player.center();

        for aim in [None, Some(center)] {
            world.bullets.clear();
            let shoot = TickInput {
                shoot: true,
                aim,
                ..Default::default()
            };
            tick(&mut world, &shoot, SIM_DT);
            assert_eq!(world.bullets.len(), 1);
            assert_eq!(world.bullets[0].dir, Vec2::X);
        }
    }

    #[test]
    fn test_bullet_kills_enemy() {
        let mut world = empty_world();
        park_boss(&mut world);
        enemy_at(&mut world, Vec2::new(300.0, 50.0), EnemyBehavior::Wander);
        world.enemies[0].health = 1;
        world.player.has_launcher = true;
        let shoot = TickInput {
            shoot: true,
            aim: Some(Vec2::new(320.0, 70.0)),
            ..Default::default()
        };
        tick(&mut world, &shoot, SIM_DT);
        for _ in 0..60 {
            if world.enemies.is_empty() {
                break;
            }
            tick(&mut world, &TickInput::default(), SIM_DT);
        }
        assert!(world.enemies.is_empty());
        assert!(world.bullets.is_empty());
        assert_eq!(world.player.score, 10);
    }

    #[test]
    fn test_boss_wakes_once_after_treasures() {
        let mut world = empty_world();
        let id = world.next_entity_id();
        world.treasures.push(Treasure {
            id,
            pos: Vec2::new(500.0, 500.0),
            size: 30.0,
        });
        tick(&mut world, &TickInput::default(), SIM_DT);
        assert!(!world.boss.active);

        world.treasures.clear();
        tick(&mut world, &TickInput::default(), SIM_DT);
        assert!(world.boss.active);
        assert_eq!(
            world
                .events
                .iter()
                .filter(|e| **e == GameEvent::BossActivated)
                .count(),
            1
        );

        for _ in 0..10 {
            tick(&mut world, &TickInput::default(), SIM_DT);
            assert!(!world.events.contains(&GameEvent::BossActivated));
        }
    }

    #[test]
    fn test_boss_pursues_player() {
        let mut world = empty_world();
        world.boss.pos = Vec2::new(600.0, 50.0);
        world.boss.active = true;
        world.boss.activated = true;
        let before = world.boss.center().distance(world.player.center());
        tick(&mut world, &TickInput::default(), SIM_DT);
        let after = world.boss.center().distance(world.player.center());
        assert!(after < before);
    }

    #[test]
    fn test_boss_contact_hurts_more_than_enemy() {
        let mut world = empty_world();
        world.boss.pos = world.player.pos;
        world.boss.active = true;
        world.boss.activated = true;
        tick(&mut world, &TickInput::default(), SIM_DT);
        assert_eq!(world.player.health, 98.0);
    }

    #[test]
    fn test_boss_kill_advances_level() {
        let mut world = World::new(GameConfig::default(), 77);
        world.treasures.clear();
        world.enemies.clear();
        world.boss.pos = world.player.pos;
        world.boss.active = true;
        world.boss.activated = true;
        world.boss.health = 1;

        tick(&mut world, &melee(), SIM_DT);
        assert_eq!(world.level, 2);
        assert_eq!(world.phase, GamePhase::Playing);
        assert_eq!(world.enemies.len(), 6);
        assert!(world.events.contains(&GameEvent::BossDefeated));
        assert!(world.events.contains(&GameEvent::LevelAdvanced { level: 2 }));
    }

    #[test]
    fn test_bullet_damages_boss_once_per_hit() {
        let mut world = empty_world();
        boss_at(&mut world, Vec2::new(1000.0, 1000.0), 20);
        bullet_at(&mut world, Vec2::new(1005.0, 1020.0));

        tick(&mut world, &TickInput::default(), SIM_DT);
        assert_eq!(world.boss.health, 19);
        assert!(world.bullets.is_empty());
        assert!(world.boss.active);
        assert_eq!(boss_hits(&world), 1);
        assert!(world.events.contains(&GameEvent::BossHit { health: 19 }));
    }

    #[test]
    fn test_bullet_kill_on_last_level_wins() {
        let config = GameConfig {
            levels: 1,
            ..Default::default()
        };
        let mut world = World::empty(config, 4);
        boss_at(&mut world, Vec2::new(1000.0, 1000.0), 1);
        bullet_at(&mut world, Vec2::new(1005.0, 1020.0));

        tick(&mut world, &TickInput::default(), SIM_DT);
        assert_eq!(world.player.score, BOSS_KILL_BONUS);
        assert!(world.boss.defeated && !world.boss.active);
        assert_eq!(world.phase, GamePhase::Victory);
        assert!(world.events.contains(&GameEvent::BossDefeated));
        assert!(world.events.contains(&GameEvent::Victory));
    }

    #[test]
    fn test_bullet_kill_advances_level() {
        let mut world = empty_world();
        boss_at(&mut world, Vec2::new(1000.0, 1000.0), 1);
        bullet_at(&mut world, Vec2::new(1005.0, 1020.0));

        tick(&mut world, &TickInput::default(), SIM_DT);
        assert_eq!(world.player.score, BOSS_KILL_BONUS);
        assert_eq!(world.level, 2);
        assert_eq!(world.phase, GamePhase::Playing);
        assert!(world.events.contains(&GameEvent::BossDefeated));
        assert!(world.events.contains(&GameEvent::LevelAdvanced { level: 2 }));
    }

    #[test]
    fn test_second_bullet_passes_a_dying_boss() {
        let config = GameConfig {
            levels: 1,
            ..Default::default()
        };
        let mut world = World::empty(config, 4);
        boss_at(&mut world, Vec2::new(1000.0, 1000.0), 1);
        bullet_at(&mut world, Vec2::new(1005.0, 1010.0));
        let second = bullet_at(&mut world, Vec2::new(1005.0, 1030.0));

        tick(&mut world, &TickInput::default(), SIM_DT);
        assert_eq!(world.boss.health, 0);
        assert_eq!(world.bullets.len(), 1);
        assert_eq!(world.bullets[0].id, second);
        assert_eq!(boss_hits(&world), 1);
        assert_eq!(world.player.score, BOSS_KILL_BONUS);
    }

    #[test]
    fn test_camera_tracks_player_corner() {
        let mut world = empty_world();
        park_boss(&mut world);
        world.player.pos = Vec2::new(1000.0, 1000.0);

        tick(&mut world, &TickInput::default(), SIM_DT);
        assert_eq!(world.camera.offset, Vec2::new(600.0, 700.0));
    }

    #[test]
    fn test_wandering_enemy_bounces_off_wall() {
        let mut world = empty_world();
        park_boss(&mut world);
        enemy_at(&mut world, Vec2::new(500.0, 500.0), EnemyBehavior::Wander);
        world.enemies[0].speed = 90.0;
        world.walls.push(Aabb::new(541.0, 400.0, 50.0, 300.0));
        tick(&mut world, &TickInput::default(), SIM_DT);
        assert_eq!(world.enemies[0].pos, Vec2::new(500.0, 500.0));
        assert!((world.enemies[0].heading - std::f32::consts::PI).abs() < 1e-5);
    }

    #[test]
    fn test_wandering_enemy_reflects_off_edge() {
        let mut world = empty_world();
        park_boss(&mut world);
        enemy_at(&mut world, Vec2::new(1959.0, 500.0), EnemyBehavior::Wander);
        world.enemies[0].speed = 90.0;
        tick(&mut world, &TickInput::default(), SIM_DT);
        assert_eq!(world.enemies[0].pos.x, 1960.0);
        assert!((world.enemies[0].heading - std::f32::consts::PI).abs() < 1e-5);
    }

    #[test]
    fn test_pursuer_turns_toward_player() {
        let mut world = empty_world();
        park_boss(&mut world);
        enemy_at(
            &mut world,
            Vec2::new(250.0, 50.0),
            EnemyBehavior::Pursue {
                follow_range: 300.0,
                jitter: 0.0,
            },
        );
        world.enemies[0].speed = 90.0;
        tick(&mut world, &TickInput::default(), SIM_DT);
        assert!((world.enemies[0].heading - std::f32::consts::PI).abs() < 1e-4);
        assert!(world.enemies[0].pos.x < 250.0);
    }

    #[test]
    fn test_same_seed_same_run() {
        let inputs = [held_right(), melee(), TickInput::default(), held_right()];
        let mut a = World::new(GameConfig::default(), 99999);
        let mut b = World::new(GameConfig::default(), 99999);
        for _ in 0..30 {
            for input in &inputs {
                tick(&mut a, input, SIM_DT);
                tick(&mut b, input, SIM_DT);
            }
        }
        assert_eq!(a.player.pos, b.player.pos);
        let ea: Vec<_> = a.enemies.iter().map(|e| (e.pos, e.heading)).collect();
        let eb: Vec<_> = b.enemies.iter().map(|e| (e.pos, e.heading)).collect();
        assert_eq!(ea, eb);
    }

    fn arb_input() -> impl Strategy<Value = TickInput> {
        (
            any::<[bool; 4]>(),
            any::<bool>(),
            any::<bool>(),
            (0.0f32..2000.0, 0.0f32..2000.0),
        )
            .prop_map(|(keys, melee, shoot, (ax, ay))| TickInput {
                held: Held {
                    up: keys[0],
                    down: keys[1],
                    left: keys[2],
                    right: keys[3],
                },
                melee,
                shoot,
                aim: Some(Vec2::new(ax, ay)),
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_invariants_hold_over_random_play(
            seed in any::<u64>(),
            inputs in proptest::collection::vec(arb_input(), 1..120),
        ) {
            let mut world = World::new(GameConfig::default(), seed);
            world.player.has_launcher = true;
            let bounds = world.size();
            let mut score = world.player.score;
            let mut treasures = world.treasures.len();
            let mut level = world.level;

            for input in &inputs {
                let before = world.player.pos;
                tick(&mut world, input, SIM_DT);

                // Never left standing inside a wall it walked into
                if world.player.pos != before {
                    prop_assert!(!hits_any(&world.player.bounds(), &world.walls));
                }
                prop_assert!(world.player.bounds().within(bounds));
                for e in &world.enemies {
                    prop_assert!(e.pos.is_finite());
                    prop_assert!(e.bounds().within(bounds));
                    prop_assert!(e.health > 0);
                }
                for b in &world.bullets {
                    prop_assert!(b.pos.x >= 0.0 && b.pos.x <= bounds.x);
                    prop_assert!(b.pos.y >= 0.0 && b.pos.y <= bounds.y);
                }
                prop_assert!(world.boss.pos.is_finite());

                prop_assert!(world.player.score >= score);
                if world.level == level {
                    prop_assert!(world.treasures.len() <= treasures);
                }
                score = world.player.score;
                treasures = world.treasures.len();
                level = world.level;
            }
        }
    }
}
