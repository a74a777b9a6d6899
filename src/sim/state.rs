//! World state and entity records
//!
//! A `World` owns everything that exists on the current level. It is built
//! fresh for a new game and repopulated in place on level advance.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::collision::Aabb;
use super::level;
use crate::config::GameConfig;
use crate::consts::*;

/// A maze wall segment. Immutable once the level is generated.
pub type Wall = Aabb;

/// Current phase of a life
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Player health ran out
    GameOver,
    /// Final boss beaten
    Victory,
}

impl GamePhase {
    /// No more ticks are scheduled once a life reaches a terminal phase
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Victory)
    }

    /// Text shown when a life ends
    pub fn banner(self) -> Option<&'static str> {
        match self {
            GamePhase::Playing => None,
            GamePhase::GameOver => Some(GAME_OVER_BANNER),
            GamePhase::Victory => Some(VICTORY_BANNER),
        }
    }
}

/// Things that happened during the last tick, consumed by audio and logging
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PlayerHit { damage: f32 },
    MeleeSwing,
    Shot,
    EnemyHit { id: u32 },
    EnemyKilled { id: u32 },
    TreasureCollected { id: u32 },
    LauncherAvailable,
    LauncherPickedUp,
    BossActivated,
    BossHit { health: u32 },
    BossDefeated,
    LevelAdvanced { level: u32 },
    GameOver,
    Victory,
}

/// The player avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: f32,
    pub health: f32,
    pub max_health: f32,
    /// Units per second
    pub speed: f32,
    pub score: u64,
    pub attack_range: f32,
    pub has_launcher: bool,
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        let (x, y) = config.spawn;
        Self {
            pos: Vec2::new(x, y),
            size: config.player.size,
            health: config.player.max_health,
            max_health: config.player.max_health,
            speed: config.player.speed,
            score: 0,
            attack_range: config.player.attack_range,
            has_launcher: false,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::square(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.bounds().center()
    }

    /// Apply contact damage, never going below zero
    pub fn take_damage(&mut self, amount: f32) {
        self.health = (self.health - amount).max(0.0);
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }
}

/// How an enemy chooses its heading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EnemyBehavior {
    /// Keep the current heading, bouncing off edges and walls
    Wander,
    /// Chase the player while within `follow_range`, otherwise wander
    Pursue { follow_range: f32, jitter: f32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
    pub health: u32,
    pub speed: f32,
    /// Radians, in [0, 2π)
    pub heading: f32,
    pub behavior: EnemyBehavior,
}

impl Enemy {
    pub fn bounds(&self) -> Aabb {
        Aabb::square(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.bounds().center()
    }
}

/// The level boss. Dormant until all treasures are collected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub pos: Vec2,
    pub size: f32,
    pub health: u32,
    pub max_health: u32,
    pub speed: f32,
    pub active: bool,
    /// Latched once the boss has woken up on this level
    pub activated: bool,
    pub defeated: bool,
}

impl Boss {
    pub fn new(pos: Vec2, config: &GameConfig) -> Self {
        Self {
            pos,
            size: config.boss.size,
            health: config.boss.health,
            max_health: config.boss.health,
            speed: config.boss.speed,
            active: false,
            activated: false,
            defeated: false,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::square(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.bounds().center()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Treasure {
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
}

impl Treasure {
    pub fn bounds(&self) -> Aabb {
        Aabb::square(self.pos, self.size)
    }
}

/// Weapon pickup granting ranged attacks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Launcher {
    pub pos: Vec2,
    pub size: f32,
    /// Shown and collectable
    pub active: bool,
    pub picked_up: bool,
}

impl Launcher {
    pub fn new(pos: Vec2, size: f32) -> Self {
        Self {
            pos,
            size,
            active: false,
            picked_up: false,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::square(self.pos, self.size)
    }
}

/// A launcher projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
    /// Unit direction of travel
    pub dir: Vec2,
    pub speed: f32,
}

impl Bullet {
    pub fn bounds(&self) -> Aabb {
        Aabb::square(self.pos, self.size)
    }
}

/// Everything in play for the current level
#[derive(Debug, Clone)]
pub struct World {
    pub config: GameConfig,
    /// Seed the run was started with
    pub seed: u64,
    /// 1-based level number
    pub level: u32,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    /// Active enemies (sorted by id)
    pub enemies: Vec<Enemy>,
    pub boss: Boss,
    pub treasures: Vec<Treasure>,
    pub launcher: Launcher,
    pub bullets: Vec<Bullet>,
    pub walls: Vec<Wall>,
    pub camera: Camera,
    /// Events raised by the most recent tick
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl World {
    /// Start a new run on level 1 with a freshly generated maze
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut world = Self::empty(config, seed);
        level::generate_level(&mut world);
        world
    }

    /// A world with no walls, enemies or treasures. Boss and launcher sit
    /// dormant in the far corner. Used as a blank slate by tests and tools.
    pub fn empty(config: GameConfig, seed: u64) -> Self {
        let far = Vec2::new(config.world_width, config.world_height);
        let boss = Boss::new(far - Vec2::splat(config.boss.size), &config);
        let launcher = Launcher::new(
            far - Vec2::splat(config.pickups.launcher_size),
            config.pickups.launcher_size,
        );
        let player = Player::new(&config);
        let mut camera = Camera::new(Vec2::new(config.viewport_width, config.viewport_height));
        camera.follow(player.pos, far);

        Self {
            seed,
            level: 1,
            phase: GamePhase::Playing,
            time_ticks: 0,
            player,
            enemies: Vec::new(),
            boss,
            treasures: Vec::new(),
            launcher,
            bullets: Vec::new(),
            walls: Vec::new(),
            camera,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            config,
        }
    }

    /// World dimensions as a vector
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.config.world_width, self.config.world_height)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Take the events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Ensure entities are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.enemies.sort_by_key(|e| e.id);
        self.treasures.sort_by_key(|t| t.id);
        self.bullets.sort_by_key(|b| b.id);
    }

    /// Read-only copy of everything the renderer draws
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            world_size: self.size(),
            level: self.level,
            phase: self.phase,
            player: self.player.clone(),
            enemies: self.enemies.clone(),
            boss: self.boss.clone(),
            treasures: self.treasures.clone(),
            launcher: self.launcher.clone(),
            bullets: self.bullets.clone(),
            walls: self.walls.clone(),
            camera: self.camera,
        }
    }
}

/// Frame snapshot handed to the renderer after each step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub world_size: Vec2,
    pub level: u32,
    pub phase: GamePhase,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub boss: Boss,
    pub treasures: Vec<Treasure>,
    pub launcher: Launcher,
    pub bullets: Vec<Bullet>,
    pub walls: Vec<Wall>,
    pub camera: Camera,
}

impl Snapshot {
    pub fn to_json(&self) -> crate::GameResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn banner(&self) -> Option<&'static str> {
        self.phase.banner()
    }
}
