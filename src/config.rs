//! Game balance and world configuration
//!
//! Everything tunable lives here. `GameConfig::default()` is the reference
//! balance; a JSON document can override any subset of it.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{GameError, GameResult};

/// How the maze walls are laid out
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MazeStrategy {
    /// Random rectangular rooms anywhere inside the world
    Rooms {
        min_rooms: u32,
        max_rooms: u32,
        min_side: f32,
        max_side: f32,
    },
    /// Regular grid, each cell a wall with fixed probability
    TileGrid { tile_size: f32, wall_chance: f32 },
}

impl Default for MazeStrategy {
    fn default() -> Self {
        MazeStrategy::Rooms {
            min_rooms: 10,
            max_rooms: 20,
            min_side: 100.0,
            max_side: 300.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub size: f32,
    pub max_health: f32,
    /// Units per second
    pub speed: f32,
    /// Melee reach, measured center to center
    pub attack_range: f32,
    pub melee_damage: u32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            size: 40.0,
            max_health: 100.0,
            speed: 300.0,
            attack_range: 50.0,
            melee_damage: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub size: f32,
    pub health: u32,
    /// Units per second on level 1
    pub speed: f32,
    /// Extra speed per level above the first, as a fraction of `speed`
    pub speed_growth: f32,
    /// Enemies spawned per level number (level 2 spawns twice this)
    pub per_level: u32,
    /// Every n-th enemy pursues the player; 0 disables pursuit
    pub pursue_every: u32,
    pub follow_range: f32,
    /// Maximum random heading error (radians) of a pursuing enemy
    pub jitter: f32,
    /// Player health lost per tick of contact
    pub contact_damage: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            size: 40.0,
            health: 3,
            speed: 90.0,
            speed_growth: 0.2,
            per_level: 3,
            pursue_every: 3,
            follow_range: 300.0,
            jitter: 0.2,
            contact_damage: 0.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BossTuning {
    pub size: f32,
    pub health: u32,
    pub speed: f32,
    pub contact_damage: f32,
}

impl Default for BossTuning {
    fn default() -> Self {
        Self {
            size: 60.0,
            health: 20,
            speed: 120.0,
            contact_damage: 2.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PickupTuning {
    pub treasure_size: f32,
    /// Treasures spawned per level number
    pub treasures_per_level: u32,
    pub launcher_size: f32,
}

impl Default for PickupTuning {
    fn default() -> Self {
        Self {
            treasure_size: 30.0,
            treasures_per_level: 1,
            launcher_size: 30.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletTuning {
    pub size: f32,
    pub speed: f32,
    pub damage: u32,
}

impl Default for BulletTuning {
    fn default() -> Self {
        Self {
            size: 10.0,
            speed: 600.0,
            damage: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeTuning {
    pub strategy: MazeStrategy,
    /// Walls intersecting this radius around the spawn point are dropped
    pub safe_radius: f32,
}

impl Default for MazeTuning {
    fn default() -> Self {
        Self {
            strategy: MazeStrategy::default(),
            safe_radius: 150.0,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub world_width: f32,
    pub world_height: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Simulation step in seconds
    pub dt: f32,
    /// Levels in a run; beating the last boss wins
    pub levels: u32,
    pub spawn: (f32, f32),
    pub player: PlayerTuning,
    pub enemy: EnemyTuning,
    pub boss: BossTuning,
    pub pickups: PickupTuning,
    pub bullet: BulletTuning,
    pub maze: MazeTuning,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    pub muted: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            dt: SIM_DT,
            levels: 3,
            spawn: (PLAYER_SPAWN_X, PLAYER_SPAWN_Y),
            player: PlayerTuning::default(),
            enemy: EnemyTuning::default(),
            boss: BossTuning::default(),
            pickups: PickupTuning::default(),
            bullet: BulletTuning::default(),
            maze: MazeTuning::default(),

            master_volume: 0.8,
            muted: false,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON override on top of the defaults
    pub fn from_json(json: &str) -> GameResult<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> GameResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> GameResult<()> {
        let positive = [
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
            ("dt", self.dt),
            ("player.size", self.player.size),
            ("player.max_health", self.player.max_health),
            ("enemy.size", self.enemy.size),
            ("boss.size", self.boss.size),
            ("pickups.treasure_size", self.pickups.treasure_size),
            ("pickups.launcher_size", self.pickups.launcher_size),
            ("bullet.size", self.bullet.size),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(GameError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        if self.viewport_width > self.world_width || self.viewport_height > self.world_height {
            return Err(GameError::InvalidConfig(
                "viewport larger than the world".to_string(),
            ));
        }
        if self.levels == 0 {
            return Err(GameError::InvalidConfig("levels must be at least 1".to_string()));
        }
        if self.boss.health == 0 || self.enemy.health == 0 {
            return Err(GameError::InvalidConfig(
                "enemy and boss health must start above zero".to_string(),
            ));
        }

        let (sx, sy) = self.spawn;
        if sx < 0.0
            || sy < 0.0
            || sx > self.world_width - self.player.size
            || sy > self.world_height - self.player.size
        {
            return Err(GameError::InvalidConfig(format!(
                "spawn ({sx}, {sy}) outside the world"
            )));
        }

        match self.maze.strategy {
            MazeStrategy::Rooms {
                min_rooms,
                max_rooms,
                min_side,
                max_side,
            } => {
                if min_rooms > max_rooms || !(min_side > 0.0 && min_side <= max_side) {
                    return Err(GameError::InvalidConfig("bad room ranges".to_string()));
                }
                if max_side > self.world_width || max_side > self.world_height {
                    return Err(GameError::InvalidConfig(
                        "rooms larger than the world".to_string(),
                    ));
                }
            }
            MazeStrategy::TileGrid {
                tile_size,
                wall_chance,
            } => {
                if !(tile_size > 0.0) || !(0.0..=1.0).contains(&wall_chance) {
                    return Err(GameError::InvalidConfig("bad tile grid".to_string()));
                }
            }
        }

        if !(0.0..=1.0).contains(&self.master_volume) {
            return Err(GameError::InvalidConfig(format!(
                "master_volume {} outside 0..=1",
                self.master_volume
            )));
        }
        Ok(())
    }

    /// Effective volume for sound effects
    pub fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Enemy speed on the given (1-based) level
    pub fn enemy_speed_for_level(&self, level: u32) -> f32 {
        let extra = level.saturating_sub(1) as f32 * self.enemy.speed_growth;
        self.enemy.speed * (1.0 + extra)
    }
}
