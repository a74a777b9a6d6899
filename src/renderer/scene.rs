//! Snapshot to view-space geometry
//!
//! Every entity is drawn as a colored box standing in for its sprite.
//! Positions are translated by the camera offset; anything fully outside
//! the view is skipped.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::sim::{Aabb, Camera, Snapshot};

/// Logical sprite names, as the asset collaborator knows them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    Player,
    Enemy,
    Treasure,
    Boss,
    Launcher,
    Bullet,
    Wall,
}

impl Sprite {
    pub fn name(self) -> &'static str {
        match self {
            Sprite::Player => "player",
            Sprite::Enemy => "enemy",
            Sprite::Treasure => "treasure",
            Sprite::Boss => "boss",
            Sprite::Launcher => "launcher",
            Sprite::Bullet => "bullet",
            Sprite::Wall => "wall",
        }
    }

    /// Flat color drawn in place of the image
    pub fn placeholder(self) -> [f32; 4] {
        match self {
            Sprite::Player => colors::PLAYER,
            Sprite::Enemy => colors::ENEMY,
            Sprite::Treasure => colors::TREASURE,
            Sprite::Boss => colors::BOSS,
            Sprite::Launcher => colors::LAUNCHER,
            Sprite::Bullet => colors::BULLET,
            Sprite::Wall => colors::WALL,
        }
    }
}

/// Builds the vertex list for one frame
pub struct SceneBuilder {
    camera: Camera,
    vertices: Vec<Vertex>,
}

impl SceneBuilder {
    fn new(snapshot: &Snapshot) -> Self {
        Self {
            camera: snapshot.camera,
            vertices: Vec::with_capacity(6 * (snapshot.walls.len() + snapshot.enemies.len() + 8)),
        }
    }

    fn visible(&self, bx: &Aabb) -> bool {
        let min = self.camera.world_to_view(bx.min());
        let max = self.camera.world_to_view(bx.max());
        let view = self.camera.size;
        max.x > 0.0 && max.y > 0.0 && min.x < view.x && min.y < view.y
    }

    fn sprite(&mut self, sprite: Sprite, bx: Aabb) {
        if self.visible(&bx) {
            let pos = self.camera.world_to_view(bx.pos);
            self.vertices
                .extend(shapes::rect(pos, bx.size, sprite.placeholder()));
        }
    }

    /// Health bar floating just above a box
    fn health_bar(&mut self, bx: Aabb, fraction: f32) {
        if self.visible(&bx) {
            let min = self.camera.world_to_view(bx.pos) - Vec2::new(0.0, 8.0);
            self.vertices.extend(shapes::bar(
                min,
                Vec2::new(bx.size.x, 4.0),
                fraction,
                colors::HEALTH_BAR,
                colors::HEALTH_BAR_BACK,
            ));
        }
    }
}

/// View-space vertices for everything visible in `snapshot`
pub fn build_scene(snapshot: &Snapshot) -> Vec<Vertex> {
    let mut scene = SceneBuilder::new(snapshot);

    for wall in &snapshot.walls {
        scene.sprite(Sprite::Wall, *wall);
    }
    for treasure in &snapshot.treasures {
        scene.sprite(Sprite::Treasure, treasure.bounds());
    }
    if snapshot.launcher.active {
        scene.sprite(Sprite::Launcher, snapshot.launcher.bounds());
    }
    for enemy in &snapshot.enemies {
        scene.sprite(Sprite::Enemy, enemy.bounds());
    }
    if snapshot.boss.active {
        let boss = &snapshot.boss;
        scene.sprite(Sprite::Boss, boss.bounds());
        let max = boss.max_health.max(1) as f32;
        scene.health_bar(boss.bounds(), boss.health as f32 / max);
    }
    for bullet in &snapshot.bullets {
        scene.sprite(Sprite::Bullet, bullet.bounds());
    }

    let player = &snapshot.player;
    scene.sprite(Sprite::Player, player.bounds());
    if player.has_launcher {
        let bx = player.bounds();
        if scene.visible(&bx) {
            scene.vertices.extend(shapes::outline(
                scene.camera.world_to_view(bx.pos),
                bx.size,
                3.0,
                colors::LAUNCHER,
            ));
        }
    }

    scene.vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::World;

    fn empty_snapshot() -> Snapshot {
        World::empty(GameConfig::default(), 1).snapshot()
    }

    #[test]
    fn test_player_only_scene() {
        let snap = empty_snapshot();
        // Boss and launcher are dormant
        let vertices = build_scene(&snap);
        assert_eq!(vertices.len(), 6);
        assert!(vertices.iter().all(|v| v.color == colors::PLAYER));
    }

    #[test]
    fn test_scene_is_camera_relative() {
        let mut world = World::empty(GameConfig::default(), 1);
        world.player.pos = Vec2::new(1000.0, 1000.0);
        world.camera.follow(world.player.pos, world.size());
        let vertices = build_scene(&world.snapshot());
        let min_x = vertices.iter().map(|v| v.position[0]).fold(f32::MAX, f32::min);
        let min_y = vertices.iter().map(|v| v.position[1]).fold(f32::MAX, f32::min);
        assert_eq!(min_x, 1000.0 - 600.0);
        assert_eq!(min_y, 1000.0 - 700.0);
    }

    #[test]
    fn test_offscreen_walls_are_culled() {
        let mut world = World::empty(GameConfig::default(), 1);
        world.walls.push(Aabb::new(300.0, 300.0, 50.0, 50.0));
        world.walls.push(Aabb::new(1500.0, 1500.0, 50.0, 50.0));
        let vertices = build_scene(&world.snapshot());
        let walls = vertices.iter().filter(|v| v.color == colors::WALL).count();
        assert_eq!(walls, 6);
    }

    #[test]
    fn test_active_boss_has_health_bar() {
        let mut world = World::empty(GameConfig::default(), 1);
        world.boss.pos = Vec2::new(200.0, 200.0);
        world.boss.active = true;
        world.boss.health = 10;
        let vertices = build_scene(&world.snapshot());
        assert!(vertices.iter().any(|v| v.color == colors::BOSS));
        assert!(vertices.iter().any(|v| v.color == colors::HEALTH_BAR));
    }

    #[test]
    fn test_sprite_names() {
        assert_eq!(Sprite::Launcher.name(), "launcher");
        assert_ne!(Sprite::Enemy.placeholder(), Sprite::Player.placeholder());
    }
}
