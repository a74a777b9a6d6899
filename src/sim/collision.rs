//! Axis-aligned box overlap and distance helpers
//!
//! Every entity in the arena is a box anchored at its top-left corner. Walls
//! are boxes with independent width and height; everything else is square.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};

/// Axis-aligned bounding box, `pos` is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Square box of side `size`
    pub fn square(pos: Vec2, size: f32) -> Self {
        Self {
            pos,
            size: Vec2::splat(size),
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Finite position and non-negative extent
    pub fn validate(&self) -> GameResult<()> {
        if !self.pos.is_finite() || !self.size.is_finite() {
            return Err(GameError::InvalidCollisionInput(format!(
                "non-finite box {:?}",
                self
            )));
        }
        if self.size.x < 0.0 || self.size.y < 0.0 {
            return Err(GameError::InvalidCollisionInput(format!(
                "negative size {:?}",
                self.size
            )));
        }
        Ok(())
    }

    /// Strict overlap test: boxes that only touch along an edge do not overlap.
    ///
    /// Malformed boxes trip a debug assertion; release builds treat them as
    /// never overlapping anything.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let valid = self.validate().and_then(|_| other.validate());
        debug_assert!(valid.is_ok(), "{:?}", valid);
        if valid.is_err() {
            return false;
        }

        self.pos.x < other.pos.x + other.size.x
            && self.pos.x + self.size.x > other.pos.x
            && self.pos.y < other.pos.y + other.size.y
            && self.pos.y + self.size.y > other.pos.y
    }

    /// Does the box intersect the circle at `center` with `radius`?
    pub fn intersects_circle(&self, center: Vec2, radius: f32) -> bool {
        let closest = center.clamp(self.min(), self.max());
        closest.distance_squared(center) < radius * radius
    }

    /// Is the box entirely inside `[0, bounds.x] x [0, bounds.y]`?
    pub fn within(&self, bounds: Vec2) -> bool {
        self.pos.x >= 0.0
            && self.pos.y >= 0.0
            && self.max().x <= bounds.x
            && self.max().y <= bounds.y
    }
}

/// Box overlap for two entities
#[inline]
pub fn overlaps(a: &Aabb, b: &Aabb) -> bool {
    a.overlaps(b)
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Does `bx` overlap any of `walls`?
pub fn hits_any(bx: &Aabb, walls: &[Aabb]) -> bool {
    walls.iter().any(|w| bx.overlaps(w))
}
