//! Scrolling viewport
//!
//! The camera is derived from the player every tick. It only translates what
//! gets drawn; collision and combat always work in world coordinates.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Top-left corner of the view, in world coordinates
    pub offset: Vec2,
    /// Visible window size
    pub size: Vec2,
}

impl Camera {
    pub fn new(size: Vec2) -> Self {
        Self {
            offset: Vec2::ZERO,
            size,
        }
    }

    /// Center the view on `target` (the player's top-left corner), never
    /// showing anything outside the world
    pub fn follow(&mut self, target: Vec2, world_size: Vec2) {
        self.offset = follow_offset(target, self.size, world_size);
    }

    /// World point to view (screen) space
    pub fn world_to_view(&self, p: Vec2) -> Vec2 {
        p - self.offset
    }

    /// View (screen) point to world space, e.g. for pointer aiming
    pub fn view_to_world(&self, p: Vec2) -> Vec2 {
        p + self.offset
    }
}

/// `clamp(target - view/2, 0, world - view)` per axis
pub fn follow_offset(target: Vec2, view: Vec2, world_size: Vec2) -> Vec2 {
    let max = (world_size - view).max(Vec2::ZERO);
    (target - view * 0.5).clamp(Vec2::ZERO, max)
}
