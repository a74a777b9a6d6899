//! Keyboard and pointer state
//!
//! Browser events write into an `InputState`; the loop samples it once at
//! the start of each tick. Held keys stay set until released. Triggers
//! (melee, shoot) latch until the next tick consumes them.

use glam::Vec2;

use crate::sim::{Camera, Held, TickInput};

/// Last-write-wins input flags
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: Held,
    melee: bool,
    shoot: bool,
    /// Pointer position in view (canvas) coordinates
    pointer: Option<Vec2>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a `keydown` by `KeyboardEvent.key`. Returns true if the key
    /// is bound, so the caller can suppress page scrolling.
    pub fn key_down(&mut self, key: &str) -> bool {
        match key {
            "ArrowUp" => self.held.up = true,
            "ArrowDown" => self.held.down = true,
            "ArrowLeft" => self.held.left = true,
            "ArrowRight" => self.held.right = true,
            " " | "Spacebar" => self.melee = true,
            "f" | "F" => self.shoot = true,
            _ => return false,
        }
        true
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        match key {
            "ArrowUp" => self.held.up = false,
            "ArrowDown" => self.held.down = false,
            "ArrowLeft" => self.held.left = false,
            "ArrowRight" => self.held.right = false,
            " " | "Spacebar" | "f" | "F" => {}
            _ => return false,
        }
        true
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.pointer = Some(Vec2::new(x, y));
    }

    /// Release everything, e.g. when the window loses focus
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Sample the state for one tick, consuming latched triggers. The pointer
    /// is mapped into world space through `camera`.
    pub fn take_tick_input(&mut self, camera: &Camera) -> TickInput {
        let input = TickInput {
            held: self.held,
            melee: self.melee,
            shoot: self.shoot,
            aim: self.pointer.map(|p| camera.view_to_world(p)),
        };

        // Clear one-shot inputs after sampling
        self.melee = false;
        self.shoot = false;

        input
    }
}
