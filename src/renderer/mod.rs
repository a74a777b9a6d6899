//! WebGPU rendering module
//!
//! Snapshots become flat colored quads in view space (`scene`), which the
//! pipeline maps to clip space and draws. HUD strings are produced here but
//! written into the page by the web entry point.

pub mod hud;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use hud::HudText;
pub use pipeline::RenderState;
pub use scene::{Sprite, build_scene};
pub use vertex::Vertex;
