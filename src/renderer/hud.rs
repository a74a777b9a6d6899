//! HUD text
//!
//! The page shows health, score and level in text fields and a banner once
//! the run ends. This computes the strings; the web entry point writes them.

use crate::sim::Snapshot;

/// DOM element ids the HUD writes to
pub const HEALTH_ELEMENT: &str = "player-health";
pub const SCORE_ELEMENT: &str = "score";
pub const LEVEL_ELEMENT: &str = "level";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudText {
    pub health: String,
    pub score: String,
    pub level: String,
    pub banner: Option<&'static str>,
}

impl HudText {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            // 99.5 after one enemy contact, 100 when whole
            health: format!("{}", snapshot.player.health),
            score: snapshot.player.score.to_string(),
            level: snapshot.level.to_string(),
            banner: snapshot.banner(),
        }
    }
}
