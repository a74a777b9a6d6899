//! Frame-driven game loop
//!
//! The host calls `GameLoop::frame` once per display frame. Each call runs
//! exactly one simulation tick, hands the raised events to audio, and
//! reports whether another frame should be scheduled.

use crate::audio::{AudioSink, Sound};
use crate::config::GameConfig;
use crate::error::GameResult;
use crate::input::InputState;
use crate::sim::{GameEvent, Snapshot, World, tick};

/// What the host should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Schedule another frame
    Continue,
    /// Life is over; stop scheduling and show the banner
    Finished { banner: &'static str },
}

/// Owns the world and the input state between frames
pub struct GameLoop {
    pub world: World,
    pub input: InputState,
    /// Frames run since the last (re)start
    pub frames: u64,
}

impl GameLoop {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        log::info!("New game with seed {}", seed);
        Self {
            world: World::new(config, seed),
            input: InputState::new(),
            frames: 0,
        }
    }

    /// Parse a JSON tuning document and start a game with it
    pub fn from_config_json(json: &str, seed: u64) -> GameResult<Self> {
        let config = GameConfig::from_json(json)?;
        Ok(Self::new(config, seed))
    }

    /// One simulation step. Does nothing once the life has ended.
    pub fn frame(&mut self, audio: &mut dyn AudioSink) -> FrameOutcome {
        if let Some(banner) = self.world.phase.banner() {
            return FrameOutcome::Finished { banner };
        }

        let input = self.input.take_tick_input(&self.world.camera);
        let dt = self.world.config.dt;
        tick(&mut self.world, &input, dt);
        self.frames += 1;

        for event in self.world.drain_events() {
            play_for_event(audio, &event);
        }

        match self.world.phase.banner() {
            Some(banner) => {
                log::info!("Run finished after {} frames: {}", self.frames, banner);
                FrameOutcome::Finished { banner }
            }
            None => FrameOutcome::Continue,
        }
    }

    /// Read-only state for the renderer
    pub fn snapshot(&self) -> Snapshot {
        self.world.snapshot()
    }

    /// In-place restart with the same tuning
    pub fn restart(&mut self, seed: u64) {
        let config = self.world.config.clone();
        self.world = World::new(config, seed);
        self.input.clear();
        self.frames = 0;
        log::info!("Game restarted with seed: {}", seed);
    }
}

/// Audio faults are logged and never stop the frame
fn play_for_event(audio: &mut dyn AudioSink, event: &GameEvent) {
    let Some(sound) = Sound::for_event(event) else {
        return;
    };
    if let Err(e) = audio.play(sound) {
        log::warn!("Sound '{}' skipped: {}", sound.name(), e);
    }
}
