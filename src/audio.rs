//! Sound effects
//!
//! Sounds are addressed by logical name. Playback is fire-and-forget: a sink
//! that cannot play reports `AssetUnavailable` and the caller logs it and
//! carries on. On the web every effect is synthesized with the Web Audio API,
//! so no audio files need to load.

use crate::error::GameResult;
use crate::sim::GameEvent;

/// Named sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sound {
    /// Player took damage, or landed a hit
    Hit,
    /// Life ended
    GameOver,
    /// Treasure or launcher picked up
    Treasure,
    /// Melee swing
    Attack,
    /// Launcher fired
    Shoot,
}

impl Sound {
    pub fn name(self) -> &'static str {
        match self {
            Sound::Hit => "hit",
            Sound::GameOver => "gameover",
            Sound::Treasure => "treasure",
            Sound::Attack => "attack",
            Sound::Shoot => "shoot",
        }
    }

    /// Sound played for a simulation event, if any
    pub fn for_event(event: &GameEvent) -> Option<Sound> {
        match event {
            GameEvent::PlayerHit { .. } | GameEvent::EnemyHit { .. } | GameEvent::BossHit { .. } => {
                Some(Sound::Hit)
            }
            GameEvent::EnemyKilled { .. } | GameEvent::BossDefeated => Some(Sound::Hit),
            GameEvent::TreasureCollected { .. } | GameEvent::LauncherPickedUp => {
                Some(Sound::Treasure)
            }
            GameEvent::MeleeSwing => Some(Sound::Attack),
            GameEvent::Shot => Some(Sound::Shoot),
            GameEvent::GameOver => Some(Sound::GameOver),
            GameEvent::Victory => Some(Sound::Treasure),
            GameEvent::LauncherAvailable
            | GameEvent::BossActivated
            | GameEvent::LevelAdvanced { .. } => None,
        }
    }
}

/// Anything that can play a named sound
pub trait AudioSink {
    fn play(&mut self, sound: Sound) -> GameResult<()>;
}

/// Sink that drops everything. Used natively and in tests.
#[derive(Debug, Default)]
pub struct SilentAudio {
    /// Every sound requested so far, in order
    pub played: Vec<Sound>,
}

impl AudioSink for SilentAudio {
    fn play(&mut self, sound: Sound) -> GameResult<()> {
        log::trace!("(silent) {}", sound.name());
        self.played.push(sound);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, AudioContextState, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioSink, Sound};
    use crate::error::{GameError, GameResult};

    /// Procedural synth on top of a browser `AudioContext`
    pub struct WebAudio {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl WebAudio {
        pub fn new(volume: f32) -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: volume.clamp(0.0, 1.0),
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        fn unavailable(sound: Sound, reason: impl Into<String>) -> GameError {
            GameError::AssetUnavailable {
                name: sound.name(),
                reason: reason.into(),
            }
        }

        fn create_osc(
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Single tone with an exponential decay and optional pitch sweep
        fn blip(
            ctx: &AudioContext,
            vol: f32,
            from: f32,
            to: f32,
            length: f64,
            osc_type: OscillatorType,
        ) -> Option<()> {
            let (osc, gain) = Self::create_osc(ctx, from, osc_type)?;
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol, t).ok()?;
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + length)
                .ok()?;
            if to != from {
                osc.frequency().set_value_at_time(from, t).ok()?;
                osc.frequency()
                    .exponential_ramp_to_value_at_time(to, t + length)
                    .ok()?;
            }

            osc.start().ok()?;
            osc.stop_with_when(t + length + 0.05).ok()
        }

        /// Notes played one after another
        fn arpeggio(
            ctx: &AudioContext,
            vol: f32,
            notes: &[f32],
            step: f64,
            length: f64,
            osc_type: OscillatorType,
        ) -> Option<()> {
            for (i, freq) in notes.iter().enumerate() {
                let (osc, gain) = Self::create_osc(ctx, *freq, osc_type)?;
                let t = ctx.current_time() + i as f64 * step;
                gain.gain().set_value_at_time(vol, t).ok()?;
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + length)
                    .ok()?;
                osc.start_with_when(t).ok()?;
                osc.stop_with_when(t + length + 0.05).ok()?;
            }
            Some(())
        }
    }

    impl AudioSink for WebAudio {
        fn play(&mut self, sound: Sound) -> GameResult<()> {
            if self.volume <= 0.0 {
                return Ok(());
            }
            let Some(ctx) = &self.ctx else {
                return Err(Self::unavailable(sound, "no AudioContext"));
            };

            // Browsers keep the context suspended until a user gesture
            if ctx.state() == AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let vol = self.volume;
            let played = match sound {
                // Solid thump
                Sound::Hit => Self::blip(ctx, vol * 0.6, 150.0, 60.0, 0.1, OscillatorType::Sine),
                // Sad descending
                Sound::GameOver => Self::arpeggio(
                    ctx,
                    vol * 0.3,
                    &[400.0, 350.0, 300.0, 200.0],
                    0.2,
                    0.3,
                    OscillatorType::Sine,
                ),
                // Happy ding
                Sound::Treasure => Self::arpeggio(
                    ctx,
                    vol * 0.25,
                    &[600.0, 800.0, 1000.0],
                    0.08,
                    0.15,
                    OscillatorType::Sine,
                ),
                // Short swish
                Sound::Attack => {
                    Self::blip(ctx, vol * 0.3, 500.0, 200.0, 0.08, OscillatorType::Triangle)
                }
                // Whoosh up
                Sound::Shoot => {
                    Self::blip(ctx, vol * 0.3, 200.0, 600.0, 0.15, OscillatorType::Square)
                }
            };

            played.ok_or_else(|| Self::unavailable(sound, "Web Audio node setup failed"))
        }
    }
}
