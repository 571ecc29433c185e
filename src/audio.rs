//! Audio dispatch
//!
//! The simulation only raises cues. `AudioManager` forwards them to a
//! backend and swallows backend failures so a missing sound device never
//! reaches gameplay.

use thiserror::Error;

use crate::settings::Settings;
use crate::sim::{GameEvent, MusicCue, SoundCue};

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio device unavailable")]
    Unavailable,
    #[error("failed to play {name}: {reason}")]
    Playback { name: &'static str, reason: String },
}

impl SoundCue {
    /// Asset name for the cue
    pub fn asset_name(self) -> &'static str {
        match self {
            SoundCue::Jump => "jump_sound",
            SoundCue::Shoot => "shoot_sound",
            SoundCue::PlayerHit => "player_hit",
            SoundCue::CoinCollect => "coin_collect",
        }
    }
}

/// Background music track name
pub const MUSIC_TRACK: &str = "background_music";

/// Something that can actually make noise
pub trait AudioBackend {
    fn play_sound(&mut self, name: &'static str, volume: f32) -> Result<(), AudioError>;
    fn play_music(&mut self, name: &'static str, volume: f32) -> Result<(), AudioError>;
    fn stop_music(&mut self) -> Result<(), AudioError>;
}

/// Backend that only logs; used by the headless driver
#[derive(Debug, Default)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn play_sound(&mut self, name: &'static str, volume: f32) -> Result<(), AudioError> {
        log::info!("sound {} (volume {:.2})", name, volume);
        Ok(())
    }

    fn play_music(&mut self, name: &'static str, volume: f32) -> Result<(), AudioError> {
        log::info!("music {} (volume {:.2})", name, volume);
        Ok(())
    }

    fn stop_music(&mut self) -> Result<(), AudioError> {
        log::info!("music stopped");
        Ok(())
    }
}

/// Audio manager for the game
pub struct AudioManager<B: AudioBackend> {
    backend: B,
    music_volume: f32,
    sfx_volume: f32,
    failures: u32,
}

impl<B: AudioBackend> AudioManager<B> {
    pub fn new(backend: B, settings: &Settings) -> Self {
        Self {
            backend,
            music_volume: settings.music_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            failures: 0,
        }
    }

    /// Forward audio-related events; everything else is ignored
    pub fn dispatch(&mut self, events: &[GameEvent]) {
        for event in events {
            let result = match event {
                GameEvent::Sound(cue) => self.backend.play_sound(cue.asset_name(), self.sfx_volume),
                GameEvent::Music(MusicCue::Play) => self.backend.play_music(MUSIC_TRACK, self.music_volume),
                GameEvent::Music(MusicCue::Stop) => self.backend.stop_music(),
                _ => Ok(()),
            };
            if let Err(e) = result {
                self.failures += 1;
                log::warn!("Audio error (ignored): {}", e);
            }
        }
    }

    /// Backend errors swallowed so far
    pub fn failures(&self) -> u32 {
        self.failures
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}
