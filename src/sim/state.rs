//! Session state and game-wide types
//!
//! `GameState` owns everything the simulation touches: the level's
//! entities, score, phase, and the seeded RNG driving enemy timers.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::{AnimState, AnimatedBody, Facing};
use super::enemy::Enemy;
use super::level;
use super::physics::Platform;
use super::player::{Controls, Player};
use super::projectile::Projectile;
use super::rect::Rect;
use crate::consts::COIN_FRAMES;

/// Top-level game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title menu with Start / Audio / Exit buttons
    Menu,
    /// Active gameplay
    Playing,
    /// Player died or fell out of the world
    GameOver,
    /// Both enemies defeated and coin collected
    Victory,
}

/// One-shot sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    Jump,
    Shoot,
    PlayerHit,
    CoinCollect,
}

/// Background music commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MusicCue {
    Play,
    Stop,
}

/// Things that happened during a tick, for audio and other observers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Sound(SoundCue),
    Music(MusicCue),
    PhaseChanged { from: GamePhase, to: GamePhase },
    CoinCollected,
    EnemyDefeated { total: u32 },
    PlayerDamaged { health: i32 },
    ExitRequested,
}

/// The level's single collectible
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub body: AnimatedBody,
}

impl Coin {
    pub fn new(rect: Rect) -> Self {
        Self {
            body: AnimatedBody::new(rect, AnimState::Spin, Facing::Right, COIN_FRAMES),
        }
    }

    #[inline]
    pub fn rect(&self) -> &Rect {
        &self.body.rect
    }
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub phase: GamePhase,
    pub score: u32,
    pub enemies_defeated: u32,
    pub coin_collected: bool,
    /// Persistent across levels; gates sound cues and music
    pub audio_enabled: bool,
    /// Exit button was pressed; the driver should shut down
    pub exit_requested: bool,
    /// Ticks simulated in the current level
    pub time_ticks: u64,
    pub controls: Controls,
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub coin: Coin,
    #[serde(skip)]
    pub(crate) events: Vec<GameEvent>,
    /// Full generator state, so a restored session continues the same stream
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// New session sitting in the menu. The level is pre-built so every
    /// field is always valid; starting play rebuilds it.
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let platforms = level::platforms();
        let enemies = level::spawn_enemies(&mut rng);
        let coin = Coin::new(level::coin_rect(&platforms));
        Self {
            seed,
            phase: GamePhase::Menu,
            score: 0,
            enemies_defeated: 0,
            coin_collected: false,
            audio_enabled: true,
            exit_requested: false,
            time_ticks: 0,
            controls: Controls::default(),
            player: Player::new(level::PLAYER_SPAWN),
            platforms,
            enemies,
            projectiles: Vec::new(),
            coin,
            events: Vec::new(),
            rng,
        }
    }

    /// Reset score and counters and rebuild the level from its fixed layout
    pub fn setup_level(&mut self) {
        self.score = 0;
        self.enemies_defeated = 0;
        self.coin_collected = false;
        self.time_ticks = 0;
        self.player = Player::new(level::PLAYER_SPAWN);
        self.platforms = level::platforms();
        self.enemies = level::spawn_enemies(&mut self.rng);
        self.coin = Coin::new(level::coin_rect(&self.platforms));
        self.projectiles.clear();
        log::info!(
            "Level set up: {} platforms, {} enemies",
            self.platforms.len(),
            self.enemies.len()
        );
    }

    /// Change phase, emitting the transition and its music side effects
    pub fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        if from == to {
            return;
        }
        log::info!("Phase {:?} -> {:?} (score {})", from, to, self.score);
        self.phase = to;
        self.events.push(GameEvent::PhaseChanged { from, to });
        match to {
            GamePhase::Playing | GamePhase::Menu => self.play_music(),
            GamePhase::GameOver | GamePhase::Victory => {
                self.events.push(GameEvent::Music(MusicCue::Stop));
            }
        }
    }

    /// Flip the persistent audio toggle, starting or stopping music
    pub fn toggle_audio(&mut self) {
        self.audio_enabled = !self.audio_enabled;
        log::info!("Audio {}", if self.audio_enabled { "on" } else { "off" });
        if self.audio_enabled {
            self.play_music();
        } else {
            self.events.push(GameEvent::Music(MusicCue::Stop));
        }
    }

    /// Queue a sound cue (dropped while audio is disabled)
    pub fn cue(&mut self, cue: SoundCue) {
        if self.audio_enabled {
            self.events.push(GameEvent::Sound(cue));
        }
    }

    fn play_music(&mut self) {
        if self.audio_enabled {
            self.events.push(GameEvent::Music(MusicCue::Play));
        }
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events raised since the last drain, oldest first
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[test]
    fn test_new_state_in_menu_with_level() {
        let state = GameState::new(42);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.score, 0);
        assert_eq!(state.enemies.len(), 2);
        assert_eq!(state.platforms.len(), 4);
        assert!(state.projectiles.is_empty());
        assert!(state.audio_enabled);
        assert_eq!(state.player.rect().top_left(), level::PLAYER_SPAWN);
    }

    #[test]
    fn test_setup_level_resets_counters() {
        let mut state = GameState::new(42);
        state.score = 7;
        state.enemies_defeated = 2;
        state.coin_collected = true;
        state.enemies.clear();
        state.player.health = 1;
        state.projectiles.push(Projectile::spawn(glam::Vec2::new(10.0, 10.0), Facing::Right));

        state.setup_level();
        assert_eq!(state.score, 0);
        assert_eq!(state.enemies_defeated, 0);
        assert!(!state.coin_collected);
        assert_eq!(state.enemies.len(), 2);
        assert_eq!(state.player.health, PLAYER_MAX_HEALTH);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_cues_gated_by_audio_toggle() {
        let mut state = GameState::new(1);
        state.cue(SoundCue::Jump);
        state.toggle_audio();
        state.cue(SoundCue::Shoot);

        assert_eq!(
            state.drain_events(),
            vec![
                GameEvent::Sound(SoundCue::Jump),
                GameEvent::Music(MusicCue::Stop),
            ]
        );
        assert!(state.events().is_empty());
    }

    #[test]
    fn test_phase_music() {
        let mut state = GameState::new(1);
        state.set_phase(GamePhase::Playing);
        state.set_phase(GamePhase::Victory);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Music(MusicCue::Play)));
        assert_eq!(events.last(), Some(&GameEvent::Music(MusicCue::Stop)));

        // same phase is not a transition
        state.set_phase(GamePhase::Victory);
        assert!(state.events().is_empty());
    }

    #[test]
    fn test_serde_roundtrip_keeps_rng_stream() {
        let mut state = GameState::new(99);
        state.setup_level();

        let json = serde_json::to_string(&state).expect("serialize");
        let mut restored: GameState = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored.seed, 99);

        state.setup_level();
        restored.setup_level();
        let timers = |s: &GameState| s.enemies.iter().map(|e| e.patrol_timer).collect::<Vec<_>>();
        assert_eq!(timers(&restored), timers(&state));
    }
}
