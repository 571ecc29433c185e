//! Samurai Platformer - a side-scrolling platform brawler
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, AI, combat, game state)
//! - `render`: Snapshot of simulation state for an external renderer
//! - `audio`: Dispatch of simulation cues to an audio backend
//! - `settings`: Persisted player preferences
//! - `ui`: Menu layout and pointer hit-testing

pub mod audio;
pub mod render;
pub mod settings;
pub mod sim;
pub mod ui;

pub use audio::{AudioBackend, AudioError, AudioManager};
pub use render::RenderSnapshot;
pub use settings::{Settings, SettingsError};

/// Game configuration constants
///
/// Velocities are in units per tick, timers in seconds.
pub mod consts {
    /// Simulation step used by the headless driver (one tick per 60 Hz frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Playfield dimensions
    pub const WIDTH: f32 = 800.0;
    pub const HEIGHT: f32 = 600.0;
    /// Falling this far below the playfield ends the run
    pub const FALL_OUT_MARGIN: f32 = 50.0;

    /// Gravity integration
    pub const GRAVITY: f32 = 0.5;
    pub const MAX_FALL_SPEED: f32 = 10.0;

    /// Player
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    pub const PLAYER_JUMP_VELOCITY: f32 = -12.0;
    pub const PLAYER_WALK_SPEED: f32 = 3.0;
    pub const PLAYER_RUN_SPEED: f32 = 6.0;
    pub const PLAYER_MAX_HEALTH: i32 = 5;
    pub const ATTACK_COOLDOWN: f32 = 0.5;
    pub const ATTACK_ANIMATION_TIME: f32 = 0.3;
    pub const INVINCIBILITY_TIME: f32 = 1.5;

    /// Enemy
    pub const ENEMY_WIDTH: f32 = 40.0;
    pub const ENEMY_HEIGHT: f32 = 60.0;
    pub const ENEMY_HEALTH: i32 = 3;
    pub const ENEMY_WALK_SPEED: f32 = 1.5;
    pub const ENEMY_RUN_SPEED: f32 = 4.0;
    pub const ENEMY_SIGHT_RANGE: f32 = 200.0;
    pub const ENEMY_SIGHT_HEIGHT: f32 = 50.0;
    pub const ENEMY_ATTACK_COOLDOWN: f32 = 1.5;
    pub const ENEMY_EDGE_DETECTION_OFFSET: f32 = 5.0;
    pub const ENEMY_DEAGGRO_TIME: f32 = 5.0;
    pub const ENEMY_PATROL_TIME: (f32, f32) = (3.0, 6.0);
    pub const ENEMY_WAIT_TIME: (f32, f32) = (2.0, 4.0);

    /// Projectile
    pub const PROJECTILE_SPEED: f32 = 8.0;
    pub const PROJECTILE_SIZE: f32 = 10.0;

    /// Coin
    pub const COIN_SIZE: f32 = 24.0;
    pub const COIN_SCORE: u32 = 3;
    pub const COIN_HOVER: f32 = 16.0;

    /// Scoring / win condition
    pub const ENEMY_SCORE: u32 = 1;
    pub const ENEMIES_TO_WIN: u32 = 2;

    /// Animation clock
    pub const ANIMATION_FRAME_TIME: f32 = 0.1;
    pub const CHARACTER_FRAMES: usize = 2;
    pub const COIN_FRAMES: usize = 30;
}
