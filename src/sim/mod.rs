//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Elapsed time comes in as `dt`, never read from a clock
//! - Seeded RNG only
//! - Fixed update order within a tick
//! - No rendering, audio, or platform dependencies

pub mod body;
pub mod enemy;
pub mod level;
pub mod physics;
pub mod player;
pub mod projectile;
pub mod rect;
pub mod state;
pub mod tick;

pub use body::{AnimState, AnimatedBody, Facing};
pub use enemy::{AiState, Enemy};
pub use physics::{GroundRule, Platform};
pub use player::{Controls, Player};
pub use projectile::{Projectile, SweepResult};
pub use rect::Rect;
pub use state::{Coin, GameEvent, GamePhase, GameState, MusicCue, SoundCue};
pub use tick::{InputEvent, Key, TickInput, handle_event, tick};
