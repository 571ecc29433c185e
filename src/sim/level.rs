//! The fixed level layout
//!
//! Compiled-in data: one platform list, two patrolling enemies, the player
//! spawn, and a coin hovering over the topmost platform.

use glam::Vec2;
use rand::Rng;

use super::enemy::Enemy;
use super::physics::Platform;
use super::rect::Rect;
use crate::consts::{COIN_HOVER, COIN_SIZE, HEIGHT, WIDTH};

pub const PLAYER_SPAWN: Vec2 = Vec2::new(100.0, 400.0);

pub const PLATFORMS: [Platform; 4] = [
    Platform::new(0.0, 500.0, 800.0, 50.0),
    Platform::new(150.0, 400.0, 200.0, 30.0),
    Platform::new(450.0, 350.0, 150.0, 30.0),
    Platform::new(600.0, 250.0, 100.0, 30.0),
];

/// Where an enemy starts and the x-range it patrols
#[derive(Debug, Clone, Copy)]
pub struct EnemySpawn {
    pub pos: Vec2,
    pub patrol_start_x: f32,
    pub patrol_end_x: f32,
}

pub const ENEMY_SPAWNS: [EnemySpawn; 2] = [
    EnemySpawn {
        pos: Vec2::new(160.0, 340.0),
        patrol_start_x: 150.0,
        patrol_end_x: 350.0,
    },
    EnemySpawn {
        pos: Vec2::new(460.0, 290.0),
        patrol_start_x: 450.0,
        patrol_end_x: 600.0,
    },
];

pub fn platforms() -> Vec<Platform> {
    PLATFORMS.to_vec()
}

pub fn spawn_enemies<R: Rng + ?Sized>(rng: &mut R) -> Vec<Enemy> {
    ENEMY_SPAWNS
        .iter()
        .map(|s| Enemy::new(s.pos, s.patrol_start_x, s.patrol_end_x, rng))
        .collect()
}

/// Coin rectangle: top-left at the topmost platform's centre-x, hovering
/// above its top edge. Falls back to mid-screen for an empty layout.
pub fn coin_rect(platforms: &[Platform]) -> Rect {
    let top = platforms
        .iter()
        .min_by(|a, b| a.rect.top().total_cmp(&b.rect.top()));
    match top {
        Some(p) => Rect::new(p.rect.center_x(), p.rect.top() - COIN_HOVER, COIN_SIZE, COIN_SIZE),
        None => Rect::new(WIDTH / 2.0, HEIGHT / 2.0, COIN_SIZE, COIN_SIZE),
    }
}
