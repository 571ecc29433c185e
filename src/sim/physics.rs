//! Gravity integration and platform collision resolution
//!
//! Resolution is split in two passes per tick: vertical first, then
//! horizontal. Landing is decided before any sideways push-out, so a body
//! that clips the corner of a platform lands on it instead of being shoved
//! off the side.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::{ENEMY_EDGE_DETECTION_OFFSET, GRAVITY, MAX_FALL_SPEED};

/// Static level geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
}

impl Platform {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
        }
    }
}

/// When an intersecting platform counts as ground
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroundRule {
    /// Only while moving down (`vy > 0`); used by the player
    Falling,
    /// Also while vertically at rest (`vy >= 0`); used by enemies
    FallingOrResting,
}

impl GroundRule {
    #[inline]
    fn allows(self, vy: f32) -> bool {
        match self {
            GroundRule::Falling => vy > 0.0,
            GroundRule::FallingOrResting => vy >= 0.0,
        }
    }
}

/// Accelerate downward, clamped to terminal velocity
#[inline]
pub fn apply_gravity(vy: f32) -> f32 {
    (vy + GRAVITY).min(MAX_FALL_SPEED)
}

/// Gravity plus the vertical pass. Returns whether the body ended on ground.
///
/// Every platform is checked in list order; the last one that snaps wins.
pub fn fall(rect: &mut Rect, vel: &mut Vec2, platforms: &[Platform], rule: GroundRule) -> bool {
    vel.y = apply_gravity(vel.y);
    rect.y += vel.y;

    let mut on_ground = false;
    for p in platforms {
        if rect.intersects(&p.rect) && rule.allows(vel.y) {
            rect.set_bottom(p.rect.top());
            vel.y = 0.0;
            on_ground = true;
        }
    }
    on_ground
}

/// Horizontal pass: move by `vx` and push out of any platform hit
pub fn slide(rect: &mut Rect, vx: f32, platforms: &[Platform]) {
    rect.x += vx;
    for p in platforms {
        if rect.intersects(&p.rect) {
            if vx > 0.0 {
                rect.set_right(p.rect.left());
            } else if vx < 0.0 {
                rect.set_left(p.rect.right());
            }
        }
    }
}

/// Full per-tick step for a body whose horizontal velocity is already known
pub fn step(rect: &mut Rect, vel: &mut Vec2, platforms: &[Platform], rule: GroundRule) -> bool {
    let on_ground = fall(rect, vel, platforms, rule);
    slide(rect, vel.x, platforms);
    on_ground
}

/// Probe a single point just past the leading edge and below the feet.
///
/// Returns `true` if some platform is there to walk onto.
pub fn ground_ahead(rect: &Rect, vx: f32, platforms: &[Platform]) -> bool {
    let probe_x = if vx > 0.0 {
        rect.right() + ENEMY_EDGE_DETECTION_OFFSET
    } else {
        rect.left() - ENEMY_EDGE_DETECTION_OFFSET
    };
    let probe = Rect::new(probe_x, rect.bottom() + ENEMY_EDGE_DETECTION_OFFSET, 1.0, 1.0);
    platforms.iter().any(|p| probe.intersects(&p.rect))
}
