//! Player controller
//!
//! Movement intents come from held direction keys; jump and attack are
//! one-shot requests that are silently ignored when their preconditions
//! fail.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{AnimState, AnimatedBody, Facing};
use super::physics::{self, GroundRule, Platform};
use super::projectile::Projectile;
use super::rect::Rect;
use crate::consts::*;

/// Held direction keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
}

impl Controls {
    /// Requested direction; left wins if both are held
    pub fn direction(&self) -> Option<Facing> {
        if self.left {
            Some(Facing::Left)
        } else if self.right {
            Some(Facing::Right)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: AnimatedBody,
    pub vel: Vec2,
    pub on_ground: bool,
    pub facing: Facing,
    pub is_moving: bool,
    /// Run modifier held
    pub is_running: bool,
    pub is_attacking: bool,
    /// Seconds until another attack is allowed
    pub attack_cooldown: f32,
    /// Seconds left in the attack pose
    pub attack_timer: f32,
    pub health: i32,
    pub max_health: i32,
    /// Seconds of damage immunity left
    pub invincibility_timer: f32,
}

impl Player {
    pub fn new(spawn: Vec2) -> Self {
        Self {
            body: AnimatedBody::new(
                Rect::new(spawn.x, spawn.y, PLAYER_WIDTH, PLAYER_HEIGHT),
                AnimState::Idle,
                Facing::Right,
                CHARACTER_FRAMES,
            ),
            vel: Vec2::ZERO,
            on_ground: false,
            facing: Facing::Right,
            is_moving: false,
            is_running: false,
            is_attacking: false,
            attack_cooldown: 0.0,
            attack_timer: 0.0,
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            invincibility_timer: 0.0,
        }
    }

    #[inline]
    pub fn rect(&self) -> &Rect {
        &self.body.rect
    }

    /// Advance timers, apply movement intent and physics, pick animation
    pub fn update(&mut self, dt: f32, controls: &Controls, platforms: &[Platform]) {
        if self.attack_cooldown > 0.0 {
            self.attack_cooldown -= dt;
        }
        if self.attack_timer > 0.0 {
            self.attack_timer -= dt;
            if self.attack_timer <= 0.0 {
                self.is_attacking = false;
            }
        }
        if self.invincibility_timer > 0.0 {
            self.invincibility_timer -= dt;
        }

        match controls.direction() {
            Some(dir) if !self.is_attacking => {
                let speed = if self.is_running {
                    PLAYER_RUN_SPEED
                } else {
                    PLAYER_WALK_SPEED
                };
                self.vel.x = speed * dir.sign();
                self.facing = dir;
                self.is_moving = true;
            }
            _ => {
                self.vel.x = 0.0;
                self.is_moving = false;
            }
        }

        self.on_ground = physics::fall(&mut self.body.rect, &mut self.vel, platforms, GroundRule::Falling);
        physics::slide(&mut self.body.rect, self.vel.x, platforms);

        let anim = if self.is_attacking {
            AnimState::Attack
        } else if self.is_moving && self.is_running {
            AnimState::Run
        } else if self.is_moving {
            AnimState::Walk
        } else {
            AnimState::Idle
        };
        self.body.set_animation(anim, self.facing);
        self.body.animate(dt);
    }

    /// Jump impulse. Returns `false` (no-op) when airborne or attacking.
    pub fn jump(&mut self) -> bool {
        if !self.on_ground || self.is_attacking {
            return false;
        }
        self.vel.y = PLAYER_JUMP_VELOCITY;
        true
    }

    /// Attack if the cooldown has elapsed, spawning a projectile from the
    /// player's centre in the current facing.
    pub fn try_attack(&mut self) -> Option<Projectile> {
        if self.attack_cooldown > 0.0 {
            return None;
        }
        self.attack_cooldown = ATTACK_COOLDOWN;
        self.is_attacking = true;
        self.attack_timer = ATTACK_ANIMATION_TIME;
        Some(Projectile::spawn(self.body.rect.center(), self.facing))
    }

    /// Apply damage unless invincible. Returns whether damage landed.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if self.invincibility_timer > 0.0 {
            return false;
        }
        self.health = (self.health - amount).max(0);
        self.invincibility_timer = INVINCIBILITY_TIME;
        true
    }

    #[inline]
    pub fn is_invincible(&self) -> bool {
        self.invincibility_timer > 0.0
    }

    /// Blink phase for rendering while invincible
    pub fn blink_visible(&self) -> bool {
        !self.is_invincible() || ((self.invincibility_timer * 10.0) as i32) % 2 == 0
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }
}
