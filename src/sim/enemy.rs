//! Enemy AI: patrol / wait / attack state machine with aggro pursuit
//!
//! Pursuit overrides the patrol sub-state whenever the player is in sight
//! or the enemy is aggroed. It moves the enemy but never consumes the
//! patrol or wait timers.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::body::{AnimState, AnimatedBody, Facing};
use super::physics::{self, GroundRule, Platform};
use super::player::Player;
use super::rect::Rect;
use crate::consts::*;

/// AI state. Pursuit is not a state of its own; see [`Enemy::is_pursuing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiState {
    Patrolling,
    Waiting,
    Attacking,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub body: AnimatedBody,
    pub vel: Vec2,
    pub on_ground: bool,
    pub patrol_start_x: f32,
    pub patrol_end_x: f32,
    pub facing: Facing,
    pub health: i32,
    pub state: AiState,
    pub patrol_timer: f32,
    pub wait_timer: f32,
    /// Seconds until the next melee attack is allowed
    pub cooldown_timer: f32,
    pub deaggro_timer: f32,
    pub is_aggro: bool,
    /// Whether the last update chased the player
    pub is_pursuing: bool,
}

impl Enemy {
    pub fn new<R: Rng + ?Sized>(pos: Vec2, patrol_start_x: f32, patrol_end_x: f32, rng: &mut R) -> Self {
        Self {
            body: AnimatedBody::new(
                Rect::new(pos.x, pos.y, ENEMY_WIDTH, ENEMY_HEIGHT),
                AnimState::Walk,
                Facing::Right,
                CHARACTER_FRAMES,
            ),
            vel: Vec2::ZERO,
            on_ground: false,
            patrol_start_x,
            patrol_end_x,
            facing: Facing::Right,
            health: ENEMY_HEALTH,
            state: AiState::Patrolling,
            patrol_timer: roll_patrol_time(rng),
            wait_timer: 0.0,
            cooldown_timer: 0.0,
            deaggro_timer: 0.0,
            is_aggro: false,
            is_pursuing: false,
        }
    }

    #[inline]
    pub fn rect(&self) -> &Rect {
        &self.body.rect
    }

    #[inline]
    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }

    /// Projectile contact. No-op once defeated.
    ///
    /// Returns `true` if the enemy is defeated after the hit.
    pub fn on_hit(&mut self) -> bool {
        if self.health > 0 {
            self.health -= 1;
            self.is_aggro = true;
            self.deaggro_timer = ENEMY_DEAGGRO_TIME;
        }
        self.is_defeated()
    }

    /// Player within sight range and roughly on the same level
    pub fn can_see(&self, target: &Rect) -> bool {
        let me = self.rect();
        me.center().distance(target.center()) < ENEMY_SIGHT_RANGE
            && (me.top() - target.top()).abs() < ENEMY_SIGHT_HEIGHT
    }

    /// Run one tick of AI and physics.
    ///
    /// Returns `true` if this enemy's attack damaged the player.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        player: &mut Player,
        platforms: &[Platform],
        rng: &mut R,
    ) -> bool {
        if self.cooldown_timer > 0.0 {
            self.cooldown_timer -= dt;
        }

        if self.state == AiState::Attacking && self.body.anim == AnimState::Attack && self.body.on_last_frame() {
            self.set_state(AiState::Patrolling);
        }

        self.on_ground = physics::fall(&mut self.body.rect, &mut self.vel, platforms, GroundRule::FallingOrResting);

        let in_sight = self.can_see(player.rect());
        if self.is_aggro {
            if in_sight {
                self.deaggro_timer = ENEMY_DEAGGRO_TIME;
            } else {
                self.deaggro_timer -= dt;
                if self.deaggro_timer <= 0.0 {
                    self.is_aggro = false;
                    log::debug!("enemy lost aggro");
                }
            }
        }
        let pursuing = in_sight || self.is_aggro;
        self.is_pursuing = pursuing;

        let mut landed_hit = false;
        if self.rect().intersects(player.rect()) && self.cooldown_timer <= 0.0 {
            self.set_state(AiState::Attacking);
            self.cooldown_timer = ENEMY_ATTACK_COOLDOWN;
            landed_hit = player.take_damage(1);
        }

        let (target_vx, anim) = match self.state {
            AiState::Attacking => (0.0, AnimState::Attack),
            _ if pursuing => {
                self.set_state(AiState::Patrolling);
                self.facing = if self.rect().center_x() < player.rect().center_x() {
                    Facing::Right
                } else {
                    Facing::Left
                };
                (ENEMY_RUN_SPEED * self.facing.sign(), AnimState::Run)
            }
            AiState::Patrolling => {
                self.patrol_timer -= dt;
                if self.patrol_timer <= 0.0 {
                    self.wait_timer = roll_wait_time(rng);
                    self.set_state(AiState::Waiting);
                }
                (ENEMY_WALK_SPEED * self.facing.sign(), AnimState::Walk)
            }
            AiState::Waiting => {
                self.wait_timer -= dt;
                if self.wait_timer <= 0.0 {
                    self.patrol_timer = roll_patrol_time(rng);
                    self.set_state(AiState::Patrolling);
                }
                (0.0, AnimState::Idle)
            }
        };

        if !pursuing && self.state == AiState::Patrolling && target_vx != 0.0 {
            let at_edge = self.on_ground && !physics::ground_ahead(self.rect(), target_vx, platforms);
            let at_bound = (target_vx > 0.0 && self.rect().right() >= self.patrol_end_x)
                || (target_vx < 0.0 && self.rect().left() <= self.patrol_start_x);
            if at_edge || at_bound {
                self.facing = self.facing.flipped();
            }
        }

        self.vel.x = target_vx;
        physics::slide(&mut self.body.rect, self.vel.x, platforms);

        self.body.set_animation(anim, self.facing);
        self.body.animate(dt);

        landed_hit
    }

    fn set_state(&mut self, state: AiState) {
        if self.state != state {
            log::debug!("enemy {:?} -> {:?}", self.state, state);
            self.state = state;
        }
    }
}

fn roll_patrol_time<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.random_range(ENEMY_PATROL_TIME.0..=ENEMY_PATROL_TIME.1)
}

fn roll_wait_time<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.random_range(ENEMY_WAIT_TIME.0..=ENEMY_WAIT_TIME.1)
}
