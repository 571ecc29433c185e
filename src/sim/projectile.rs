//! Player projectiles and the projectile/enemy hit sweep

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Facing;
use super::enemy::Enemy;
use super::rect::Rect;
use crate::consts::{PROJECTILE_SIZE, PROJECTILE_SPEED, WIDTH};

/// A straight-flying shot. Direction is fixed at spawn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub rect: Rect,
    direction: Facing,
}

impl Projectile {
    pub fn spawn(center: Vec2, direction: Facing) -> Self {
        Self {
            rect: Rect::centered(center, PROJECTILE_SIZE, PROJECTILE_SIZE),
            direction,
        }
    }

    #[inline]
    pub fn direction(&self) -> Facing {
        self.direction
    }

    pub fn advance(&mut self) {
        self.rect.x += PROJECTILE_SPEED * self.direction.sign();
    }

    /// Left the horizontal playfield (vertical position is irrelevant)
    pub fn out_of_bounds(&self) -> bool {
        self.rect.x <= 0.0 || self.rect.x >= WIDTH
    }
}

/// Outcome of one projectile sweep
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SweepResult {
    /// Enemy hits landed (including hits on already-defeated enemies)
    pub hits: usize,
    /// Indices of enemies defeated during this sweep, each listed once
    pub defeated: Vec<usize>,
}

/// Move every projectile and resolve enemy contacts.
///
/// Two-phase: removals are only marked during the sweep and compacted at
/// the end, so every projectile sees the same enemy list. A projectile that
/// overlaps several enemies hits each of them. Defeated enemies are *not*
/// removed here; the caller owns scoring and compaction of `enemies`.
pub fn sweep(projectiles: &mut Vec<Projectile>, enemies: &mut [Enemy]) -> SweepResult {
    let mut result = SweepResult::default();
    let mut spent = vec![false; projectiles.len()];
    let mut defeated = vec![false; enemies.len()];

    for (i, shot) in projectiles.iter_mut().enumerate() {
        shot.advance();
        if shot.out_of_bounds() {
            spent[i] = true;
            continue;
        }
        for (j, enemy) in enemies.iter_mut().enumerate() {
            if !shot.rect.intersects(enemy.rect()) {
                continue;
            }
            let was_defeated = enemy.is_defeated();
            enemy.on_hit();
            spent[i] = true;
            result.hits += 1;
            if enemy.is_defeated() && !was_defeated && !defeated[j] {
                defeated[j] = true;
                result.defeated.push(j);
            }
        }
    }

    let mut idx = 0;
    projectiles.retain(|_| {
        let keep = !spent[idx];
        idx += 1;
        keep
    });

    result
}
