//! Shared entity body: rectangle plus animation clock
//!
//! The simulation only tracks *logical* animation state. Which sprite
//! sequence that maps to is the renderer's business.

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::ANIMATION_FRAME_TIME;

/// Horizontal facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// -1.0 for left, +1.0 for right
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }
}

/// Logical animation sequences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimState {
    Idle,
    Walk,
    Run,
    Attack,
    /// Coin spin
    Spin,
}

/// A rectangle with an animation clock attached
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimatedBody {
    pub rect: Rect,
    /// Current sequence and the facing it was selected for
    pub anim: AnimState,
    pub anim_facing: Facing,
    /// Frames in the current sequence
    pub frame_count: usize,
    /// Index of the displayed frame
    pub frame: usize,
    /// Time accumulated toward the next frame
    pub timer: f32,
}

impl AnimatedBody {
    pub fn new(rect: Rect, anim: AnimState, facing: Facing, frame_count: usize) -> Self {
        Self {
            rect,
            anim,
            anim_facing: facing,
            frame_count,
            frame: 0,
            timer: 0.0,
        }
    }

    /// Switch sequence; restarts the clock only if the sequence changed
    pub fn set_animation(&mut self, anim: AnimState, facing: Facing) {
        if self.anim != anim || self.anim_facing != facing {
            self.anim = anim;
            self.anim_facing = facing;
            self.frame = 0;
            self.timer = 0.0;
        }
    }

    /// Advance the clock. The accumulator resets on each frame step.
    pub fn animate(&mut self, dt: f32) {
        if self.frame_count <= 1 {
            self.frame = 0;
            return;
        }
        self.timer += dt;
        if self.timer >= ANIMATION_FRAME_TIME {
            self.timer = 0.0;
            self.frame = (self.frame + 1) % self.frame_count;
        }
    }

    pub fn on_last_frame(&self) -> bool {
        self.frame + 1 >= self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(frames: usize) -> AnimatedBody {
        AnimatedBody::new(Rect::new(0.0, 0.0, 10.0, 10.0), AnimState::Idle, Facing::Right, frames)
    }

    #[test]
    fn test_frame_advances_and_wraps() {
        let mut b = body(2);
        b.animate(0.05);
        assert_eq!(b.frame, 0);
        b.animate(0.05);
        assert_eq!(b.frame, 1);
        assert_eq!(b.timer, 0.0);
        b.animate(0.1);
        assert_eq!(b.frame, 0);
    }

    #[test]
    fn test_single_frame_sequence_stays_put() {
        let mut b = body(1);
        b.animate(1.0);
        assert_eq!(b.frame, 0);
    }

    #[test]
    fn test_set_animation_resets_only_on_change() {
        let mut b = body(2);
        b.animate(0.1);
        assert_eq!(b.frame, 1);

        b.set_animation(AnimState::Idle, Facing::Right);
        assert_eq!(b.frame, 1);

        b.set_animation(AnimState::Idle, Facing::Left);
        assert_eq!(b.frame, 0);

        b.animate(0.1);
        b.set_animation(AnimState::Walk, Facing::Left);
        assert_eq!(b.frame, 0);
        assert_eq!(b.anim, AnimState::Walk);
    }

    #[test]
    fn test_facing_helpers() {
        assert_eq!(Facing::Left.sign(), -1.0);
        assert_eq!(Facing::Right.flipped(), Facing::Left);
    }
}
