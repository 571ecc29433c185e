//! Render snapshot
//!
//! Copies what an external renderer needs out of `GameState`: one sprite
//! per visible entity in draw order, plus HUD values. The renderer maps
//! `(kind, anim, facing, frame)` to actual images.

use serde::{Deserialize, Serialize};

use crate::sim::{AnimState, Facing, GamePhase, GameState, Rect};
use crate::ui::MenuButton;

/// Entity variant a sprite was taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpriteKind {
    Platform,
    Enemy,
    Projectile,
    Coin,
    Player,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub rect: Rect,
    pub facing: Facing,
    /// `None` for static or unanimated entities
    pub anim: Option<AnimState>,
    pub frame: usize,
    /// Cleared on the "off" phase of the invincibility blink
    pub visible: bool,
}

impl Sprite {
    fn fixed(kind: SpriteKind, rect: Rect, facing: Facing) -> Self {
        Self {
            kind,
            rect,
            facing,
            anim: None,
            frame: 0,
            visible: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub score: u32,
    pub health: i32,
    pub max_health: i32,
    pub enemies_defeated: u32,
    pub coin_collected: bool,
    pub player_invincible: bool,
    /// Ticks played in the current level
    pub level_ticks: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub rect: Rect,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub phase: GamePhase,
    /// Back to front
    pub sprites: Vec<Sprite>,
    pub hud: Hud,
    /// Populated only in the menu
    pub menu: Vec<MenuEntry>,
}

impl RenderSnapshot {
    pub fn build(state: &GameState) -> Self {
        let sprites = if state.phase == GamePhase::Playing {
            level_sprites(state)
        } else {
            Vec::new()
        };

        let menu = if state.phase == GamePhase::Menu {
            MenuButton::ALL
                .iter()
                .map(|b| MenuEntry {
                    rect: b.rect(),
                    label: b.label(state.audio_enabled).to_string(),
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            phase: state.phase,
            sprites,
            hud: Hud {
                score: state.score,
                health: state.player.health,
                max_health: state.player.max_health,
                enemies_defeated: state.enemies_defeated,
                coin_collected: state.coin_collected,
                player_invincible: state.player.is_invincible(),
                level_ticks: state.time_ticks,
            },
            menu,
        }
    }
}

fn level_sprites(state: &GameState) -> Vec<Sprite> {
    let mut sprites = Vec::with_capacity(state.platforms.len() + state.enemies.len() + state.projectiles.len() + 2);

    for p in &state.platforms {
        sprites.push(Sprite::fixed(SpriteKind::Platform, p.rect, Facing::Right));
    }

    for e in &state.enemies {
        sprites.push(Sprite {
            kind: SpriteKind::Enemy,
            rect: e.body.rect,
            facing: e.body.anim_facing,
            anim: Some(e.body.anim),
            frame: e.body.frame,
            visible: true,
        });
    }

    for shot in &state.projectiles {
        sprites.push(Sprite::fixed(SpriteKind::Projectile, shot.rect, shot.direction()));
    }

    if !state.coin_collected {
        let coin = &state.coin.body;
        sprites.push(Sprite {
            kind: SpriteKind::Coin,
            rect: coin.rect,
            facing: coin.anim_facing,
            anim: Some(coin.anim),
            frame: coin.frame,
            visible: true,
        });
    }

    let player = &state.player;
    sprites.push(Sprite {
        kind: SpriteKind::Player,
        rect: player.body.rect,
        facing: player.body.anim_facing,
        anim: Some(player.body.anim),
        frame: player.body.frame,
        visible: player.blink_visible(),
    });

    sprites
}
