//! Input routing and the per-tick simulation sequence
//!
//! A tick first applies queued input events in order, then (while playing)
//! advances: player, coin pickup, projectiles, enemies, end conditions.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::projectile;
use super::state::{GameEvent, GamePhase, GameState, SoundCue};
use crate::consts::*;
use crate::ui::MenuButton;

/// Semantic keys; everything unmapped arrives as `Other`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Jump,
    /// Run modifier (held)
    Run,
    Attack,
    Other,
}

/// Abstract input from the platform layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// Pointer click in screen coordinates
    Click(Vec2),
}

/// Input for a single tick, applied in order before simulating
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub events: Vec<InputEvent>,
}

impl TickInput {
    pub fn new(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }
}

/// Advance the game by one tick of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    for event in &input.events {
        handle_event(state, *event);
    }

    if state.phase == GamePhase::Playing {
        step_playing(state, dt);
    }
}

/// Route one input event according to the current phase
pub fn handle_event(state: &mut GameState, event: InputEvent) {
    // Direction keys are tracked in every phase so a key held across a
    // phase change still counts.
    match event {
        InputEvent::KeyDown(Key::Left) => state.controls.left = true,
        InputEvent::KeyUp(Key::Left) => state.controls.left = false,
        InputEvent::KeyDown(Key::Right) => state.controls.right = true,
        InputEvent::KeyUp(Key::Right) => state.controls.right = false,
        _ => {}
    }

    match state.phase {
        GamePhase::Menu => {
            if let InputEvent::Click(pos) = event {
                click_menu(state, pos);
            }
        }
        GamePhase::Playing => match event {
            InputEvent::KeyDown(Key::Jump) => {
                if state.player.jump() {
                    state.cue(SoundCue::Jump);
                }
            }
            InputEvent::KeyDown(Key::Run) => state.player.is_running = true,
            InputEvent::KeyUp(Key::Run) => state.player.is_running = false,
            InputEvent::KeyDown(Key::Attack) => {
                if let Some(shot) = state.player.try_attack() {
                    log::debug!("Projectile spawned at {:?} facing {:?}", shot.rect.center(), shot.direction());
                    state.projectiles.push(shot);
                    state.cue(SoundCue::Shoot);
                }
            }
            _ => {}
        },
        GamePhase::GameOver | GamePhase::Victory => {
            if let InputEvent::KeyDown(_) = event {
                state.set_phase(GamePhase::Menu);
            }
        }
    }
}

fn click_menu(state: &mut GameState, pos: Vec2) {
    match MenuButton::at(pos) {
        Some(MenuButton::Start) => {
            state.setup_level();
            state.set_phase(GamePhase::Playing);
        }
        Some(MenuButton::ToggleAudio) => state.toggle_audio(),
        Some(MenuButton::Exit) => {
            log::info!("Exit requested from menu");
            state.exit_requested = true;
            state.emit(GameEvent::ExitRequested);
        }
        None => {}
    }
}

fn step_playing(state: &mut GameState, dt: f32) {
    state.time_ticks += 1;

    // 1. Player
    state.player.update(dt, &state.controls, &state.platforms);

    // 2. Coin pickup
    if !state.coin_collected {
        state.coin.body.animate(dt);
        if state.player.rect().intersects(state.coin.rect()) {
            state.coin_collected = true;
            state.score += COIN_SCORE;
            log::info!("Coin collected (score {})", state.score);
            state.cue(SoundCue::CoinCollect);
            state.emit(GameEvent::CoinCollected);
        }
    }

    // 3. Projectiles vs enemies, then purge the defeated
    let sweep = projectile::sweep(&mut state.projectiles, &mut state.enemies);
    for _ in &sweep.defeated {
        state.score += ENEMY_SCORE;
        state.enemies_defeated += 1;
        log::info!("Enemy defeated ({} total, score {})", state.enemies_defeated, state.score);
        state.emit(GameEvent::EnemyDefeated {
            total: state.enemies_defeated,
        });
    }
    state.enemies.retain(|e| !e.is_defeated());

    // 4. Enemies
    let mut player_hits = 0;
    for enemy in &mut state.enemies {
        if enemy.update(dt, &mut state.player, &state.platforms, &mut state.rng) {
            player_hits += 1;
        }
    }
    for _ in 0..player_hits {
        log::info!("Player hit (health {})", state.player.health);
        state.cue(SoundCue::PlayerHit);
        state.emit(GameEvent::PlayerDamaged {
            health: state.player.health,
        });
    }

    // 5. End conditions
    if state.enemies_defeated >= ENEMIES_TO_WIN && state.coin_collected {
        state.set_phase(GamePhase::Victory);
    } else if state.player.is_dead() || state.player.rect().y > HEIGHT + FALL_OUT_MARGIN {
        state.set_phase(GamePhase::GameOver);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{AnimState, Controls};
    use crate::sim::state::MusicCue;
    use crate::sim::{Facing, Projectile};

    const DT: f32 = SIM_DT;

    fn start_click() -> InputEvent {
        InputEvent::Click(MenuButton::Start.rect().center())
    }

    fn playing(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        handle_event(&mut state, start_click());
        assert_eq!(state.phase, GamePhase::Playing);
        state.drain_events();
        state
    }

    fn idle(state: &mut GameState, ticks: usize) {
        for _ in 0..ticks {
            tick(state, &TickInput::default(), DT);
        }
    }

    /// Keep the enemies far away and harmless
    fn park_enemies(state: &mut GameState) {
        for enemy in &mut state.enemies {
            enemy.body.rect.x += 10_000.0;
            enemy.body.rect.y = -10_000.0;
        }
    }

    /// Fire a projectile already overlapping the given enemy
    fn shoot_at(state: &mut GameState, enemy: usize) {
        let center = state.enemies[enemy].rect().center();
        state.projectiles.push(Projectile::spawn(center, Facing::Right));
    }

    #[test]
    fn test_level_setup() {
        let state = playing(1);
        assert_eq!(state.player.rect().top_left(), Vec2::new(100.0, 400.0));
        assert_eq!(state.enemies.len(), 2);
        assert!(state.projectiles.is_empty());
        assert!(!state.coin_collected);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_player_settles_then_moves_unobstructed() {
        let mut state = playing(1);
        idle(&mut state, 30);
        assert!(state.player.on_ground);
        assert_eq!(state.player.rect().bottom(), 500.0);
        assert_eq!(state.player.rect().x, 100.0);

        // 50 walking ticks along the ground meet nothing
        let controls = Controls { left: false, right: true };
        for _ in 0..50 {
            state.player.update(DT, &controls, &state.platforms);
            assert!(state.player.on_ground);
        }
        assert_eq!(state.player.rect().x, 100.0 + 50.0 * PLAYER_WALK_SPEED);
        assert_eq!(state.player.rect().bottom(), 500.0);
        assert_eq!(state.player.body.anim, AnimState::Walk);

        // Back at spawn, the same move through real input: 8 running ticks
        state.player.body.rect.x = 100.0;
        let mut held = TickInput::new([InputEvent::KeyDown(Key::Right), InputEvent::KeyDown(Key::Run)]);
        for _ in 0..8 {
            tick(&mut state, &held, DT);
            held.events.clear();
        }
        assert_eq!(state.player.rect().x, 148.0);
        assert!(state.player.on_ground);
    }

    #[test]
    fn test_coin_collected_once() {
        let mut state = playing(1);
        park_enemies(&mut state);
        state.player.body.rect.x = state.coin.rect().x;
        state.player.body.rect.y = state.coin.rect().y;

        tick(&mut state, &TickInput::default(), DT);
        assert!(state.coin_collected);
        assert_eq!(state.score, 3);

        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.score, 3);
        let coin_events = state
            .drain_events()
            .into_iter()
            .filter(|e| *e == GameEvent::CoinCollected)
            .count();
        assert_eq!(coin_events, 1);
    }

    #[test]
    fn test_enemy_needs_three_hits() {
        let mut state = playing(1);
        for hit in 0..3 {
            assert_eq!(state.enemies.len(), 2, "enemy removed early at hit {hit}");
            shoot_at(&mut state, 0);
            tick(&mut state, &TickInput::default(), DT);
        }
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.score, 1);
        assert_eq!(state.enemies_defeated, 1);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_double_hit_same_tick_counts_once() {
        let mut state = playing(1);
        state.enemies[0].health = 1;
        shoot_at(&mut state, 0);
        shoot_at(&mut state, 0);
        tick(&mut state, &TickInput::default(), DT);

        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.score, 1);
        assert_eq!(state.enemies_defeated, 1);
    }

    #[test]
    fn test_victory_when_last_enemy_falls_with_coin() {
        let mut state = playing(1);
        state.coin_collected = true;
        state.enemies_defeated = 1;
        state.enemies[0].health = 1;
        shoot_at(&mut state, 0);

        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.enemies_defeated, 2);
        assert_eq!(state.phase, GamePhase::Victory);
        assert!(state.events().contains(&GameEvent::Music(MusicCue::Stop)));
    }

    #[test]
    fn test_defeats_without_coin_keep_playing() {
        let mut state = playing(1);
        state.enemies_defeated = 1;
        state.enemies[0].health = 1;
        shoot_at(&mut state, 0);

        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.enemies_defeated, 2);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_game_over_on_death() {
        let mut state = playing(1);
        state.player.health = 1;
        // stand inside the first enemy on its ledge
        let enemy = *state.enemies[0].rect();
        state.player.body.rect.x = enemy.x;
        state.player.body.rect.y = enemy.y;

        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.player.health, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Sound(SoundCue::PlayerHit)));
        assert!(events.contains(&GameEvent::PlayerDamaged { health: 0 }));
    }

    #[test]
    fn test_game_over_on_fall() {
        let mut state = playing(1);
        park_enemies(&mut state);
        state.player.body.rect.y = HEIGHT + 100.0;

        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_any_key_returns_to_menu() {
        let mut state = playing(1);
        state.set_phase(GamePhase::GameOver);
        state.drain_events();

        tick(&mut state, &TickInput::new([InputEvent::KeyUp(Key::Other)]), DT);
        assert_eq!(state.phase, GamePhase::GameOver);

        tick(&mut state, &TickInput::new([InputEvent::KeyDown(Key::Other)]), DT);
        assert_eq!(state.phase, GamePhase::Menu);
        assert!(state.events().contains(&GameEvent::Music(MusicCue::Play)));
    }

    #[test]
    fn test_menu_buttons() {
        let mut state = GameState::new(5);

        // keys do nothing in the menu
        handle_event(&mut state, InputEvent::KeyDown(Key::Attack));
        assert_eq!(state.phase, GamePhase::Menu);

        handle_event(&mut state, InputEvent::Click(MenuButton::ToggleAudio.rect().center()));
        assert!(!state.audio_enabled);
        handle_event(&mut state, InputEvent::Click(MenuButton::Exit.rect().center()));
        assert!(state.exit_requested);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Music(MusicCue::Stop), GameEvent::ExitRequested]
        );

        // audio stays off across a level start: no music, no cues
        handle_event(&mut state, start_click());
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(!state.audio_enabled);
        assert!(!state.drain_events().contains(&GameEvent::Music(MusicCue::Play)));
    }

    #[test]
    fn test_clicks_ignored_while_playing() {
        let mut state = playing(1);
        handle_event(&mut state, InputEvent::Click(MenuButton::Exit.rect().center()));
        assert!(!state.exit_requested);
    }

    #[test]
    fn test_jump_and_attack_cues() {
        let mut state = playing(1);
        park_enemies(&mut state);
        idle(&mut state, 30);
        state.drain_events();

        tick(
            &mut state,
            &TickInput::new([InputEvent::KeyDown(Key::Attack), InputEvent::KeyDown(Key::Attack)]),
            DT,
        );
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.drain_events(), vec![GameEvent::Sound(SoundCue::Shoot)]);

        // attacking blocks the jump
        tick(&mut state, &TickInput::new([InputEvent::KeyDown(Key::Jump)]), DT);
        assert!(state.events().is_empty());

        idle(&mut state, 30);
        tick(&mut state, &TickInput::new([InputEvent::KeyDown(Key::Jump)]), DT);
        assert_eq!(state.drain_events(), vec![GameEvent::Sound(SoundCue::Jump)]);
        assert!(!state.player.on_ground);
    }

    #[test]
    fn test_run_modifier_released() {
        let mut state = playing(1);
        park_enemies(&mut state);
        idle(&mut state, 30);

        tick(&mut state, &TickInput::new([InputEvent::KeyDown(Key::Run), InputEvent::KeyDown(Key::Right)]), DT);
        assert_eq!(state.player.vel.x, PLAYER_RUN_SPEED);
        tick(&mut state, &TickInput::new([InputEvent::KeyUp(Key::Run)]), DT);
        assert_eq!(state.player.vel.x, PLAYER_WALK_SPEED);
        tick(&mut state, &TickInput::new([InputEvent::KeyUp(Key::Right)]), DT);
        assert_eq!(state.player.vel.x, 0.0);
    }

    #[test]
    fn test_determinism() {
        let script: Vec<TickInput> = (0..600)
            .map(|i| match i % 90 {
                0 => TickInput::new([InputEvent::KeyDown(Key::Right)]),
                20 => TickInput::new([InputEvent::KeyDown(Key::Jump)]),
                40 => TickInput::new([InputEvent::KeyDown(Key::Attack)]),
                60 => TickInput::new([InputEvent::KeyUp(Key::Right), InputEvent::KeyDown(Key::Left)]),
                80 => TickInput::new([InputEvent::KeyUp(Key::Left)]),
                _ => TickInput::default(),
            })
            .collect();

        let mut a = playing(99);
        let mut b = playing(99);
        for input in &script {
            tick(&mut a, input, DT);
            tick(&mut b, input, DT);
        }

        assert_eq!(a.phase, b.phase);
        assert_eq!(a.score, b.score);
        assert_eq!(a.player.rect(), b.player.rect());
        assert_eq!(a.enemies.len(), b.enemies.len());
        for (ea, eb) in a.enemies.iter().zip(&b.enemies) {
            assert_eq!(ea.rect(), eb.rect());
            assert_eq!(ea.state, eb.state);
            assert_eq!(ea.patrol_timer, eb.patrol_timer);
        }
    }
}
