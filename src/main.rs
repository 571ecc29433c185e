//! Samurai Platformer headless driver
//!
//! Runs the simulation without a window: clicks Start, plays a short
//! scripted input sequence at the fixed step, routes audio cues to a
//! logging backend, and prints the final render snapshot as JSON.

use std::time::{SystemTime, UNIX_EPOCH};

use samurai_platformer::audio::{AudioManager, LogBackend};
use samurai_platformer::consts::SIM_DT;
use samurai_platformer::settings::{SETTINGS_FILE, Settings};
use samurai_platformer::sim::{GamePhase, GameState, InputEvent, Key, TickInput, tick};
use samurai_platformer::ui::MenuButton;
use samurai_platformer::RenderSnapshot;

/// Ten seconds of play
const SCRIPT_TICKS: u32 = 600;

/// Scripted input for a given tick: walk right, hop, and fire periodically
fn scripted_input(t: u32) -> TickInput {
    match t {
        0 => TickInput::new([InputEvent::KeyDown(Key::Right)]),
        _ if t % 45 == 0 => TickInput::new([InputEvent::KeyDown(Key::Attack)]),
        _ if t % 120 == 60 => TickInput::new([InputEvent::KeyDown(Key::Jump)]),
        301 => TickInput::new([InputEvent::KeyDown(Key::Run)]),
        _ => TickInput::default(),
    }
}

fn main() {
    env_logger::init();
    log::info!("Samurai Platformer (headless) starting...");

    let settings_path = std::env::args().nth(1).unwrap_or_else(|| SETTINGS_FILE.to_string());
    let settings = Settings::load_or_default(&settings_path);

    let seed = settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });
    log::info!("Seed: {}", seed);

    let mut state = GameState::new(seed);
    state.audio_enabled = settings.audio_enabled;
    let mut audio = AudioManager::new(LogBackend, &settings);

    let start = TickInput::new([InputEvent::Click(MenuButton::Start.rect().center())]);
    tick(&mut state, &start, SIM_DT);
    audio.dispatch(&state.drain_events());

    for t in 0..SCRIPT_TICKS {
        tick(&mut state, &scripted_input(t), SIM_DT);
        audio.dispatch(&state.drain_events());
        if state.phase != GamePhase::Playing || state.exit_requested {
            break;
        }
    }

    log::info!(
        "Finished in {:?}: score {}, enemies defeated {}, health {}",
        state.phase,
        state.score,
        state.enemies_defeated,
        state.player.health
    );

    match serde_json::to_string_pretty(&RenderSnapshot::build(&state)) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}
