//! Menu layout and pointer hit-testing
//!
//! Only the button geometry lives here; drawing the menu is left to the
//! renderer.

use glam::Vec2;

use crate::consts::{HEIGHT, WIDTH};
use crate::sim::Rect;

const BUTTON_WIDTH: f32 = 200.0;
const BUTTON_HEIGHT: f32 = 60.0;

/// Buttons on the title menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuButton {
    Start,
    ToggleAudio,
    Exit,
}

impl MenuButton {
    pub const ALL: [MenuButton; 3] = [MenuButton::Start, MenuButton::ToggleAudio, MenuButton::Exit];

    /// Screen rectangle of the button, stacked under the screen centre
    pub fn rect(self) -> Rect {
        let y_offset = match self {
            MenuButton::Start => -30.0,
            MenuButton::ToggleAudio => 50.0,
            MenuButton::Exit => 130.0,
        };
        Rect::new(
            WIDTH / 2.0 - BUTTON_WIDTH / 2.0,
            HEIGHT / 2.0 + y_offset,
            BUTTON_WIDTH,
            BUTTON_HEIGHT,
        )
    }

    /// Button under a pointer position, if any
    pub fn at(pos: Vec2) -> Option<MenuButton> {
        Self::ALL.into_iter().find(|b| b.rect().contains_point(pos))
    }

    /// Label, reflecting the current audio toggle
    pub fn label(self, audio_enabled: bool) -> &'static str {
        match self {
            MenuButton::Start => "Start Game",
            MenuButton::ToggleAudio if audio_enabled => "Music/Sound: ON",
            MenuButton::ToggleAudio => "Music/Sound: OFF",
            MenuButton::Exit => "Exit",
        }
    }
}
