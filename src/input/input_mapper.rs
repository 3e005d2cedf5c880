//! Input mapping from raw events to semantic actions
//!
//! Keys that change the scene become [`InputAction::Scene`] commands; window
//! level keys (fullscreen, exit) are handled by the app itself. Mouse input
//! is NOT mapped here - it goes directly to the ArcballController.

use winit::event::ElementState;
use winit::keyboard::KeyCode;
use fileorbit_core::{DisplayFlags, SceneCommand, Vec3, ViewFilter, TRANSLATION_STEP};

/// Actions triggered by key presses
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputAction {
    /// Exit application (Q or Escape)
    Exit,
    /// Toggle fullscreen mode (F11)
    ToggleFullscreen,
    /// Forward a command to the scene
    Scene(SceneCommand),
}

/// Maps raw input events to semantic actions
pub struct InputMapper;

impl InputMapper {
    /// Map keyboard input to an action
    ///
    /// Returns `None` for releases and unbound keys.
    pub fn map_keyboard(key: KeyCode, state: ElementState) -> Option<InputAction> {
        // Only handle key presses, not releases
        if state != ElementState::Pressed {
            return None;
        }

        let command = match key {
            KeyCode::Escape | KeyCode::KeyQ => return Some(InputAction::Exit),
            KeyCode::F11 => return Some(InputAction::ToggleFullscreen),

            KeyCode::KeyO => SceneCommand::ToggleOrbit,
            KeyCode::Comma => SceneCommand::ShrinkRadius,
            KeyCode::Period => SceneCommand::GrowRadius,
            KeyCode::BracketLeft => SceneCommand::SlowDown,
            KeyCode::BracketRight => SceneCommand::SpeedUp,
            KeyCode::Equal => SceneCommand::GrowMarkers,
            KeyCode::Minus => SceneCommand::ShrinkMarkers,
            KeyCode::KeyN => SceneCommand::RerandomizeAxes,
            KeyCode::KeyR => SceneCommand::ToggleAxisPolicy,

            KeyCode::KeyA => SceneCommand::SetViewFilter(ViewFilter::All),
            KeyCode::KeyF => SceneCommand::SetViewFilter(ViewFilter::Files),
            KeyCode::KeyD => SceneCommand::SetViewFilter(ViewFilter::Directories),
            KeyCode::KeyG => SceneCommand::DescendSelected,
            KeyCode::KeyJ => SceneCommand::SelectNext,
            KeyCode::KeyK => SceneCommand::SelectPrevious,

            KeyCode::KeyT => SceneCommand::ToggleDisplay(DisplayFlags::LABELS),
            KeyCode::KeyS => SceneCommand::ToggleDisplay(DisplayFlags::SPHERE),
            KeyCode::KeyC => SceneCommand::ToggleDisplay(DisplayFlags::CUBE),

            // Camera moves opposite to the scene: left slides the scene right
            KeyCode::ArrowUp => Self::translate(0.0, 0.0, TRANSLATION_STEP),
            KeyCode::ArrowDown => Self::translate(0.0, 0.0, -TRANSLATION_STEP),
            KeyCode::ArrowLeft => Self::translate(TRANSLATION_STEP, 0.0, 0.0),
            KeyCode::ArrowRight => Self::translate(-TRANSLATION_STEP, 0.0, 0.0),
            KeyCode::PageUp => Self::translate(0.0, -TRANSLATION_STEP, 0.0),
            KeyCode::PageDown => Self::translate(0.0, TRANSLATION_STEP, 0.0),

            _ => return None,
        };

        Some(InputAction::Scene(command))
    }

    fn translate(x: f32, y: f32, z: f32) -> SceneCommand {
        SceneCommand::TranslateCamera(Vec3::new(x, y, z))
    }
}
