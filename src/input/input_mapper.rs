//! Input mapping from raw events to semantic actions
//!
//! Keys map to window-level actions; a click maps to adding a tetrahedron,
//! but only while the pointer hovers one.

use tetrasphere_input::Click;
use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Actions triggered by user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Exit application (Escape)
    Exit,
    /// Toggle fullscreen mode (F key)
    ToggleFullscreen,
    /// Show or hide the frame statistics (S key)
    ToggleStats,
    /// Add one more tetrahedron (click on a hovered tetrahedron)
    AddTetrahedron,
}

/// Maps raw input events to semantic actions
pub struct InputMapper;

impl InputMapper {
    /// Map keyboard input to an action
    pub fn map_keyboard(key: KeyCode, state: ElementState) -> Option<InputAction> {
        // Only handle key presses, not releases
        if state != ElementState::Pressed {
            return None;
        }

        match key {
            KeyCode::Escape => Some(InputAction::Exit),
            KeyCode::KeyF => Some(InputAction::ToggleFullscreen),
            KeyCode::KeyS => Some(InputAction::ToggleStats),
            _ => None,
        }
    }

    /// Map a completed click to an action
    ///
    /// Clicks on empty space do nothing.
    pub fn map_click(click: Option<Click>, hovering: bool) -> Option<InputAction> {
        match click {
            Some(_) if hovering => Some(InputAction::AddTetrahedron),
            _ => None,
        }
    }
}
