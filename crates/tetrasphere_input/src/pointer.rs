//! Pointer tracking for hover and click picking
//!
//! Keeps the last cursor position (physical pixels) and turns a left-button
//! press followed by a release at roughly the same spot into a click.

use winit::event::{ElementState, MouseButton};

/// Maximum cursor travel (pixels) between press and release for a click
pub const CLICK_SLOP: f64 = 6.0;

/// A completed left click
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Click {
    pub x: f64,
    pub y: f64,
}

/// Tracks the cursor over the window
#[derive(Clone, Debug, Default)]
pub struct PointerTracker {
    position: Option<(f64, f64)>,
    pressed_at: Option<(f64, f64)>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a cursor move (physical pixels, origin top-left)
    pub fn process_cursor_moved(&mut self, x: f64, y: f64) {
        self.position = Some((x, y));
    }

    /// Process the cursor leaving the window; a pending press is abandoned
    pub fn process_cursor_left(&mut self) {
        self.position = None;
        self.pressed_at = None;
    }

    /// Process mouse button input, returning a click on a matching release
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) -> Option<Click> {
        if button != MouseButton::Left {
            return None;
        }
        let position = self.position?;

        match state {
            ElementState::Pressed => {
                self.pressed_at = Some(position);
                None
            }
            ElementState::Released => {
                let (px, py) = self.pressed_at.take()?;
                let travel = ((position.0 - px).powi(2) + (position.1 - py).powi(2)).sqrt();
                (travel <= CLICK_SLOP).then_some(Click {
                    x: position.0,
                    y: position.1,
                })
            }
        }
    }

    /// Whether the cursor is over the window
    pub fn is_inside(&self) -> bool {
        self.position.is_some()
    }

    /// Last cursor position in physical pixels
    pub fn position(&self) -> Option<(f64, f64)> {
        self.position
    }

    /// Cursor position in normalized device coordinates for a surface of `width` x `height`
    pub fn ndc(&self, width: u32, height: u32) -> Option<(f32, f32)> {
        let (x, y) = self.position?;
        to_ndc(x, y, width, height)
    }
}

/// Convert a pixel position to NDC (`[-1, 1]`, +y up)
///
/// Returns `None` for an empty surface.
pub fn to_ndc(x: f64, y: f64, width: u32, height: u32) -> Option<(f32, f32)> {
    if width == 0 || height == 0 {
        return None;
    }
    let nx = (x / width as f64) * 2.0 - 1.0;
    let ny = 1.0 - (y / height as f64) * 2.0;
    Some((nx as f32, ny as f32))
}
