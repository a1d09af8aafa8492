//! Input state for UI interaction

use super::Rect;
use macroquad::input::{is_key_down, is_mouse_button_pressed, mouse_position, mouse_wheel, KeyCode, MouseButton};

/// Mouse state for one frame
#[derive(Debug, Clone, Copy, Default)]
pub struct MouseState {
    pub x: f32,
    pub y: f32,
    pub left_pressed: bool, // Just pressed this frame
    /// Wheel delta, scroll-down positive
    pub wheel: f32,
    /// Shift held (wheel scales instead of rotating)
    pub shift: bool,
}

impl MouseState {
    /// Read the current frame's mouse from macroquad
    pub fn capture() -> Self {
        let (x, y) = mouse_position();
        Self {
            x,
            y,
            left_pressed: is_mouse_button_pressed(MouseButton::Left),
            // macroquad reports scroll-up as positive
            wheel: -mouse_wheel().1,
            shift: is_key_down(KeyCode::LeftShift) || is_key_down(KeyCode::RightShift),
        }
    }

    pub fn inside(&self, rect: &Rect) -> bool {
        rect.contains(self.x, self.y)
    }

    pub fn clicked(&self, rect: &Rect) -> bool {
        self.left_pressed && rect.contains(self.x, self.y)
    }
}

/// UI context passed through the frame
pub struct UiContext {
    pub mouse: MouseState,
    /// Hover text requested by a widget this frame, with the pointer position
    tooltip: Option<(String, f32, f32)>,
}

impl UiContext {
    pub fn new() -> Self {
        Self {
            mouse: MouseState::default(),
            tooltip: None,
        }
    }

    /// Reset at start of frame (call before UI code)
    pub fn begin_frame(&mut self, mouse: MouseState) {
        self.mouse = mouse;
        self.tooltip = None;
    }

    pub fn set_tooltip(&mut self, text: &str, x: f32, y: f32) {
        self.tooltip = Some((text.to_string(), x, y));
    }

    pub fn tooltip(&self) -> Option<&(String, f32, f32)> {
        self.tooltip.as_ref()
    }
}

impl Default for UiContext {
    fn default() -> Self {
        Self::new()
    }
}
