//! Mouse Input Module
//!
//! Mouse buttons, motion axes and a held-button tracker, decoupled from any
//! windowing system.

use serde::{Deserialize, Serialize};

/// Mouse button identifiers, independent of windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    /// Additional mouse buttons (button 4, 5, etc.)
    Other(u16),
}

/// Raw mouse motion axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseAxis {
    /// Horizontal motion, positive to the right
    X,
    /// Vertical motion, positive downward (screen space)
    Y,
}

/// State of the three main mouse buttons.
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonState {
    pub left: bool,
    pub middle: bool,
    pub right: bool,
}

impl ButtonState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update button state. Returns `true` when the button changed state.
    pub fn set(&mut self, button: MouseButton, pressed: bool) -> bool {
        let slot = match button {
            MouseButton::Left => &mut self.left,
            MouseButton::Middle => &mut self.middle,
            MouseButton::Right => &mut self.right,
            MouseButton::Other(_) => return false,
        };
        let changed = *slot != pressed;
        *slot = pressed;
        changed
    }

    pub fn is_pressed(&self, button: MouseButton) -> bool {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Middle => self.middle,
            MouseButton::Right => self.right,
            MouseButton::Other(_) => false,
        }
    }

    pub fn any_pressed(&self) -> bool {
        self.left || self.middle || self.right
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_set_reports_change() {
        let mut buttons = ButtonState::new();
        assert!(buttons.set(MouseButton::Left, true));
        assert!(!buttons.set(MouseButton::Left, true));
        assert!(buttons.is_pressed(MouseButton::Left));
        assert!(buttons.set(MouseButton::Left, false));
        assert!(!buttons.any_pressed());
    }

    #[test]
    fn test_extra_buttons_ignored() {
        let mut buttons = ButtonState::new();
        assert!(!buttons.set(MouseButton::Other(4), true));
        assert!(!buttons.is_pressed(MouseButton::Other(4)));
    }
}
