//! Keyboard Input Module
//!
//! Generic key codes and a pressed-key tracker, decoupled from any
//! windowing system.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Key codes, independent of windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    // Movement keys
    W,
    A,
    S,
    D,
    Space,
    ShiftLeft,
    ControlLeft,

    // Arrow keys (keyboard look)
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Action keys
    E,
    F,
    Q,
    R,
    Enter,
    Escape,

    /// Catch-all for unhandled keys
    Unknown,
}

/// Which keys are currently held.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    pressed: HashSet<KeyCode>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press or release.
    ///
    /// Returns `true` when the key changed state (repeats return `false`).
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        if pressed {
            self.pressed.insert(key)
        } else {
            self.pressed.remove(&key)
        }
    }

    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }

    pub fn any_pressed(&self) -> bool {
        !self.pressed.is_empty()
    }

    /// Release every key (e.g. on focus loss).
    pub fn reset(&mut self) {
        self.pressed.clear();
    }
}
