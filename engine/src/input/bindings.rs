//! Input Bindings Module
//!
//! Maps physical inputs (keys, mouse buttons, mouse axes) to logical actions
//! with a per-binding scale. Two keys on one axis action (W = +1, S = -1)
//! sum into a single value. The map is serde-friendly so players can remap
//! controls from a JSON file.

use serde::{Deserialize, Serialize};

use super::{KeyCode, MouseAxis, MouseButton};

/// Logical input actions the character responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    /// Forward/back axis (default: W / S)
    MoveForward,
    /// Strafe axis (default: D / A)
    MoveRight,
    /// Keyboard/stick turn, scaled by turn rate and dt (default: arrows)
    TurnAtRate,
    /// Keyboard/stick look up, scaled by look rate and dt (default: arrows)
    LookUpAtRate,
    /// Mouse turn (default: mouse X)
    Turn,
    /// Mouse look up (default: mouse Y, inverted)
    LookUp,
    /// Jump (default: Space)
    Jump,
    /// Fire weapon (default: left mouse)
    Fire,
    /// Aim down sights, held (default: right mouse)
    Aim,
}

impl InputAction {
    /// Axis actions carry a continuous value every frame; the rest are buttons.
    pub fn is_axis(self) -> bool {
        matches!(
            self,
            InputAction::MoveForward
                | InputAction::MoveRight
                | InputAction::TurnAtRate
                | InputAction::LookUpAtRate
                | InputAction::Turn
                | InputAction::LookUp
        )
    }
}

/// A physical input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputSource {
    Key(KeyCode),
    MouseButton(MouseButton),
    MouseAxis(MouseAxis),
}

/// One source → action mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Binding {
    pub source: InputSource,
    pub action: InputAction,
    /// Multiplier applied to the source value (1 for a held key)
    pub scale: f32,
}

impl Binding {
    pub fn new(source: InputSource, action: InputAction, scale: f32) -> Self {
        Self { source, action, scale }
    }
}

/// All bindings for a player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputMap {
    bindings: Vec<Binding>,
}

impl Default for InputMap {
    /// Default bindings:
    /// - W/S = MoveForward ±1, D/A = MoveRight ±1
    /// - Right/Left arrow = TurnAtRate ±1, Up/Down arrow = LookUpAtRate ±1
    /// - Mouse X = Turn 0.1, Mouse Y = LookUp -0.1 (degrees per pixel)
    /// - Space = Jump, Left mouse = Fire, Right mouse = Aim
    fn default() -> Self {
        use InputAction::*;
        use InputSource::{Key, MouseAxis as Axis, MouseButton as Button};

        let mut map = Self::empty();
        map.bind(Key(KeyCode::W), MoveForward, 1.0);
        map.bind(Key(KeyCode::S), MoveForward, -1.0);
        map.bind(Key(KeyCode::D), MoveRight, 1.0);
        map.bind(Key(KeyCode::A), MoveRight, -1.0);
        map.bind(Key(KeyCode::ArrowRight), TurnAtRate, 1.0);
        map.bind(Key(KeyCode::ArrowLeft), TurnAtRate, -1.0);
        map.bind(Key(KeyCode::ArrowUp), LookUpAtRate, 1.0);
        map.bind(Key(KeyCode::ArrowDown), LookUpAtRate, -1.0);
        map.bind(Axis(MouseAxis::X), Turn, 0.1);
        map.bind(Axis(MouseAxis::Y), LookUp, -0.1);
        map.bind(Key(KeyCode::Space), Jump, 1.0);
        map.bind(Button(MouseButton::Left), Fire, 1.0);
        map.bind(Button(MouseButton::Right), Aim, 1.0);
        map
    }
}

impl InputMap {
    /// A map with no bindings.
    pub fn empty() -> Self {
        Self { bindings: Vec::new() }
    }

    /// Bind a source to an action. A source drives at most one action, so
    /// any previous binding of the same source is replaced.
    pub fn bind(&mut self, source: InputSource, action: InputAction, scale: f32) {
        self.unbind_source(source);
        self.bindings.push(Binding::new(source, action, scale));
    }

    /// Remove the binding for a source. Returns `true` if one existed.
    pub fn unbind_source(&mut self, source: InputSource) -> bool {
        let before = self.bindings.len();
        self.bindings.retain(|b| b.source != source);
        self.bindings.len() != before
    }

    /// Remove every binding for an action.
    pub fn unbind_action(&mut self, action: InputAction) {
        self.bindings.retain(|b| b.action != action);
    }

    /// Binding for a physical source, if any.
    pub fn get(&self, source: InputSource) -> Option<&Binding> {
        self.bindings.iter().find(|b| b.source == source)
    }

    /// Every source bound to an action.
    pub fn sources_for(&self, action: InputAction) -> impl Iterator<Item = &Binding> + '_ {
        self.bindings.iter().filter(move |b| b.action == action)
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }
}
