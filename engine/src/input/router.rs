//! Action Router
//!
//! Collects raw key, button and motion events between frames and, once per
//! frame, turns them into [`ActionEvent`]s through an [`InputMap`].
//!
//! # Trigger semantics
//!
//! | Action kind | Event                                                   |
//! |-------------|---------------------------------------------------------|
//! | axis        | `Triggered` with the summed scaled value when non-zero  |
//! | button      | `Started` on press, `Triggered` while held, `Completed` on release |
//!
//! A press and release inside one frame still produces all three button
//! events so quick taps are never lost. A held button released and pressed
//! again inside one frame emits `Completed` then `Started`.

use std::collections::HashSet;

use log::trace;

use super::{
    ButtonState, InputAction, InputMap, InputSource, KeyCode, KeyboardState, MouseAxis, MouseButton,
    MouseMotion,
};

/// Phase of an action this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerEvent {
    Started,
    Triggered,
    Completed,
}

/// A routed action for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionEvent {
    pub action: InputAction,
    pub trigger: TriggerEvent,
    /// Axis value, or the binding scale for buttons
    pub value: f32,
}

impl ActionEvent {
    pub fn new(action: InputAction, trigger: TriggerEvent, value: f32) -> Self {
        Self { action, trigger, value }
    }
}

/// Raw input → per-frame action events.
#[derive(Debug, Clone, Default)]
pub struct ActionRouter {
    map: InputMap,
    keyboard: KeyboardState,
    buttons: ButtonState,
    motion: MouseMotion,
    /// Sources pressed since the last route
    pressed_edges: HashSet<InputSource>,
    /// Sources released since the last route
    released_edges: HashSet<InputSource>,
    /// Button actions held at the end of the last route
    held_actions: HashSet<InputAction>,
}

impl ActionRouter {
    pub fn new(map: InputMap) -> Self {
        Self {
            map,
            ..Default::default()
        }
    }

    pub fn input_map(&self) -> &InputMap {
        &self.map
    }

    /// Swap the bindings. Held state is kept.
    pub fn set_input_map(&mut self, map: InputMap) {
        self.map = map;
    }

    pub fn key_event(&mut self, key: KeyCode, pressed: bool) {
        if self.keyboard.handle_key(key, pressed) {
            self.record_edge(InputSource::Key(key), pressed);
        }
    }

    pub fn button_event(&mut self, button: MouseButton, pressed: bool) {
        if self.buttons.set(button, pressed) {
            self.record_edge(InputSource::MouseButton(button), pressed);
        }
    }

    fn record_edge(&mut self, source: InputSource, pressed: bool) {
        if pressed {
            self.pressed_edges.insert(source);
        } else {
            self.released_edges.insert(source);
        }
    }

    pub fn mouse_motion(&mut self, dx: f32, dy: f32) {
        self.motion.accumulate_delta(dx, dy);
    }

    pub fn set_cursor_captured(&mut self, captured: bool) {
        self.motion.set_captured(captured);
    }

    /// Release everything, e.g. on focus loss. Held buttons complete on the next route.
    pub fn release_all(&mut self) {
        self.keyboard.reset();
        self.buttons.reset();
        self.motion.consume_delta();
    }

    fn source_value(&self, source: InputSource, mouse_delta: (f32, f32)) -> f32 {
        match source {
            InputSource::MouseAxis(MouseAxis::X) => mouse_delta.0,
            InputSource::MouseAxis(MouseAxis::Y) => mouse_delta.1,
            button if self.is_down(button) => 1.0,
            _ => 0.0,
        }
    }

    fn is_down(&self, source: InputSource) -> bool {
        match source {
            InputSource::Key(key) => self.keyboard.is_pressed(key),
            InputSource::MouseButton(button) => self.buttons.is_pressed(button),
            InputSource::MouseAxis(_) => false,
        }
    }

    /// Emit this frame's action events and clear per-frame edges and motion.
    ///
    /// Events are ordered by binding order for axes, then buttons in the
    /// same order; an action appears at most once per trigger phase.
    pub fn route(&mut self) -> Vec<ActionEvent> {
        let mouse_delta = self.motion.consume_delta();
        let mut events = Vec::new();
        let mut seen_axes: Vec<InputAction> = Vec::new();
        let mut seen_buttons: Vec<InputAction> = Vec::new();

        for binding in self.map.bindings() {
            let action = binding.action;
            if action.is_axis() {
                if seen_axes.contains(&action) {
                    continue;
                }
                seen_axes.push(action);
                let value: f32 = self
                    .map
                    .sources_for(action)
                    .map(|b| self.source_value(b.source, mouse_delta) * b.scale)
                    .sum();
                if value != 0.0 && value.is_finite() {
                    events.push(ActionEvent::new(action, TriggerEvent::Triggered, value));
                }
            } else if !seen_buttons.contains(&action) {
                seen_buttons.push(action);
            }
        }

        for action in seen_buttons {
            let mut scale = 1.0;
            let mut pressed_edge = false;
            let mut released_edge = false;
            let mut down = false;
            for b in self.map.sources_for(action) {
                released_edge |= self.released_edges.contains(&b.source);
                if self.is_down(b.source) {
                    down = true;
                    scale = b.scale;
                }
                if self.pressed_edges.contains(&b.source) {
                    pressed_edge = true;
                    scale = b.scale;
                }
            }

            let was_held = self.held_actions.contains(&action);
            // Held, let go and pressed again since the last route
            let restarted = was_held && released_edge && pressed_edge;
            let started = (down || pressed_edge) && (!was_held || restarted);
            let completed = !down && (was_held || pressed_edge);

            if restarted {
                events.push(ActionEvent::new(action, TriggerEvent::Completed, 0.0));
            }
            if started {
                events.push(ActionEvent::new(action, TriggerEvent::Started, scale));
            }
            if down || pressed_edge {
                events.push(ActionEvent::new(action, TriggerEvent::Triggered, scale));
            }
            if completed {
                events.push(ActionEvent::new(action, TriggerEvent::Completed, 0.0));
            }

            if down {
                self.held_actions.insert(action);
            } else {
                self.held_actions.remove(&action);
            }
        }

        self.pressed_edges.clear();
        self.released_edges.clear();

        if !events.is_empty() {
            trace!("routed {} action events", events.len());
        }
        events
    }
}
