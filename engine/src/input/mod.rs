//! Input Module
//!
//! Platform-agnostic input handling. A windowing layer feeds raw key, button
//! and motion events into an [`ActionRouter`], which emits per-frame
//! [`ActionEvent`]s for the character.
//!
//! # Example
//!
//! ```rust,ignore
//! use hipfire_engine::input::{ActionRouter, InputMap, KeyCode, MouseButton};
//!
//! let mut router = ActionRouter::new(InputMap::default());
//! router.key_event(KeyCode::W, true);
//! router.button_event(MouseButton::Left, true);
//! router.mouse_motion(12.0, -3.0);
//!
//! for event in router.route() {
//!     character.handle_action(&event, dt);
//! }
//! ```

pub mod bindings;
pub mod keyboard;
pub mod mouse;
pub mod mouse_state;
pub mod router;

pub use bindings::{Binding, InputAction, InputMap, InputSource};
pub use keyboard::{KeyCode, KeyboardState};
pub use mouse::{ButtonState, MouseAxis, MouseButton};
pub use mouse_state::MouseMotion;
pub use router::{ActionEvent, ActionRouter, TriggerEvent};
