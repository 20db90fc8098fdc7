//! Player Module
//!
//! Character locomotion.
//!
//! # Components
//!
//! - [`PlayerMovementController`] - Camera-relative movement with acceleration,
//!   braking, air control, jump and gravity
//! - [`LocomotionConfig`] - Movement tunables

pub mod movement_controller;

pub use movement_controller::{LocomotionConfig, MAX_STEP, MovementInput, PlayerMovementController};
