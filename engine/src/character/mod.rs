//! Character Module
//!
//! The player-controlled shooter character and the animation snapshot it
//! publishes each frame.

pub mod animation;
pub mod shooter;

pub use animation::{AnimationProperties, velocity_yaw_degrees};
pub use shooter::ShooterCharacter;
