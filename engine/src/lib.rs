//! Hipfire Engine Library
//!
//! Aim targeting and crosshair feedback for a third-person shooter, plus
//! the character systems around it. Window-system and renderer agnostic:
//! a host feeds raw input and a collision world, and reads back camera,
//! crosshair and animation state.
//!
//! # Modules
//!
//! - [`aim`] - Target resolver, crosshair spread estimator, screen deprojection
//! - [`physics`] - Segment traces and a box collision world
//! - [`camera`] - Control rotation, look rates, zoom and the camera boom
//! - [`input`] - Key/mouse input mapped to actions
//! - [`player`] - Camera-relative locomotion with jump and gravity
//! - [`weapon`] - Muzzle socket and the hit-scan fire sequence
//! - [`character`] - The shooter character and its animation properties
//! - [`hud`] - Crosshair layout and GPU uniforms
//! - [`sim`] - Frame driver
//! - [`config`] - JSON-loadable tunables
//!
//! # Example
//!
//! ```ignore
//! use hipfire_engine::{BoxWorld, EffectLog, ShooterConfig, Simulation};
//! use hipfire_engine::input::MouseButton;
//!
//! let mut sim = Simulation::new(&ShooterConfig::default(), BoxWorld::new(), EffectLog::new());
//! sim.router_mut().button_event(MouseButton::Left, true);
//! let report = sim.step(1.0 / 60.0);
//! println!("spread {:.2}, shot {:?}", report.spread, report.shot);
//! ```

pub mod aim;
pub mod camera;
pub mod character;
pub mod config;
pub mod error;
pub mod hud;
pub mod input;
pub mod interp;
pub mod physics;
pub mod player;
pub mod sim;
pub mod weapon;

// Re-export the core aim types at crate level for convenience
pub use aim::{
    AimQuery, AimResult, CrosshairConfig, CrosshairSpreadEstimator, MovementState, Viewport, resolve,
};
pub use character::{AnimationProperties, ShooterCharacter};
pub use config::ShooterConfig;
pub use error::{AimError, ConfigError};
pub use physics::{Aabb, BoxWorld, SegmentTrace, TraceHit};
pub use sim::{FrameReport, Simulation};
pub use weapon::{EffectLog, WeaponEffects};
