//! Aim Module
//!
//! Aim targeting and crosshair feedback:
//!
//! - [`resolver`] - Two-stage screen/muzzle trace that decides where a shot lands
//! - [`crosshair`] - Per-frame crosshair spread from movement, aim and fire state
//! - [`deproject`] - Screen pixel to world ray conversion

pub mod crosshair;
pub mod deproject;
pub mod resolver;

pub use crosshair::{
    BASE_SPREAD, CrosshairConfig, CrosshairSpreadEstimator, MovementState, SpreadFactors,
    velocity_factor,
};
pub use deproject::{CameraRay, Viewport, deproject, deproject_center};
pub use resolver::{AimQuery, AimResult, resolve};
