//! Physics module
//!
//! Collision queries used by weapon traces and the follow camera.
//!
//! # Unit System
//!
//! **1 unit = 1 centimetre** throughout the crate (walk speed 600 = 6 m/s).
//!
//! # Submodules
//!
//! - [`collision`] - Segment traces, ray-AABB intersection and [`BoxWorld`]

pub mod collision;

pub use collision::{Aabb, BoxWorld, Obstacle, SegmentTrace, TraceHit, ray_aabb_intersect};
