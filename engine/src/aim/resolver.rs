//! Target Resolver
//!
//! Works out where a hit-scan shot ends. Two traces reconcile "where the
//! player is looking" with "where the gun physically points":
//!
//! 1. Trace the screen-center ray from the camera out to `max_range`.
//!    The hit (or the far point) is the provisional target.
//! 2. Trace from the muzzle to the provisional target. If something sits
//!    between the muzzle and the target, the beam stops there instead of
//!    visually passing through it.
//!
//! Resolution never returns "no target": with nothing in the way the beam
//! ends at the far point of the camera ray.

use glam::Vec3;
use log::debug;

use crate::error::{AimError, ensure_finite};
use crate::physics::SegmentTrace;

/// Minimum squared length accepted for the camera direction.
const MIN_DIRECTION_LENGTH_SQ: f32 = 1e-8;

/// Inputs for a single fire event. Built fresh per shot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimQuery {
    /// Viewport width in pixels
    pub viewport_width: f32,
    /// Viewport height in pixels
    pub viewport_height: f32,
    /// Origin of the deprojected screen-center ray
    pub camera_world_position: Vec3,
    /// Direction of the deprojected screen-center ray (unit length expected)
    pub camera_world_direction: Vec3,
    /// World position of the barrel socket
    pub muzzle_world_position: Vec3,
    /// Trace length used by both stages
    pub max_range: f32,
}

impl AimQuery {
    /// Check the query for degenerate input.
    ///
    /// Fails with [`AimError::InvalidArgument`] on a zero-length direction,
    /// a non-positive range or viewport, or any non-finite value.
    pub fn validate(&self) -> Result<(), AimError> {
        if !(self.viewport_width.is_finite() && self.viewport_width > 0.0)
            || !(self.viewport_height.is_finite() && self.viewport_height > 0.0)
        {
            return Err(AimError::invalid(format!(
                "viewport must be positive, got {}x{}",
                self.viewport_width, self.viewport_height
            )));
        }
        if !(self.max_range.is_finite() && self.max_range > 0.0) {
            return Err(AimError::invalid(format!(
                "max_range must be positive, got {}",
                self.max_range
            )));
        }
        ensure_finite("camera_world_position", self.camera_world_position)?;
        ensure_finite("camera_world_direction", self.camera_world_direction)?;
        ensure_finite("muzzle_world_position", self.muzzle_world_position)?;
        if self.camera_world_direction.length_squared() < MIN_DIRECTION_LENGTH_SQ {
            return Err(AimError::invalid("camera_world_direction has zero length"));
        }
        Ok(())
    }

    /// End of the screen-center ray at full range.
    pub fn screen_far_point(&self) -> Vec3 {
        self.camera_world_position + self.camera_world_direction.normalize() * self.max_range
    }
}

/// Output of target resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimResult {
    /// Where the beam ends: obstruction, screen target or far point
    pub beam_end_point: Vec3,
    /// True when the beam stopped on geometry rather than at the far point
    pub blocked: bool,
}

/// Resolve the beam end point for a shot.
///
/// Pure apart from the supplied trace collaborator; identical inputs against
/// identical world state give identical results. Trace failures propagate
/// unchanged and are not retried.
pub fn resolve<T: SegmentTrace + ?Sized>(query: &AimQuery, world: &T) -> Result<AimResult, AimError> {
    query.validate()?;

    let screen_far_point = query.screen_far_point();
    let screen_hit = world.trace_segment(query.camera_world_position, screen_far_point)?;
    let provisional_target = if screen_hit.did_hit {
        screen_hit.hit_point
    } else {
        screen_far_point
    };

    let muzzle_hit = world.trace_segment(query.muzzle_world_position, provisional_target)?;
    let beam_end_point = if muzzle_hit.did_hit {
        muzzle_hit.hit_point
    } else {
        provisional_target
    };

    debug!(
        "resolved beam end {beam_end_point} (screen hit: {}, muzzle hit: {})",
        screen_hit.did_hit, muzzle_hit.did_hit
    );

    Ok(AimResult {
        beam_end_point,
        blocked: screen_hit.did_hit || muzzle_hit.did_hit,
    })
}
