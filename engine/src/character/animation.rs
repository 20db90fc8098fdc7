//! Animation Properties
//!
//! Read-only snapshot an animation graph consumes each frame: how fast the
//! character moves, whether it is falling, and how far the movement
//! direction is turned away from the aim direction (for strafe blending).

use glam::Vec3;

use crate::interp::normalize_degrees;
use crate::player::PlayerMovementController;

/// Values mirrored from the character once per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimationProperties {
    /// Planar speed (cm/s)
    pub speed: f32,
    pub is_in_air: bool,
    /// Movement input is pushing the character
    pub is_accelerating: bool,
    pub aiming: bool,
    /// Velocity yaw minus aim yaw, degrees in (-180, 180]; 0 while stationary
    pub movement_offset_yaw: f32,
    /// Offset from the last frame the character was moving, for stop animations
    pub last_movement_offset_yaw: f32,
    pub crosshair_spread: f32,
}

impl AnimationProperties {
    /// Refresh from the character's current state.
    ///
    /// # Arguments
    /// * `movement` - Locomotion state after this frame's tick
    /// * `aiming` - Aim button held
    /// * `aim_yaw_degrees` - Control yaw in degrees
    /// * `crosshair_spread` - Spread computed this frame
    pub fn update(
        &mut self,
        movement: &PlayerMovementController,
        aiming: bool,
        aim_yaw_degrees: f32,
        crosshair_spread: f32,
    ) {
        let planar = movement.planar_velocity();
        self.speed = planar.length();
        self.is_in_air = movement.is_airborne();
        self.is_accelerating = movement.is_accelerating();
        self.aiming = aiming;
        self.crosshair_spread = crosshair_spread;

        if self.speed > 0.0 {
            self.movement_offset_yaw = normalize_degrees(velocity_yaw_degrees(planar) - aim_yaw_degrees);
            self.last_movement_offset_yaw = self.movement_offset_yaw;
        } else {
            self.movement_offset_yaw = 0.0;
        }
    }
}

/// Yaw of a planar velocity in degrees, in the control-rotation convention
/// (0 toward -Z, 90 toward +X).
pub fn velocity_yaw_degrees(velocity: Vec3) -> f32 {
    velocity.x.atan2(-velocity.z).to_degrees()
}
