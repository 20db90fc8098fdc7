//! Player Movement Controller
//!
//! Camera-relative character locomotion on flat ground.
//! Movement direction follows the control yaw, not the character's facing,
//! so strafing while aiming works the way third-person shooters expect.
//!
//! # Physics Model (centimetres)
//!
//! - Max walk speed: 600 cm/s
//! - Acceleration: 2048 cm/s², braking: 2048 cm/s²
//! - Jump velocity: 600 cm/s, gravity: 980 cm/s²
//! - Air control: 5% of ground acceleration, no braking in the air
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut controller = PlayerMovementController::new(LocomotionConfig::default());
//!
//! // Each frame:
//! let input = MovementInput { forward: 1.0, right: 0.0 };
//! controller.tick(delta_time, &input, rotation.yaw, 0.0);
//! let speed = controller.planar_speed();
//! ```

use glam::Vec3;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::camera::ControlRotation;

/// Longest step the integrator takes; larger frames are clamped.
pub const MAX_STEP: f32 = 0.1;

/// Locomotion tunables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    /// Top planar speed (cm/s)
    pub max_walk_speed: f32,
    /// Planar acceleration toward the input direction (cm/s²)
    pub max_acceleration: f32,
    /// Deceleration with no input on the ground (cm/s²)
    pub braking_deceleration: f32,
    /// Launch speed of a jump (cm/s)
    pub jump_velocity: f32,
    /// Downward acceleration (cm/s²)
    pub gravity: f32,
    /// Fraction of `max_acceleration` available while airborne, in [0, 1]
    pub air_control: f32,
    /// Grace period for jumping after walking off a ledge (s)
    pub coyote_time: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            max_walk_speed: 600.0,
            max_acceleration: 2048.0,
            braking_deceleration: 2048.0,
            jump_velocity: 600.0,
            gravity: 980.0,
            air_control: 0.05,
            coyote_time: 0.1,
        }
    }
}

/// Movement axes for one frame, each in [-1, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MovementInput {
    /// Forward (+) / back (-)
    pub forward: f32,
    /// Right (+) / left (-)
    pub right: f32,
}

impl MovementInput {
    pub fn is_zero(&self) -> bool {
        self.forward == 0.0 && self.right == 0.0
    }
}

/// Camera-relative movement with acceleration, braking, jump and gravity.
///
/// The controller owns the character position. `position.y` is the feet.
#[derive(Debug, Clone)]
pub struct PlayerMovementController {
    config: LocomotionConfig,
    position: Vec3,
    /// Planar velocity (y always 0)
    velocity: Vec3,
    /// Positive = upward
    vertical_velocity: f32,
    is_grounded: bool,
    coyote_time_remaining: f32,
    /// Input acceleration applied on the last tick
    current_acceleration: Vec3,
}

impl Default for PlayerMovementController {
    fn default() -> Self {
        Self::new(LocomotionConfig::default())
    }
}

impl PlayerMovementController {
    pub fn new(config: LocomotionConfig) -> Self {
        Self {
            config,
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            vertical_velocity: 0.0,
            is_grounded: true,
            coyote_time_remaining: 0.0,
            current_acceleration: Vec3::ZERO,
        }
    }

    /// Start at `position`, grounded.
    pub fn with_position(config: LocomotionConfig, position: Vec3) -> Self {
        Self {
            position,
            ..Self::new(config)
        }
    }

    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Full velocity including the vertical component.
    pub fn velocity(&self) -> Vec3 {
        self.velocity + Vec3::Y * self.vertical_velocity
    }

    /// Planar (XZ) velocity.
    pub fn planar_velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn planar_speed(&self) -> f32 {
        self.velocity.length()
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    pub fn is_grounded(&self) -> bool {
        self.is_grounded
    }

    pub fn is_airborne(&self) -> bool {
        !self.is_grounded
    }

    /// Whether movement input pushed the character on the last tick.
    pub fn is_accelerating(&self) -> bool {
        self.current_acceleration.length_squared() > 0.0
    }

    pub fn can_jump(&self) -> bool {
        self.is_grounded || self.coyote_time_remaining > 0.0
    }

    /// Launch a jump if grounded (or within coyote time).
    ///
    /// # Returns
    /// `true` if the jump started
    pub fn jump(&mut self) -> bool {
        if !self.can_jump() {
            return false;
        }
        self.vertical_velocity = self.config.jump_velocity;
        self.is_grounded = false;
        self.coyote_time_remaining = 0.0;
        true
    }

    /// World-space wish direction for the given input and control yaw.
    pub fn input_direction(input: &MovementInput, yaw: f32) -> Vec3 {
        let basis = ControlRotation::new(yaw, 0.0);
        let forward = basis.planar_forward();
        let right = basis.right();
        let wish = forward * input.forward.clamp(-1.0, 1.0) + right * input.right.clamp(-1.0, 1.0);
        // Diagonal input is not faster than straight input
        if wish.length_squared() > 1.0 {
            wish.normalize()
        } else {
            wish
        }
    }

    /// Advance one frame.
    ///
    /// # Arguments
    /// * `dt` - Delta time in seconds (clamped to [`MAX_STEP`]; `<= 0` is a no-op)
    /// * `input` - Movement axes
    /// * `yaw` - Control yaw in radians
    /// * `ground_height` - Y of the ground under the character
    pub fn tick(&mut self, dt: f32, input: &MovementInput, yaw: f32, ground_height: f32) {
        if !(dt > 0.0) {
            return;
        }
        let dt = dt.min(MAX_STEP);

        self.update_planar(dt, input, yaw);
        self.apply_gravity(dt);
        self.update_grounded_state(ground_height);
    }

    fn update_planar(&mut self, dt: f32, input: &MovementInput, yaw: f32) {
        let wish = Self::input_direction(input, yaw);
        let control = if self.is_grounded { 1.0 } else { self.config.air_control };
        self.current_acceleration = wish * self.config.max_acceleration * control;

        if wish.length_squared() > 0.0 {
            let target_velocity = wish * self.config.max_walk_speed;
            let velocity_diff = target_velocity - self.velocity;
            let accel_this_frame = self.config.max_acceleration * control * dt;

            if velocity_diff.length() <= accel_this_frame {
                self.velocity = target_velocity;
            } else {
                self.velocity += velocity_diff.normalize() * accel_this_frame;
            }
        } else if self.is_grounded {
            let current_speed = self.velocity.length();
            let decel_this_frame = self.config.braking_deceleration * dt;
            if current_speed <= decel_this_frame {
                self.velocity = Vec3::ZERO;
            } else {
                self.velocity *= (current_speed - decel_this_frame) / current_speed;
            }
        }

        self.position += self.velocity * dt;
    }

    /// Midpoint integration of the vertical axis.
    fn apply_gravity(&mut self, dt: f32) {
        if self.is_grounded && self.vertical_velocity <= 0.0 {
            return;
        }
        let prev = self.vertical_velocity;
        self.vertical_velocity -= self.config.gravity * dt;
        self.position.y += (prev + self.vertical_velocity) * 0.5 * dt;

        if !self.is_grounded {
            self.coyote_time_remaining = (self.coyote_time_remaining - dt).max(0.0);
        }
    }

    fn update_grounded_state(&mut self, ground_height: f32) {
        if self.position.y <= ground_height {
            if !self.is_grounded {
                debug!("landed at {} (impact {:.0} cm/s)", self.position, -self.vertical_velocity);
            }
            self.position.y = ground_height;
            self.is_grounded = true;
            self.vertical_velocity = 0.0;
            self.coyote_time_remaining = self.config.coyote_time;
        } else if self.is_grounded {
            // Walked off a ledge
            self.is_grounded = false;
            self.coyote_time_remaining = self.config.coyote_time;
        }
    }

    /// Stop all motion and put the character back on the ground.
    pub fn reset(&mut self) {
        self.velocity = Vec3::ZERO;
        self.vertical_velocity = 0.0;
        self.is_grounded = true;
        self.coyote_time_remaining = 0.0;
        self.current_acceleration = Vec3::ZERO;
    }
}
