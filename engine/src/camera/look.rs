//! Control Rotation and Look Rates
//!
//! The player's aim direction as yaw/pitch, plus the rate tables that turn
//! look input into rotation. Aiming down sights swaps the hip-fire rates for
//! slower aim rates so small corrections are easier.
//!
//! Two input styles feed the same rotation:
//! - **At rate** (gamepad stick / arrow keys): `value * rate * dt` degrees
//! - **Direct** (mouse): `value * mouse_scale` degrees per event

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Pitch limit: -89 degrees in radians
pub const PITCH_LIMIT_MIN: f32 = -89.0 * std::f32::consts::PI / 180.0;
/// Pitch limit: +89 degrees in radians
pub const PITCH_LIMIT_MAX: f32 = 89.0 * std::f32::consts::PI / 180.0;

/// Yaw/pitch orientation of the player's view.
///
/// # Coordinate System
/// - +X = right, +Y = up, -Z = forward at yaw 0
/// - Positive yaw turns right, positive pitch looks up
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ControlRotation {
    /// Horizontal angle (radians), unrestricted
    pub yaw: f32,
    /// Vertical angle (radians), clamped to ±89°
    pub pitch: f32,
}

impl ControlRotation {
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self {
            yaw,
            pitch: pitch.clamp(PITCH_LIMIT_MIN, PITCH_LIMIT_MAX),
        }
    }

    /// View direction (normalized).
    #[inline]
    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            -self.yaw.cos() * self.pitch.cos(),
        )
        .normalize()
    }

    /// Right vector in the horizontal plane.
    #[inline]
    pub fn right(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, self.yaw.sin())
    }

    /// Up vector perpendicular to forward and right.
    #[inline]
    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward()).normalize()
    }

    /// Forward with pitch removed, used for movement.
    #[inline]
    pub fn planar_forward(&self) -> Vec3 {
        Vec3::new(self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    /// Yaw in degrees wrapped to (-180, 180].
    pub fn yaw_degrees(&self) -> f32 {
        crate::interp::normalize_degrees(self.yaw.to_degrees())
    }

    pub fn add_yaw_degrees(&mut self, degrees: f32) {
        self.yaw += degrees.to_radians();
    }

    pub fn add_pitch_degrees(&mut self, degrees: f32) {
        self.pitch = (self.pitch + degrees.to_radians()).clamp(PITCH_LIMIT_MIN, PITCH_LIMIT_MAX);
    }

    /// Rate-based turn. `value` is normalized stick deflection in [-1, 1].
    pub fn turn_at_rate(&mut self, value: f32, rates: &LookRates, dt: f32) {
        self.add_yaw_degrees(value * rates.turn_rate * dt);
    }

    /// Rate-based look up/down. Positive looks up.
    pub fn look_up_at_rate(&mut self, value: f32, rates: &LookRates, dt: f32) {
        self.add_pitch_degrees(value * rates.look_up_rate * dt);
    }

    /// Direct (mouse) turn.
    pub fn turn(&mut self, value: f32, rates: &LookRates) {
        self.add_yaw_degrees(value * rates.mouse_turn_scale);
    }

    /// Direct (mouse) look up/down. Positive looks up.
    pub fn look_up(&mut self, value: f32, rates: &LookRates) {
        self.add_pitch_degrees(value * rates.mouse_look_up_scale);
    }
}

/// Look tunables for hip fire and aiming.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookConfig {
    /// Turn rate while not aiming (deg/s)
    pub hip_turn_rate: f32,
    /// Look up rate while not aiming (deg/s)
    pub hip_look_up_rate: f32,
    /// Turn rate while aiming (deg/s)
    pub aim_turn_rate: f32,
    /// Look up rate while aiming (deg/s)
    pub aim_look_up_rate: f32,
    /// Mouse turn scale while not aiming, in [0, 1]
    pub mouse_hip_turn_rate: f32,
    /// Mouse look up scale while not aiming, in [0, 1]
    pub mouse_hip_look_up_rate: f32,
    /// Mouse turn scale while aiming, in [0, 1]
    pub mouse_aim_turn_rate: f32,
    /// Mouse look up scale while aiming, in [0, 1]
    pub mouse_aim_look_up_rate: f32,
}

impl Default for LookConfig {
    fn default() -> Self {
        Self {
            hip_turn_rate: 90.0,
            hip_look_up_rate: 90.0,
            aim_turn_rate: 20.0,
            aim_look_up_rate: 20.0,
            mouse_hip_turn_rate: 1.0,
            mouse_hip_look_up_rate: 1.0,
            mouse_aim_turn_rate: 0.2,
            mouse_aim_look_up_rate: 0.2,
        }
    }
}

impl LookConfig {
    /// Pick the rate set for the current aim state.
    pub fn rates(&self, aiming: bool) -> LookRates {
        if aiming {
            LookRates {
                turn_rate: self.aim_turn_rate,
                look_up_rate: self.aim_look_up_rate,
                mouse_turn_scale: self.mouse_aim_turn_rate,
                mouse_look_up_scale: self.mouse_aim_look_up_rate,
            }
        } else {
            LookRates {
                turn_rate: self.hip_turn_rate,
                look_up_rate: self.hip_look_up_rate,
                mouse_turn_scale: self.mouse_hip_turn_rate,
                mouse_look_up_scale: self.mouse_hip_look_up_rate,
            }
        }
    }
}

/// Rates in effect for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookRates {
    pub turn_rate: f32,
    pub look_up_rate: f32,
    pub mouse_turn_scale: f32,
    pub mouse_look_up_scale: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_at_rest_is_neg_z() {
        let r = ControlRotation::default();
        assert!((r.forward() - Vec3::NEG_Z).length() < 1e-6);
        assert!((r.right() - Vec3::X).length() < 1e-6);
        assert!((r.up() - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn test_right_matches_forward_cross_up() {
        let r = ControlRotation::new(1.1, 0.4);
        let expected = r.forward().cross(Vec3::Y).normalize();
        assert!((r.right() - expected).length() < 1e-5);
    }

    #[test]
    fn test_turn_at_rate_hip() {
        let mut r = ControlRotation::default();
        let rates = LookConfig::default().rates(false);
        r.turn_at_rate(1.0, &rates, 0.5);
        assert!((r.yaw.to_degrees() - 45.0).abs() < 1e-3);
    }

    #[test]
    fn test_aiming_slows_rates() {
        let cfg = LookConfig::default();
        let hip = cfg.rates(false);
        let aim = cfg.rates(true);
        assert!(aim.turn_rate < hip.turn_rate);
        assert!(aim.mouse_turn_scale < hip.mouse_turn_scale);

        let mut a = ControlRotation::default();
        let mut b = ControlRotation::default();
        a.turn(10.0, &hip);
        b.turn(10.0, &aim);
        assert!((a.yaw.to_degrees() - 10.0).abs() < 1e-4);
        assert!((b.yaw.to_degrees() - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_pitch_clamped() {
        let mut r = ControlRotation::default();
        let rates = LookConfig::default().rates(false);
        r.look_up(500.0, &rates);
        assert!((r.pitch - PITCH_LIMIT_MAX).abs() < 1e-6);
        r.look_up_at_rate(-1.0, &rates, 10.0);
        assert!((r.pitch - PITCH_LIMIT_MIN).abs() < 1e-6);
    }

    #[test]
    fn test_yaw_degrees_wraps() {
        let r = ControlRotation::new(270f32.to_radians(), 0.0);
        assert!((r.yaw_degrees() - -90.0).abs() < 1e-3);
    }
}
