//! Camera Boom
//!
//! Third-person spring arm: the camera hangs `arm_length` behind a pivot
//! above the character, shifted by a view-space socket offset so the
//! character sits off-center. When geometry sits between the pivot and the
//! ideal camera spot, the arm pulls in so the camera never clips into walls.

use glam::Vec3;
use log::trace;
use serde::{Deserialize, Serialize};

use super::ControlRotation;
use crate::physics::SegmentTrace;

/// Boom collision tunables (centimetres).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoomCollisionConfig {
    /// Whether the arm pulls in on obstruction
    pub enabled: bool,
    /// Gap kept between the camera and the obstruction
    pub probe_margin: f32,
    /// Arm never shrinks below this
    pub min_length: f32,
}

impl Default for BoomCollisionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            probe_margin: 12.0,
            min_length: 30.0,
        }
    }
}

/// Spring arm tunables (centimetres).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoomConfig {
    /// Distance behind the pivot
    pub arm_length: f32,
    /// Offset in view space: x = right, y = up, z = back
    pub socket_offset: Vec3,
    /// Height of the pivot above the character's feet
    pub pivot_height: f32,
    pub collision: BoomCollisionConfig,
}

impl Default for BoomConfig {
    fn default() -> Self {
        Self {
            arm_length: 300.0,
            socket_offset: Vec3::new(50.0, 70.0, 0.0),
            pivot_height: 90.0,
            collision: BoomCollisionConfig::default(),
        }
    }
}

/// Spring arm state. Call [`CameraBoom::update`] once per frame.
#[derive(Debug, Clone)]
pub struct CameraBoom {
    config: BoomConfig,
    /// Arm scale in (0, 1] after collision
    arm_fraction: f32,
    camera_position: Vec3,
}

impl Default for CameraBoom {
    fn default() -> Self {
        Self::new(BoomConfig::default())
    }
}

impl CameraBoom {
    pub fn new(config: BoomConfig) -> Self {
        Self {
            config,
            arm_fraction: 1.0,
            camera_position: Vec3::ZERO,
        }
    }

    pub fn config(&self) -> &BoomConfig {
        &self.config
    }

    /// Camera position from the last update.
    pub fn camera_position(&self) -> Vec3 {
        self.camera_position
    }

    /// Fraction of the full arm in use after collision (1 = unobstructed).
    pub fn arm_fraction(&self) -> f32 {
        self.arm_fraction
    }

    /// World-space pivot for a character standing at `character_position`.
    pub fn pivot(&self, character_position: Vec3) -> Vec3 {
        character_position + Vec3::Y * self.config.pivot_height
    }

    /// Camera position with nothing in the way.
    pub fn ideal_position(&self, character_position: Vec3, rotation: ControlRotation) -> Vec3 {
        let offset = self.config.socket_offset;
        self.pivot(character_position) - rotation.forward() * (self.config.arm_length + offset.z)
            + rotation.right() * offset.x
            + rotation.up() * offset.y
    }

    /// Place the camera for this frame, pulling in against `world` geometry.
    ///
    /// A failed trace keeps the full arm; the camera is cosmetic and the
    /// next frame retries.
    pub fn update<T: SegmentTrace + ?Sized>(
        &mut self,
        character_position: Vec3,
        rotation: ControlRotation,
        world: &T,
    ) -> Vec3 {
        let pivot = self.pivot(character_position);
        let ideal = self.ideal_position(character_position, rotation);
        let to_ideal = ideal - pivot;
        let full = to_ideal.length();

        self.arm_fraction = 1.0;
        if self.config.collision.enabled && full > f32::EPSILON {
            let dir = to_ideal / full;
            let probe_end = pivot + dir * (full + self.config.collision.probe_margin);
            match world.trace_segment(pivot, probe_end) {
                Ok(hit) if hit.did_hit => {
                    let hit_distance = (hit.hit_point - pivot).length();
                    let safe = (hit_distance - self.config.collision.probe_margin)
                        .max(self.config.collision.min_length)
                        .min(full);
                    self.arm_fraction = safe / full;
                }
                Ok(_) => {}
                Err(e) => trace!("boom trace skipped: {e}"),
            }
        }

        self.camera_position = pivot + to_ideal * self.arm_fraction;
        self.camera_position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AimError;
    use crate::physics::{Aabb, BoxWorld, TraceHit};

    fn no_offset() -> BoomConfig {
        BoomConfig {
            socket_offset: Vec3::ZERO,
            ..Default::default()
        }
    }

    #[test]
    fn test_unobstructed_sits_behind_pivot() {
        let mut boom = CameraBoom::new(no_offset());
        let cam = boom.update(Vec3::ZERO, ControlRotation::default(), &BoxWorld::new());
        // Looking toward -Z, so the camera is behind along +Z
        assert!((cam - Vec3::new(0.0, 90.0, 300.0)).length() < 1e-3);
        assert_eq!(boom.arm_fraction(), 1.0);
    }

    #[test]
    fn test_socket_offset_is_view_space() {
        let boom = CameraBoom::default();
        let ideal = boom.ideal_position(Vec3::ZERO, ControlRotation::default());
        assert!((ideal - Vec3::new(50.0, 160.0, 300.0)).length() < 1e-3);
    }

    #[test]
    fn test_wall_pulls_arm_in() {
        let mut world = BoxWorld::new();
        // Wall 100cm behind the pivot
        world.add_box(
            "wall",
            Aabb::new(Vec3::new(-500.0, -500.0, 100.0), Vec3::new(500.0, 500.0, 120.0)),
        );
        let mut boom = CameraBoom::new(no_offset());
        let cam = boom.update(Vec3::ZERO, ControlRotation::default(), &world);
        assert!((cam.z - (100.0 - 12.0)).abs() < 1e-2, "camera at {cam}");
        assert!(boom.arm_fraction() < 1.0);
    }

    #[test]
    fn test_min_length_respected() {
        let mut world = BoxWorld::new();
        world.add_box(
            "pillar",
            Aabb::new(Vec3::new(-50.0, 0.0, 5.0), Vec3::new(50.0, 200.0, 15.0)),
        );
        let mut boom = CameraBoom::new(no_offset());
        let cam = boom.update(Vec3::ZERO, ControlRotation::default(), &world);
        assert!((cam.z - 30.0).abs() < 1e-2);
    }

    #[test]
    fn test_collision_disabled() {
        let mut world = BoxWorld::new();
        world.add_box("wall", Aabb::new(Vec3::splat(-500.0), Vec3::new(500.0, 500.0, 120.0)));
        let mut config = no_offset();
        config.collision.enabled = false;
        let mut boom = CameraBoom::new(config);
        boom.update(Vec3::ZERO, ControlRotation::default(), &world);
        assert_eq!(boom.arm_fraction(), 1.0);
    }

    #[test]
    fn test_trace_failure_keeps_full_arm() {
        let broken = |_s: Vec3, _e: Vec3| -> Result<TraceHit, AimError> {
            Err(AimError::Unavailable("loading".to_string()))
        };
        let mut boom = CameraBoom::new(no_offset());
        let cam = boom.update(Vec3::ZERO, ControlRotation::default(), &broken);
        assert!((cam.z - 300.0).abs() < 1e-3);
    }
}
