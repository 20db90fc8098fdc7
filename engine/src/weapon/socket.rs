//! Muzzle Socket
//!
//! World transform of the barrel tip, derived from the character position
//! and the control rotation.

use glam::Vec3;

use crate::camera::ControlRotation;

/// Barrel tip position and firing direction in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MuzzleSocket {
    pub position: Vec3,
    /// Normalized barrel direction
    pub forward: Vec3,
}

impl MuzzleSocket {
    /// Place the socket for a character.
    ///
    /// # Arguments
    /// * `character_position` - Feet position
    /// * `rotation` - Control rotation; the weapon faces where the player looks
    /// * `offset` - Socket offset in the character frame: x = right, y = up, z = forward
    pub fn from_character(character_position: Vec3, rotation: ControlRotation, offset: Vec3) -> Self {
        let position = character_position
            + rotation.right() * offset.x
            + Vec3::Y * offset.y
            + rotation.planar_forward() * offset.z;
        Self {
            position,
            forward: rotation.forward(),
        }
    }
}
