//! Crosshair HUD
//!
//! Converts the spread multiplier into pixel offsets for the four crosshair
//! arms, plus a GPU-ready uniform block for a crosshair shader.
//!
//! Layout around the viewport center (pixels, +y down):
//!
//! ```text
//!            top (-y)
//!               |
//!   left (-x) --+-- right (+x)
//!               |
//!          bottom (+y)
//! ```

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::aim::Viewport;

/// HUD tunables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HudConfig {
    /// Arm offset at a spread of 1.0 (pixels)
    pub crosshair_spread_max: f32,
    /// Arm length in pixels
    pub arm_length: f32,
}

impl Default for HudConfig {
    fn default() -> Self {
        Self {
            crosshair_spread_max: 16.0,
            arm_length: 8.0,
        }
    }
}

/// Signed pixel offsets of each crosshair arm from the screen center.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CrosshairLayout {
    pub left: Vec2,
    pub right: Vec2,
    pub top: Vec2,
    pub bottom: Vec2,
}

impl CrosshairLayout {
    /// Offsets for a spread multiplier.
    ///
    /// # Arguments
    /// * `spread` - Multiplier from the crosshair estimator (negative treated as 0)
    /// * `max_spread_px` - Pixel offset at a multiplier of 1.0
    pub fn from_spread(spread: f32, max_spread_px: f32) -> Self {
        let d = spread.max(0.0) * max_spread_px;
        Self {
            left: Vec2::new(-d, 0.0),
            right: Vec2::new(d, 0.0),
            top: Vec2::new(0.0, -d),
            bottom: Vec2::new(0.0, d),
        }
    }

    /// Absolute pixel positions `[left, right, top, bottom]` on a viewport.
    pub fn positions(&self, viewport: Viewport) -> [Vec2; 4] {
        let c = viewport.center();
        [c + self.left, c + self.right, c + self.top, c + self.bottom]
    }

    /// Distance of each arm from the center.
    pub fn radius(&self) -> f32 {
        self.right.x
    }
}

/// Crosshair uniform block - must match the WGSL `CrosshairUniforms` struct.
///
/// Layout (16 bytes):
///   offset 0:  center (vec2<f32>)  = 8 bytes
///   offset 8:  radius (f32)        = 4 bytes
///   offset 12: arm_length (f32)    = 4 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CrosshairUniforms {
    pub center: [f32; 2],
    pub radius: f32,
    pub arm_length: f32,
}

static_assertions::assert_eq_size!(CrosshairUniforms, [u8; 16]);

impl CrosshairUniforms {
    pub fn new(layout: &CrosshairLayout, viewport: Viewport, arm_length: f32) -> Self {
        let c = viewport.center();
        Self {
            center: [c.x, c.y],
            radius: layout.radius(),
            arm_length,
        }
    }

    /// Raw bytes for a uniform buffer upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}
