//! Aim Zoom
//!
//! Field-of-view interpolation between the hip-fire FOV and the narrower
//! aiming FOV.

use serde::{Deserialize, Serialize};

use crate::interp::exp_approach_rate;

/// Zoom tunables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    /// Horizontal FOV when not aiming (degrees)
    pub default_fov: f32,
    /// Horizontal FOV when aiming (degrees)
    pub zoomed_fov: f32,
    /// Interpolation rate (1/s); higher snaps faster
    pub interp_speed: f32,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            default_fov: 90.0,
            zoomed_fov: 35.0,
            interp_speed: 20.0,
        }
    }
}

/// Current FOV that eases toward the aim or hip target.
#[derive(Debug, Clone, Copy)]
pub struct CameraZoom {
    config: ZoomConfig,
    current_fov: f32,
}

impl Default for CameraZoom {
    fn default() -> Self {
        Self::new(ZoomConfig::default())
    }
}

impl CameraZoom {
    pub fn new(config: ZoomConfig) -> Self {
        Self {
            config,
            current_fov: config.default_fov,
        }
    }

    pub fn fov(&self) -> f32 {
        self.current_fov
    }

    pub fn config(&self) -> &ZoomConfig {
        &self.config
    }

    /// FOV the zoom is heading toward.
    pub fn target_fov(&self, aiming: bool) -> f32 {
        if aiming {
            self.config.zoomed_fov
        } else {
            self.config.default_fov
        }
    }

    /// Ease toward the target FOV and return the new value.
    pub fn update(&mut self, aiming: bool, dt: f32) -> f32 {
        let target = self.target_fov(aiming);
        self.current_fov = exp_approach_rate(self.current_fov, target, dt, self.config.interp_speed);
        self.current_fov
    }

    /// Jump straight to the target without easing.
    pub fn snap(&mut self, aiming: bool) {
        self.current_fov = self.target_fov(aiming);
    }
}
