//! Screen Deprojection
//!
//! Converts a pixel on the viewport into a world-space ray leaving the
//! camera. The crosshair sits at the viewport center, so firing only ever
//! needs [`deproject_center`], but any pixel can be deprojected.
//!
//! # Conventions
//!
//! - Pixel (0, 0) is the top-left corner, y grows downward
//! - `fov_degrees` is the horizontal field of view
//! - +Y is up and yaw 0 looks toward -Z

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::camera::ControlRotation;
use crate::error::{AimError, ensure_finite};

/// A world-space ray leaving the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRay {
    pub origin: Vec3,
    /// Normalized direction
    pub direction: Vec3,
}

impl CameraRay {
    /// Point at distance `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Viewport dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }

    pub fn validate(&self) -> Result<(), AimError> {
        let ok = |v: f32| v.is_finite() && v > 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(())
        } else {
            Err(AimError::invalid(format!(
                "viewport must be positive, got {}x{}",
                self.width, self.height
            )))
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1920.0, 1080.0)
    }
}

/// Deproject a pixel into a world-space ray.
///
/// # Arguments
/// * `camera_position` - Camera position in world space
/// * `rotation` - Camera orientation (yaw/pitch)
/// * `fov_degrees` - Horizontal field of view, exclusive range (0, 180)
/// * `viewport` - Viewport size in pixels
/// * `screen_point` - Pixel to deproject
///
/// # Errors
/// [`AimError::InvalidArgument`] for a non-positive viewport, an out-of-range
/// field of view or non-finite input.
pub fn deproject(
    camera_position: Vec3,
    rotation: ControlRotation,
    fov_degrees: f32,
    viewport: Viewport,
    screen_point: Vec2,
) -> Result<CameraRay, AimError> {
    viewport.validate()?;
    ensure_finite("camera_position", camera_position)?;
    if !(fov_degrees > 0.0 && fov_degrees < 180.0) {
        return Err(AimError::invalid(format!(
            "field of view must be in (0, 180), got {fov_degrees}"
        )));
    }
    if !screen_point.is_finite() {
        return Err(AimError::invalid("screen point is not finite"));
    }

    // Pixel -> NDC, y flipped so +1 is the top edge
    let ndc_x = screen_point.x / viewport.width * 2.0 - 1.0;
    let ndc_y = 1.0 - screen_point.y / viewport.height * 2.0;

    let tan_half_h = (fov_degrees.to_radians() * 0.5).tan();
    let tan_half_v = tan_half_h / viewport.aspect_ratio();

    let forward = rotation.forward();
    let right = rotation.right();
    let up = right.cross(forward);

    let direction = (forward + right * (ndc_x * tan_half_h) + up * (ndc_y * tan_half_v)).normalize();

    Ok(CameraRay {
        origin: camera_position,
        direction,
    })
}

/// Deproject the viewport center, where the crosshair is drawn.
pub fn deproject_center(
    camera_position: Vec3,
    rotation: ControlRotation,
    fov_degrees: f32,
    viewport: Viewport,
) -> Result<CameraRay, AimError> {
    deproject(camera_position, rotation, fov_degrees, viewport, viewport.center())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level() -> ControlRotation {
        ControlRotation::new(0.0, 0.0)
    }

    #[test]
    fn test_center_ray_matches_forward() {
        let rotation = ControlRotation::new(0.7, -0.3);
        let ray = deproject_center(Vec3::ZERO, rotation, 90.0, Viewport::default()).unwrap();
        assert!((ray.direction - rotation.forward()).length() < 1e-5);
    }

    #[test]
    fn test_ray_is_normalized() {
        let vp = Viewport::default();
        for x in [0.0, 480.0, 960.0, 1440.0, 1920.0] {
            for y in [0.0, 540.0, 1080.0] {
                let ray = deproject(Vec3::ZERO, level(), 90.0, vp, Vec2::new(x, y)).unwrap();
                assert!((ray.direction.length() - 1.0).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn test_right_edge_is_half_fov() {
        let vp = Viewport::default();
        let ray = deproject(Vec3::ZERO, level(), 90.0, vp, Vec2::new(1920.0, 540.0)).unwrap();
        // 90 degree horizontal FOV: the right edge is 45 degrees off forward
        let angle = ray.direction.angle_between(Vec3::NEG_Z).to_degrees();
        assert!((angle - 45.0).abs() < 1e-3);
        assert!(ray.direction.x > 0.0);
    }

    #[test]
    fn test_top_of_screen_points_up() {
        let vp = Viewport::default();
        let ray = deproject(Vec3::ZERO, level(), 90.0, vp, Vec2::new(960.0, 0.0)).unwrap();
        assert!(ray.direction.y > 0.0);
    }

    #[test]
    fn test_invalid_viewport() {
        let result = deproject_center(Vec3::ZERO, level(), 90.0, Viewport::new(0.0, 1080.0));
        assert!(matches!(result, Err(AimError::InvalidArgument(_))));
    }

    #[test]
    fn test_invalid_fov() {
        assert!(deproject_center(Vec3::ZERO, level(), 0.0, Viewport::default()).is_err());
        assert!(deproject_center(Vec3::ZERO, level(), 180.0, Viewport::default()).is_err());
    }

    #[test]
    fn test_ray_at() {
        let ray = CameraRay {
            origin: Vec3::new(1.0, 2.0, 3.0),
            direction: Vec3::NEG_Z,
        };
        assert_eq!(ray.at(10.0), Vec3::new(1.0, 2.0, -7.0));
    }
}
