//! Shooter Configuration
//!
//! Every tunable of the character in one serde document. Missing sections
//! and fields fall back to their defaults, so a config file only needs the
//! values it changes:
//!
//! ```json
//! {
//!   "zoom": { "zoomed_fov": 30.0 },
//!   "weapon": { "muzzle_flash": null }
//! }
//! ```

use std::path::Path;

use glam::Vec3;
use log::info;
use serde::{Deserialize, Serialize};

use crate::aim::{CrosshairConfig, Viewport};
use crate::camera::{BoomConfig, LookConfig, ZoomConfig};
use crate::error::ConfigError;
use crate::hud::HudConfig;
use crate::input::InputMap;
use crate::player::LocomotionConfig;
use crate::weapon::WeaponConfig;

/// All character tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShooterConfig {
    pub locomotion: LocomotionConfig,
    pub look: LookConfig,
    pub zoom: ZoomConfig,
    pub boom: BoomConfig,
    pub crosshair: CrosshairConfig,
    pub weapon: WeaponConfig,
    pub hud: HudConfig,
    pub input: InputMap,
    pub viewport: Viewport,
    /// Flat ground level (cm)
    pub ground_height: f32,
    /// Feet position at spawn
    pub spawn_position: Vec3,
}

impl Default for ShooterConfig {
    fn default() -> Self {
        Self {
            locomotion: LocomotionConfig::default(),
            look: LookConfig::default(),
            zoom: ZoomConfig::default(),
            boom: BoomConfig::default(),
            crosshair: CrosshairConfig::default(),
            weapon: WeaponConfig::default(),
            hud: HudConfig::default(),
            input: InputMap::default(),
            viewport: Viewport::default(),
            ground_height: 0.0,
            spawn_position: Vec3::ZERO,
        }
    }
}

fn require_positive(name: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")))
    }
}

fn require_non_negative(name: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{name} must be non-negative, got {value}")))
    }
}

fn require_fov(name: &str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value < 180.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{name} must be in (0, 180), got {value}")))
    }
}

impl ShooterConfig {
    /// Parse a JSON document and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the config as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        info!("saved config to {}", path.display());
        Ok(())
    }

    /// Reject values the simulation cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let l = &self.locomotion;
        require_positive("locomotion.max_walk_speed", l.max_walk_speed)?;
        require_positive("locomotion.max_acceleration", l.max_acceleration)?;
        require_non_negative("locomotion.braking_deceleration", l.braking_deceleration)?;
        require_non_negative("locomotion.jump_velocity", l.jump_velocity)?;
        require_non_negative("locomotion.gravity", l.gravity)?;
        require_non_negative("locomotion.coyote_time", l.coyote_time)?;
        if !(0.0..=1.0).contains(&l.air_control) {
            return Err(ConfigError::Invalid(format!(
                "locomotion.air_control must be in [0, 1], got {}",
                l.air_control
            )));
        }

        let look = &self.look;
        for (name, v) in [
            ("look.hip_turn_rate", look.hip_turn_rate),
            ("look.hip_look_up_rate", look.hip_look_up_rate),
            ("look.aim_turn_rate", look.aim_turn_rate),
            ("look.aim_look_up_rate", look.aim_look_up_rate),
            ("look.mouse_hip_turn_rate", look.mouse_hip_turn_rate),
            ("look.mouse_hip_look_up_rate", look.mouse_hip_look_up_rate),
            ("look.mouse_aim_turn_rate", look.mouse_aim_turn_rate),
            ("look.mouse_aim_look_up_rate", look.mouse_aim_look_up_rate),
        ] {
            require_positive(name, v)?;
        }

        require_fov("zoom.default_fov", self.zoom.default_fov)?;
        require_fov("zoom.zoomed_fov", self.zoom.zoomed_fov)?;
        require_non_negative("zoom.interp_speed", self.zoom.interp_speed)?;

        require_positive("boom.arm_length", self.boom.arm_length)?;
        require_non_negative("boom.collision.probe_margin", self.boom.collision.probe_margin)?;
        require_non_negative("boom.collision.min_length", self.boom.collision.min_length)?;

        let c = &self.crosshair;
        require_non_negative("crosshair.smoothing_time_constant", c.smoothing_time_constant)?;
        require_non_negative("crosshair.pulse_duration", c.pulse_duration)?;
        if let Some(max) = c.max_spread {
            require_non_negative("crosshair.max_spread", max)?;
        }

        require_positive("weapon.max_range", self.weapon.max_range)?;
        if !self.weapon.muzzle_offset.is_finite() {
            return Err(ConfigError::Invalid("weapon.muzzle_offset is not finite".to_string()));
        }

        require_non_negative("hud.crosshair_spread_max", self.hud.crosshair_spread_max)?;
        require_positive("viewport.width", self.viewport.width)?;
        require_positive("viewport.height", self.viewport.height)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        ShooterConfig::default().validate().unwrap();
    }

    #[test]
    fn test_json_round_trip() {
        let config = ShooterConfig::default();
        let json = config.to_json().unwrap();
        let back = ShooterConfig::from_json_str(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn test_partial_document_uses_defaults() {
        let config = ShooterConfig::from_json_str(
            r#"{ "zoom": { "zoomed_fov": 30.0 }, "weapon": { "muzzle_flash": null } }"#,
        )
        .unwrap();
        assert_eq!(config.zoom.zoomed_fov, 30.0);
        assert_eq!(config.zoom.default_fov, 90.0);
        assert_eq!(config.weapon.muzzle_flash, None);
        assert!(config.weapon.fire_sound.is_some());
        assert_eq!(config.locomotion.max_walk_speed, 600.0);
    }

    #[test]
    fn test_partial_viewport_keeps_default_height() {
        let config = ShooterConfig::from_json_str(r#"{ "viewport": { "width": 800.0 } }"#).unwrap();
        assert_eq!(config.viewport.width, 800.0);
        assert_eq!(config.viewport.height, 1080.0);
        config.validate().unwrap();
    }

    #[test]
    fn test_rejects_invalid_values() {
        let mut config = ShooterConfig::default();
        config.weapon.max_range = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = ShooterConfig::default();
        config.locomotion.air_control = 1.5;
        assert!(config.validate().is_err());

        let mut config = ShooterConfig::default();
        config.zoom.zoomed_fov = 180.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_json_is_json_error() {
        let err = ShooterConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ShooterConfig::load(Path::new("/nonexistent/hipfire.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("hipfire-config-{}", std::process::id()));
        let path = dir.join("shooter.json");
        let mut config = ShooterConfig::default();
        config.look.aim_turn_rate = 15.0;
        config.save(&path).unwrap();
        let loaded = ShooterConfig::load(&path).unwrap();
        assert_eq!(loaded.look.aim_turn_rate, 15.0);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
