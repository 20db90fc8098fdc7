//! Hit-Scan Fire Sequence
//!
//! One trigger pull, in order:
//!
//! 1. Fire sound at the muzzle
//! 2. Muzzle flash at the socket
//! 3. Deproject the crosshair and resolve the beam end
//! 4. Impact particles at the beam end, beam from the socket to the end
//! 5. Hip-fire montage section
//!
//! Every asset is optional; a missing asset skips only its own effect.
//! If resolution fails, the effects from steps 1 and 2 have already played
//! and the error is returned without spawning the rest.

use glam::Vec3;
use log::debug;
use serde::{Deserialize, Serialize};

use super::{MuzzleSocket, WeaponEffects};
use crate::aim::{AimQuery, AimResult, Viewport, deproject_center, resolve};
use crate::camera::ControlRotation;
use crate::error::AimError;
use crate::physics::SegmentTrace;

/// Montage section played on every shot.
pub const DEFAULT_FIRE_SECTION: &str = "StartFire";

/// Weapon tunables and effect assets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponConfig {
    pub fire_sound: Option<String>,
    pub muzzle_flash: Option<String>,
    pub impact_particles: Option<String>,
    pub beam_particles: Option<String>,
    pub hip_fire_montage: Option<String>,
    /// Section of `hip_fire_montage` to jump to
    pub fire_section: String,
    /// Trace length for both resolution stages (cm)
    pub max_range: f32,
    /// Socket offset from the feet: x = right, y = up, z = forward (cm)
    pub muzzle_offset: Vec3,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            fire_sound: Some("sfx/rifle_shot".to_string()),
            muzzle_flash: Some("fx/muzzle_flash".to_string()),
            impact_particles: Some("fx/impact".to_string()),
            beam_particles: Some("fx/smoke_beam".to_string()),
            hip_fire_montage: Some("anim/hip_fire".to_string()),
            fire_section: DEFAULT_FIRE_SECTION.to_string(),
            max_range: 50_000.0,
            muzzle_offset: Vec3::new(20.0, 130.0, 60.0),
        }
    }
}

impl WeaponConfig {
    /// A weapon with every asset missing.
    pub fn silent() -> Self {
        Self {
            fire_sound: None,
            muzzle_flash: None,
            impact_particles: None,
            beam_particles: None,
            hip_fire_montage: None,
            ..Self::default()
        }
    }
}

/// View state the shot is aimed from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireContext {
    pub camera_position: Vec3,
    pub rotation: ControlRotation,
    /// Current horizontal FOV (degrees)
    pub fov_degrees: f32,
    pub viewport: Viewport,
    pub muzzle: MuzzleSocket,
}

/// What a shot did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotReport {
    pub muzzle: MuzzleSocket,
    pub beam_end_point: Vec3,
    pub blocked: bool,
}

/// Run the fire sequence against `world`, reporting presentation to `effects`.
///
/// # Errors
/// Deprojection and resolution errors ([`AimError`]) are returned unchanged.
pub fn fire<T, E>(
    config: &WeaponConfig,
    ctx: &FireContext,
    world: &T,
    effects: &mut E,
) -> Result<ShotReport, AimError>
where
    T: SegmentTrace + ?Sized,
    E: WeaponEffects + ?Sized,
{
    let muzzle = ctx.muzzle;

    if let Some(sound) = &config.fire_sound {
        effects.play_sound(sound, muzzle.position);
    }
    if let Some(flash) = &config.muzzle_flash {
        effects.spawn_muzzle_flash(flash, &muzzle);
    }

    let ray = deproject_center(ctx.camera_position, ctx.rotation, ctx.fov_degrees, ctx.viewport)?;
    let query = AimQuery {
        viewport_width: ctx.viewport.width,
        viewport_height: ctx.viewport.height,
        camera_world_position: ray.origin,
        camera_world_direction: ray.direction,
        muzzle_world_position: muzzle.position,
        max_range: config.max_range,
    };
    let AimResult {
        beam_end_point,
        blocked,
    } = resolve(&query, world)?;

    if let Some(impact) = &config.impact_particles {
        effects.spawn_impact(impact, beam_end_point);
    }
    if let Some(beam) = &config.beam_particles {
        effects.spawn_beam(beam, muzzle.position, beam_end_point);
    }
    if let Some(montage) = &config.hip_fire_montage {
        effects.play_montage_section(montage, &config.fire_section);
    }

    debug!("shot from {} ended at {beam_end_point} (blocked: {blocked})", muzzle.position);

    Ok(ShotReport {
        muzzle,
        beam_end_point,
        blocked,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{Aabb, BoxWorld};
    use crate::weapon::{EffectEvent, EffectLog};

    fn context() -> FireContext {
        let rotation = ControlRotation::default();
        FireContext {
            camera_position: Vec3::new(0.0, 160.0, 300.0),
            rotation,
            fov_degrees: 90.0,
            viewport: Viewport::default(),
            muzzle: MuzzleSocket::from_character(Vec3::ZERO, rotation, Vec3::new(20.0, 130.0, 60.0)),
        }
    }

    #[test]
    fn test_full_sequence_order() {
        let mut log = EffectLog::new();
        let report = fire(&WeaponConfig::default(), &context(), &BoxWorld::new(), &mut log).unwrap();

        let kinds: Vec<_> = log.events().iter().map(EffectEvent::kind).collect();
        assert_eq!(kinds, vec!["sound", "muzzle_flash", "impact", "beam", "montage"]);
        assert!(!report.blocked);
        assert!((report.beam_end_point.z - (300.0 - 50_000.0)).abs() < 1e-2);

        match &log.events()[4] {
            EffectEvent::Montage { section, .. } => assert_eq!(section, "StartFire"),
            other => panic!("unexpected {other:?}"),
        }
        match &log.events()[3] {
            EffectEvent::Beam { start, end, .. } => {
                assert_eq!(*start, report.muzzle.position);
                assert_eq!(*end, report.beam_end_point);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_missing_assets_skip_only_their_effect() {
        let config = WeaponConfig {
            muzzle_flash: None,
            beam_particles: None,
            ..WeaponConfig::default()
        };
        let mut log = EffectLog::new();
        fire(&config, &context(), &BoxWorld::new(), &mut log).unwrap();
        let kinds: Vec<_> = log.events().iter().map(EffectEvent::kind).collect();
        assert_eq!(kinds, vec!["sound", "impact", "montage"]);
    }

    #[test]
    fn test_silent_weapon_still_resolves() {
        let mut log = EffectLog::new();
        let report = fire(&WeaponConfig::silent(), &context(), &BoxWorld::new(), &mut log).unwrap();
        assert!(log.is_empty());
        assert!(report.beam_end_point.is_finite());
    }

    #[test]
    fn test_impact_on_wall() {
        let mut world = BoxWorld::new();
        world.add_box(
            "wall",
            Aabb::new(Vec3::new(-1000.0, -1000.0, -1010.0), Vec3::new(1000.0, 1000.0, -1000.0)),
        );
        let mut log = EffectLog::new();
        let report = fire(&WeaponConfig::default(), &context(), &world, &mut log).unwrap();
        assert!(report.blocked);
        assert!((report.beam_end_point.z - -1000.0).abs() < 1e-2);
    }

    #[test]
    fn test_unloaded_world_plays_only_muzzle_effects() {
        let mut log = EffectLog::new();
        let result = fire(&WeaponConfig::default(), &context(), &BoxWorld::unloaded(), &mut log);
        assert!(matches!(result, Err(AimError::Unavailable(_))));
        let kinds: Vec<_> = log.events().iter().map(EffectEvent::kind).collect();
        assert_eq!(kinds, vec!["sound", "muzzle_flash"]);
    }
}
