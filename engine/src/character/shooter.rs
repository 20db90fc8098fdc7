//! Shooter Character
//!
//! Aggregate of everything one player character owns: control rotation,
//! locomotion, camera boom and zoom, crosshair estimator and weapon. Input
//! arrives as routed [`ActionEvent`]s; [`ShooterCharacter::tick`] advances
//! the simulation state once per frame.
//!
//! Frame order (driven by the simulation loop):
//!
//! 1. `handle_action` for each routed event
//! 2. `fire_weapon` if a shot was requested
//! 3. `tick`

use glam::Vec3;
use log::debug;

use super::AnimationProperties;
use crate::aim::{CrosshairSpreadEstimator, MovementState, Viewport};
use crate::camera::{CameraBoom, CameraZoom, ControlRotation, LookConfig};
use crate::config::ShooterConfig;
use crate::error::AimError;
use crate::input::{ActionEvent, InputAction, TriggerEvent};
use crate::interp::sanitize_dt;
use crate::physics::SegmentTrace;
use crate::player::{MovementInput, PlayerMovementController};
use crate::weapon::{FireContext, MuzzleSocket, ShotReport, WeaponConfig, WeaponEffects, fire};

/// A third-person shooter character.
#[derive(Debug, Clone)]
pub struct ShooterCharacter {
    rotation: ControlRotation,
    movement: PlayerMovementController,
    look: LookConfig,
    boom: CameraBoom,
    zoom: CameraZoom,
    estimator: CrosshairSpreadEstimator,
    weapon: WeaponConfig,
    viewport: Viewport,
    ground_height: f32,

    aiming: bool,
    /// Axis input gathered since the last tick
    move_input: MovementInput,
    fire_requested: bool,
    /// A shot resolved since the last tick
    fired_since_tick: bool,
    last_shot: Option<ShotReport>,
    anim: AnimationProperties,
}

impl Default for ShooterCharacter {
    fn default() -> Self {
        Self::new(&ShooterConfig::default())
    }
}

impl ShooterCharacter {
    pub fn new(config: &ShooterConfig) -> Self {
        let estimator = CrosshairSpreadEstimator::new(config.crosshair);
        let anim = AnimationProperties {
            crosshair_spread: estimator.spread(),
            ..Default::default()
        };
        Self {
            rotation: ControlRotation::default(),
            movement: PlayerMovementController::with_position(config.locomotion, config.spawn_position),
            look: config.look,
            boom: CameraBoom::new(config.boom),
            zoom: CameraZoom::new(config.zoom),
            estimator,
            weapon: config.weapon.clone(),
            viewport: config.viewport,
            ground_height: config.ground_height,
            aiming: false,
            move_input: MovementInput::default(),
            fire_requested: false,
            fired_since_tick: false,
            last_shot: None,
            anim,
        }
    }

    // --- Accessors ---

    pub fn position(&self) -> Vec3 {
        self.movement.position()
    }

    pub fn rotation(&self) -> ControlRotation {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: ControlRotation) {
        self.rotation = rotation;
    }

    pub fn movement(&self) -> &PlayerMovementController {
        &self.movement
    }

    pub fn is_aiming(&self) -> bool {
        self.aiming
    }

    pub fn set_aiming(&mut self, aiming: bool) {
        self.aiming = aiming;
    }

    pub fn fov(&self) -> f32 {
        self.zoom.fov()
    }

    pub fn camera_position(&self) -> Vec3 {
        self.boom.camera_position()
    }

    pub fn boom(&self) -> &CameraBoom {
        &self.boom
    }

    pub fn crosshair_spread(&self) -> f32 {
        self.estimator.spread()
    }

    pub fn estimator(&self) -> &CrosshairSpreadEstimator {
        &self.estimator
    }

    pub fn animation(&self) -> &AnimationProperties {
        &self.anim
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn weapon(&self) -> &WeaponConfig {
        &self.weapon
    }

    pub fn last_shot(&self) -> Option<&ShotReport> {
        self.last_shot.as_ref()
    }

    /// Whether a `Fire` action is waiting for [`ShooterCharacter::fire_weapon`].
    pub fn fire_requested(&self) -> bool {
        self.fire_requested
    }

    /// Barrel socket for the current position and aim.
    pub fn muzzle_socket(&self) -> MuzzleSocket {
        MuzzleSocket::from_character(
            self.movement.position(),
            self.rotation,
            self.weapon.muzzle_offset,
        )
    }

    // --- Input ---

    /// Apply one routed action.
    ///
    /// # Arguments
    /// * `event` - Routed action for this frame
    /// * `dt` - Frame delta, used by the at-rate look actions
    pub fn handle_action(&mut self, event: &ActionEvent, dt: f32) {
        let dt = sanitize_dt(dt);
        let rates = self.look.rates(self.aiming);
        match (event.action, event.trigger) {
            (InputAction::MoveForward, TriggerEvent::Triggered) => self.move_input.forward += event.value,
            (InputAction::MoveRight, TriggerEvent::Triggered) => self.move_input.right += event.value,
            (InputAction::TurnAtRate, TriggerEvent::Triggered) => {
                self.rotation.turn_at_rate(event.value, &rates, dt)
            }
            (InputAction::LookUpAtRate, TriggerEvent::Triggered) => {
                self.rotation.look_up_at_rate(event.value, &rates, dt)
            }
            (InputAction::Turn, TriggerEvent::Triggered) => self.rotation.turn(event.value, &rates),
            (InputAction::LookUp, TriggerEvent::Triggered) => self.rotation.look_up(event.value, &rates),
            (InputAction::Jump, TriggerEvent::Started) => {
                if self.movement.jump() {
                    debug!("jump from {}", self.movement.position());
                }
            }
            (InputAction::Fire, TriggerEvent::Started) => self.fire_requested = true,
            (InputAction::Aim, TriggerEvent::Started) => self.aiming = true,
            (InputAction::Aim, TriggerEvent::Completed) => self.aiming = false,
            _ => {}
        }
    }

    // --- Firing ---

    /// Fire one shot from the current camera and muzzle.
    ///
    /// Clears any pending fire request. On success the crosshair pulse is
    /// raised on the next tick.
    pub fn fire_weapon<T, E>(&mut self, world: &T, effects: &mut E) -> Result<ShotReport, AimError>
    where
        T: SegmentTrace + ?Sized,
        E: WeaponEffects + ?Sized,
    {
        self.fire_requested = false;

        let camera_position = self.boom.update(self.movement.position(), self.rotation, world);
        let ctx = FireContext {
            camera_position,
            rotation: self.rotation,
            fov_degrees: self.zoom.fov(),
            viewport: self.viewport,
            muzzle: self.muzzle_socket(),
        };

        let report = fire(&self.weapon, &ctx, world, effects)?;
        self.fired_since_tick = true;
        self.last_shot = Some(report);
        Ok(report)
    }

    // --- Simulation ---

    /// Advance locomotion, camera, zoom, crosshair and animation by `dt`.
    ///
    /// # Returns
    /// The crosshair spread for this frame
    pub fn tick<T: SegmentTrace + ?Sized>(&mut self, dt: f32, world: &T) -> f32 {
        let dt = sanitize_dt(dt);
        let input = self.move_input;
        self.move_input = MovementInput::default();

        self.movement.tick(dt, &input, self.rotation.yaw, self.ground_height);
        self.zoom.update(self.aiming, dt);
        self.boom.update(self.movement.position(), self.rotation, world);

        let state = MovementState {
            planar_speed: self.movement.planar_speed(),
            max_planar_speed: self.movement.config().max_walk_speed,
            is_airborne: self.movement.is_airborne(),
            is_aiming: self.aiming,
            just_fired_pulse: if self.fired_since_tick { 1.0 } else { 0.0 },
        };
        self.fired_since_tick = false;
        let spread = self.estimator.update(&state, dt);

        self.anim
            .update(&self.movement, self.aiming, self.rotation.yaw_degrees(), spread);
        spread
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::BoxWorld;
    use crate::weapon::EffectLog;

    fn event(action: InputAction, trigger: TriggerEvent, value: f32) -> ActionEvent {
        ActionEvent::new(action, trigger, value)
    }

    #[test]
    fn test_aim_toggles_on_start_and_complete() {
        let mut character = ShooterCharacter::default();
        character.handle_action(&event(InputAction::Aim, TriggerEvent::Started, 1.0), 0.016);
        assert!(character.is_aiming());
        character.handle_action(&event(InputAction::Aim, TriggerEvent::Triggered, 1.0), 0.016);
        assert!(character.is_aiming());
        character.handle_action(&event(InputAction::Aim, TriggerEvent::Completed, 0.0), 0.016);
        assert!(!character.is_aiming());
    }

    #[test]
    fn test_mouse_turn_uses_aim_scale() {
        let mut character = ShooterCharacter::default();
        character.set_aiming(true);
        character.handle_action(&event(InputAction::Turn, TriggerEvent::Triggered, 10.0), 0.016);
        assert!((character.rotation().yaw.to_degrees() - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_move_input_consumed_by_tick() {
        let world = BoxWorld::new();
        let mut character = ShooterCharacter::default();
        character.handle_action(&event(InputAction::MoveForward, TriggerEvent::Triggered, 1.0), 0.016);
        character.tick(0.016, &world);
        let speed = character.movement().planar_speed();
        assert!(speed > 0.0);

        // No input on the next frame: braking, not accelerating
        character.tick(0.016, &world);
        assert!(character.movement().planar_speed() < speed);
        assert!(!character.animation().is_accelerating);
    }

    #[test]
    fn test_fire_request_and_pulse() {
        let world = BoxWorld::new();
        let mut effects = EffectLog::new();
        let mut character = ShooterCharacter::default();

        character.handle_action(&event(InputAction::Fire, TriggerEvent::Started, 1.0), 0.016);
        assert!(character.fire_requested());
        character.fire_weapon(&world, &mut effects).unwrap();
        assert!(!character.fire_requested());
        assert!(character.last_shot().is_some());

        character.tick(0.016, &world);
        assert!((character.estimator().factors().shooting - 0.3).abs() < 1e-6);
        character.tick(0.05, &world);
        assert!(character.estimator().factors().shooting.abs() < 1e-6);
    }

    #[test]
    fn test_failed_fire_has_no_pulse() {
        let world = BoxWorld::unloaded();
        let mut effects = EffectLog::new();
        let mut character = ShooterCharacter::default();
        assert!(character.fire_weapon(&world, &mut effects).is_err());
        character.tick(0.016, &world);
        assert_eq!(character.estimator().factors().shooting, 0.0);
    }

    #[test]
    fn test_jump_marks_in_air() {
        let world = BoxWorld::new();
        let mut character = ShooterCharacter::default();
        character.handle_action(&event(InputAction::Jump, TriggerEvent::Started, 1.0), 0.016);
        character.tick(0.016, &world);
        assert!(character.animation().is_in_air);
        assert!(character.position().y > 0.0);
    }

    #[test]
    fn test_zoom_follows_aim() {
        let world = BoxWorld::new();
        let mut character = ShooterCharacter::default();
        character.set_aiming(true);
        for _ in 0..60 {
            character.tick(1.0 / 60.0, &world);
        }
        assert!((character.fov() - 35.0).abs() < 0.01);
        assert!(character.crosshair_spread() < 0.5);
    }
}
