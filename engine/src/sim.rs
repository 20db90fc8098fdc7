//! Simulation Loop
//!
//! Single-threaded frame driver. One [`Simulation::step`] call:
//!
//! 1. Routes buffered input into action events
//! 2. Dispatches them to the character
//! 3. Fires the weapon if requested (a failed shot is logged and reported,
//!    the frame carries on)
//! 4. Ticks the character
//!
//! The simulation owns the collision world and the effect sink, so the
//! only way to mutate them mid-frame is through `&mut Simulation`.

use log::{debug, warn};

use crate::character::{AnimationProperties, ShooterCharacter};
use crate::config::ShooterConfig;
use crate::error::AimError;
use crate::hud::{CrosshairLayout, CrosshairUniforms, HudConfig};
use crate::input::ActionRouter;
use crate::interp::sanitize_dt;
use crate::physics::SegmentTrace;
use crate::weapon::{ShotReport, WeaponEffects};

/// Outcome of one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// Frame counter, starting at 1
    pub frame: u64,
    pub spread: f32,
    /// Camera FOV after this frame (degrees)
    pub fov: f32,
    /// Shot fired this frame, if any
    pub shot: Option<ShotReport>,
    /// Why a requested shot did not fire
    pub fire_error: Option<AimError>,
    pub crosshair: CrosshairLayout,
    /// Crosshair shader block for this frame's layout and viewport
    pub uniforms: CrosshairUniforms,
    pub animation: AnimationProperties,
}

/// Owns one character, its world, its effect sink and its input router.
pub struct Simulation<W, E> {
    character: ShooterCharacter,
    world: W,
    effects: E,
    router: ActionRouter,
    hud: HudConfig,
    frame: u64,
}

impl<W, E> Simulation<W, E>
where
    W: SegmentTrace,
    E: WeaponEffects,
{
    pub fn new(config: &ShooterConfig, world: W, effects: E) -> Self {
        Self {
            character: ShooterCharacter::new(config),
            world,
            effects,
            router: ActionRouter::new(config.input.clone()),
            hud: config.hud,
            frame: 0,
        }
    }

    pub fn character(&self) -> &ShooterCharacter {
        &self.character
    }

    pub fn character_mut(&mut self) -> &mut ShooterCharacter {
        &mut self.character
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    pub fn effects(&self) -> &E {
        &self.effects
    }

    pub fn effects_mut(&mut self) -> &mut E {
        &mut self.effects
    }

    /// Raw input goes here between frames.
    pub fn router_mut(&mut self) -> &mut ActionRouter {
        &mut self.router
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Advance one frame of `dt` seconds.
    pub fn step(&mut self, dt: f32) -> FrameReport {
        self.frame += 1;
        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            warn!("frame {}: bad frame time {dt}, treating as 0", self.frame);
            sanitize_dt(dt)
        };

        for event in self.router.route() {
            self.character.handle_action(&event, dt);
        }

        let mut shot = None;
        let mut fire_error = None;
        if self.character.fire_requested() {
            match self.character.fire_weapon(&self.world, &mut self.effects) {
                Ok(report) => shot = Some(report),
                Err(e) => {
                    warn!("frame {}: shot dropped: {e}", self.frame);
                    fire_error = Some(e);
                }
            }
        }

        let spread = self.character.tick(dt, &self.world);
        if shot.is_some() {
            debug!("frame {}: fired, spread {spread:.3}", self.frame);
        }

        let crosshair = CrosshairLayout::from_spread(spread, self.hud.crosshair_spread_max);
        let uniforms = CrosshairUniforms::new(&crosshair, self.character.viewport(), self.hud.arm_length);

        FrameReport {
            frame: self.frame,
            spread,
            fov: self.character.fov(),
            shot,
            fire_error,
            crosshair,
            uniforms,
            animation: *self.character.animation(),
        }
    }
}
