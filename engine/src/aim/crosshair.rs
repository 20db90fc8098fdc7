//! Crosshair Spread Estimator
//!
//! Turns movement, aim and fire state into a single spread multiplier the
//! HUD scales the crosshair arms by. Four sub-factors are summed on top of a
//! 0.5 base every frame:
//!
//! | Factor   | Source                        | Range        | Behaviour               |
//! |----------|-------------------------------|--------------|-------------------------|
//! | velocity | planar speed / max speed      | [0, 1]       | instantaneous           |
//! | air      | airborne                      | [0, 0.25]    | exponential smoothing   |
//! | aim      | aiming                        | [-0.6, 0]    | exponential smoothing   |
//! | shooting | fire pulse                    | [0, 0.3]     | linear decay over 0.05s |
//!
//! Smoothing is frame-rate independent, so splitting a span of time into
//! more or fewer frames does not change the result.

use serde::{Deserialize, Serialize};

use crate::interp::{approach_linear, exp_approach, sanitize_dt};

/// Spread with no movement, no aim and no recent shot.
pub const BASE_SPREAD: f32 = 0.5;

/// Per-frame inputs to the estimator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementState {
    /// Horizontal speed (non-negative)
    pub planar_speed: f32,
    /// Speed at which the velocity factor saturates (positive)
    pub max_planar_speed: f32,
    /// Character is falling or jumping
    pub is_airborne: bool,
    /// Aim button is held
    pub is_aiming: bool,
    /// Externally supplied fire pulse in [0, 1]; 1 on the frame of a shot
    pub just_fired_pulse: f32,
}

impl Default for MovementState {
    fn default() -> Self {
        Self {
            planar_speed: 0.0,
            max_planar_speed: 600.0,
            is_airborne: false,
            is_aiming: false,
            just_fired_pulse: 0.0,
        }
    }
}

/// Tunables for the estimator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrosshairConfig {
    /// Air factor target while airborne
    pub air_target: f32,
    /// Aim factor target while aiming (negative narrows the spread)
    pub aim_target: f32,
    /// Time constant of the air/aim smoothing, seconds
    pub smoothing_time_constant: f32,
    /// Shooting factor immediately after a shot
    pub pulse_height: f32,
    /// Time for the shooting factor to decay back to zero, seconds
    pub pulse_duration: f32,
    /// Optional ceiling on the final multiplier
    pub max_spread: Option<f32>,
}

impl Default for CrosshairConfig {
    fn default() -> Self {
        Self {
            air_target: 0.25,
            aim_target: -0.6,
            smoothing_time_constant: 0.25,
            pulse_height: 0.3,
            pulse_duration: 0.05,
            max_spread: Some(3.0),
        }
    }
}

/// The four sub-factors as of the last update, for debug overlays and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpreadFactors {
    pub velocity: f32,
    pub air: f32,
    pub aim: f32,
    pub shooting: f32,
}

impl SpreadFactors {
    pub fn sum(&self) -> f32 {
        self.velocity + self.air + self.aim + self.shooting
    }
}

/// Stateful spread estimator. Call [`CrosshairSpreadEstimator::update`] once per frame.
///
/// Owns the smoothed air/aim factors and the decaying fire pulse; only the
/// frame that advances time mutates them.
#[derive(Debug, Clone)]
pub struct CrosshairSpreadEstimator {
    config: CrosshairConfig,
    factors: SpreadFactors,
    /// Normalized fire pulse in [0, 1]
    pulse: f32,
    spread: f32,
}

impl Default for CrosshairSpreadEstimator {
    fn default() -> Self {
        Self::new(CrosshairConfig::default())
    }
}

impl CrosshairSpreadEstimator {
    pub fn new(config: CrosshairConfig) -> Self {
        Self {
            config,
            factors: SpreadFactors::default(),
            pulse: 0.0,
            spread: BASE_SPREAD,
        }
    }

    pub fn config(&self) -> &CrosshairConfig {
        &self.config
    }

    /// Sub-factors as of the last update.
    pub fn factors(&self) -> SpreadFactors {
        self.factors
    }

    /// Spread returned by the last update.
    pub fn spread(&self) -> f32 {
        self.spread
    }

    /// Current normalized fire pulse in [0, 1].
    pub fn pulse(&self) -> f32 {
        self.pulse
    }

    /// Record a fire event. The pulse starts decaying from 1 on the next update,
    /// so an update with `dt = 0` reports the full pulse height.
    pub fn register_shot(&mut self) {
        self.pulse = 1.0;
    }

    /// Advance the estimator by `dt` seconds and return the new spread.
    pub fn update(&mut self, state: &MovementState, dt: f32) -> f32 {
        let dt = sanitize_dt(dt);
        let cfg = self.config;

        self.decay_pulse(dt);
        // A pulse handed in by the caller is a shot fired at the end of this frame
        let external = state.just_fired_pulse.clamp(0.0, 1.0);
        if external > self.pulse {
            self.pulse = external;
        }

        self.factors.velocity = velocity_factor(state.planar_speed, state.max_planar_speed);

        let air_target = if state.is_airborne { cfg.air_target } else { 0.0 };
        self.factors.air = exp_approach(self.factors.air, air_target, dt, cfg.smoothing_time_constant);

        let aim_target = if state.is_aiming { cfg.aim_target } else { 0.0 };
        self.factors.aim = exp_approach(self.factors.aim, aim_target, dt, cfg.smoothing_time_constant);

        self.factors.shooting = cfg.pulse_height * self.pulse;

        let raw = BASE_SPREAD + self.factors.sum();
        self.spread = match cfg.max_spread {
            Some(ceiling) => raw.clamp(0.0, ceiling.max(0.0)),
            None => raw.max(0.0),
        };
        self.spread
    }

    /// Linear decay: a full pulse reaches zero after `pulse_duration` seconds.
    fn decay_pulse(&mut self, dt: f32) {
        if self.config.pulse_duration <= 0.0 {
            if dt > 0.0 {
                self.pulse = 0.0;
            }
            return;
        }
        self.pulse = approach_linear(self.pulse, 0.0, dt / self.config.pulse_duration);
    }

    /// Clear all smoothed state back to rest.
    pub fn reset(&mut self) {
        self.factors = SpreadFactors::default();
        self.pulse = 0.0;
        self.spread = BASE_SPREAD;
    }
}

/// `clamp(speed / max_speed, 0, 1)`; zero for a non-positive max speed.
pub fn velocity_factor(planar_speed: f32, max_planar_speed: f32) -> f32 {
    if !(max_planar_speed > 0.0) || !planar_speed.is_finite() {
        return 0.0;
    }
    (planar_speed / max_planar_speed).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_spread_is_base() {
        let mut est = CrosshairSpreadEstimator::default();
        let spread = est.update(&MovementState::default(), 0.016);
        assert!((spread - BASE_SPREAD).abs() < 1e-6);
    }

    #[test]
    fn test_velocity_factor_clamped() {
        assert_eq!(velocity_factor(300.0, 600.0), 0.5);
        assert_eq!(velocity_factor(900.0, 600.0), 1.0);
        assert_eq!(velocity_factor(-5.0, 600.0), 0.0);
        assert_eq!(velocity_factor(100.0, 0.0), 0.0);
    }

    #[test]
    fn test_shot_pulse_visible_on_first_frame() {
        let mut est = CrosshairSpreadEstimator::default();
        est.register_shot();
        est.update(&MovementState::default(), 0.0);
        assert!((est.factors().shooting - 0.3).abs() < 1e-6);
        est.update(&MovementState::default(), 0.01);
        assert!((est.factors().shooting - 0.24).abs() < 1e-5);
    }

    #[test]
    fn test_pulse_decays_linearly() {
        let mut est = CrosshairSpreadEstimator::default();
        est.register_shot();
        est.update(&MovementState::default(), 0.025);
        // Half the duration has elapsed
        assert!((est.pulse() - 0.5).abs() < 1e-5);
        est.update(&MovementState::default(), 0.025);
        assert!(est.pulse().abs() < 1e-6);
    }

    #[test]
    fn test_external_pulse_is_a_shot() {
        let mut est = CrosshairSpreadEstimator::default();
        let state = MovementState {
            just_fired_pulse: 1.0,
            ..Default::default()
        };
        est.update(&state, 0.01);
        assert!((est.factors().shooting - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_ceiling_applies() {
        let config = CrosshairConfig {
            max_spread: Some(0.8),
            ..Default::default()
        };
        let mut est = CrosshairSpreadEstimator::new(config);
        let state = MovementState {
            planar_speed: 600.0,
            ..Default::default()
        };
        assert!((est.update(&state, 0.016) - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_no_ceiling() {
        let config = CrosshairConfig {
            max_spread: None,
            air_target: 5.0,
            smoothing_time_constant: 0.0,
            ..Default::default()
        };
        let mut est = CrosshairSpreadEstimator::new(config);
        let state = MovementState {
            is_airborne: true,
            ..Default::default()
        };
        assert!((est.update(&state, 0.016) - 5.5).abs() < 1e-5);
    }

    #[test]
    fn test_reset() {
        let mut est = CrosshairSpreadEstimator::default();
        est.register_shot();
        est.update(&MovementState { is_aiming: true, ..Default::default() }, 0.1);
        est.reset();
        assert_eq!(est.factors(), SpreadFactors::default());
        assert_eq!(est.spread(), BASE_SPREAD);
    }
}
