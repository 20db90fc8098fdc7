//! Interpolation Helpers
//!
//! Frame-rate-independent smoothing used by the crosshair estimator and the
//! camera zoom. Exponential approach gives the same result whether a span of
//! time is advanced in one step or many:
//!
//! ```text
//! current += (target - current) * (1 - exp(-dt / time_constant))
//! ```

/// Exponentially approach `target` with the given time constant (seconds).
///
/// A non-positive time constant snaps straight to the target.
/// A `dt` that is not positive and finite leaves `current` untouched.
#[inline]
pub fn exp_approach(current: f32, target: f32, dt: f32, time_constant: f32) -> f32 {
    if !(dt > 0.0 && dt.is_finite()) {
        return current;
    }
    if time_constant <= 0.0 {
        return target;
    }
    let alpha = 1.0 - (-dt / time_constant).exp();
    current + (target - current) * alpha
}

/// Exponentially approach `target` at `rate` (1/seconds).
///
/// Same as [`exp_approach`] with `time_constant = 1 / rate`.
#[inline]
pub fn exp_approach_rate(current: f32, target: f32, dt: f32, rate: f32) -> f32 {
    if rate <= 0.0 {
        return if dt > 0.0 && dt.is_finite() { target } else { current };
    }
    exp_approach(current, target, dt, 1.0 / rate)
}

/// Frame time usable by the integrators: NaN and infinities become 0,
/// negative values clamp to 0.
#[inline]
pub fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() { dt.max(0.0) } else { 0.0 }
}

/// Move `current` toward `target` by at most `max_step`.
#[inline]
pub fn approach_linear(current: f32, target: f32, max_step: f32) -> f32 {
    let diff = target - current;
    if diff.abs() <= max_step {
        target
    } else {
        current + max_step.copysign(diff)
    }
}

/// Wrap an angle in degrees into (-180, 180].
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = (angle + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 { 180.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_dt_is_identity() {
        assert_eq!(exp_approach(0.3, 1.0, 0.0, 0.25), 0.3);
        assert_eq!(exp_approach_rate(0.3, 1.0, 0.0, 20.0), 0.3);
    }

    #[test]
    fn test_non_finite_dt_is_identity() {
        assert_eq!(exp_approach(0.3, 1.0, f32::NAN, 0.25), 0.3);
        assert_eq!(exp_approach(0.3, 1.0, f32::INFINITY, 0.25), 0.3);
        assert_eq!(exp_approach_rate(90.0, 35.0, f32::NAN, 20.0), 90.0);
        assert_eq!(exp_approach_rate(90.0, 35.0, f32::NAN, 0.0), 90.0);
    }

    #[test]
    fn test_sanitize_dt() {
        assert_eq!(sanitize_dt(0.016), 0.016);
        assert_eq!(sanitize_dt(-0.5), 0.0);
        assert_eq!(sanitize_dt(f32::NAN), 0.0);
        assert_eq!(sanitize_dt(f32::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_one_time_constant() {
        // After one time constant we are 1 - 1/e of the way there
        let v = exp_approach(0.0, 1.0, 0.25, 0.25);
        assert!((v - (1.0 - (-1.0f32).exp())).abs() < 1e-6);
    }

    #[test]
    fn test_split_steps_match_single_step() {
        let single = exp_approach(0.0, 1.0, 0.1, 0.25);
        let mut split = 0.0;
        for _ in 0..10 {
            split = exp_approach(split, 1.0, 0.01, 0.25);
        }
        assert!((single - split).abs() < 1e-5, "{single} vs {split}");
    }

    #[test]
    fn test_approach_linear() {
        assert_eq!(approach_linear(0.0, 1.0, 0.25), 0.25);
        assert_eq!(approach_linear(1.0, 0.0, 0.25), 0.75);
        assert_eq!(approach_linear(0.9, 1.0, 0.25), 1.0);
    }

    #[test]
    fn test_normalize_degrees() {
        assert!((normalize_degrees(190.0) - -170.0).abs() < 1e-4);
        assert!((normalize_degrees(-190.0) - 170.0).abs() < 1e-4);
        assert_eq!(normalize_degrees(180.0), 180.0);
        assert!((normalize_degrees(45.0) - 45.0).abs() < 1e-6);
    }
}
