//! Mouse Motion Accumulator
//!
//! Raw mouse deltas arrive many times per frame. They accumulate here and
//! are drained once per frame by the action router, which turns them into
//! `Turn` / `LookUp` axis values.

/// Captured-mouse delta accumulator.
///
/// # Example
///
/// ```rust,ignore
/// let mut motion = MouseMotion::new();
/// motion.set_captured(true);
/// motion.accumulate_delta(10.0, -5.0);
/// motion.accumulate_delta(3.0, 2.0);
/// assert_eq!(motion.consume_delta(), (13.0, -3.0));
/// ```
#[derive(Debug, Clone)]
pub struct MouseMotion {
    delta_x: f32,
    delta_y: f32,
    /// Motion only counts while the cursor is captured
    captured: bool,
}

impl Default for MouseMotion {
    fn default() -> Self {
        Self {
            delta_x: 0.0,
            delta_y: 0.0,
            captured: true,
        }
    }
}

impl MouseMotion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add raw motion in device units. Ignored while the cursor is free.
    #[inline]
    pub fn accumulate_delta(&mut self, dx: f32, dy: f32) {
        if !self.captured || !dx.is_finite() || !dy.is_finite() {
            return;
        }
        self.delta_x += dx;
        self.delta_y += dy;
    }

    /// Return the accumulated motion and reset it to zero.
    #[inline]
    pub fn consume_delta(&mut self) -> (f32, f32) {
        let delta = (self.delta_x, self.delta_y);
        self.delta_x = 0.0;
        self.delta_y = 0.0;
        delta
    }

    /// Accumulated motion without consuming it.
    #[inline]
    pub fn peek_delta(&self) -> (f32, f32) {
        (self.delta_x, self.delta_y)
    }

    /// Releasing the cursor drops pending motion so the view does not jump.
    pub fn set_captured(&mut self, captured: bool) {
        self.captured = captured;
        if !captured {
            self.delta_x = 0.0;
            self.delta_y = 0.0;
        }
    }

    pub fn is_captured(&self) -> bool {
        self.captured
    }
}
