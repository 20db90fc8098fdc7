//! Collision Query Module
//!
//! Segment traces against world geometry. The aim core only ever asks one
//! question of the world: "what does the segment from A to B hit first?".
//! That question is the [`SegmentTrace`] trait; [`BoxWorld`] answers it for a
//! set of axis-aligned boxes, which is all the sandbox and the tests need.
//!
//! # Ray-AABB Intersection
//!
//! The slab method is used for ray-AABB intersection, which finds the
//! intersection points by computing entry and exit times for each axis.
//!
//! # Example
//!
//! ```ignore
//! use hipfire_engine::physics::collision::{Aabb, BoxWorld, SegmentTrace};
//! use glam::Vec3;
//!
//! let mut world = BoxWorld::new();
//! world.add_box("wall", Aabb::from_center_half_extents(Vec3::new(0.0, 0.0, -500.0), Vec3::splat(50.0)));
//!
//! let hit = world.trace_segment(Vec3::ZERO, Vec3::new(0.0, 0.0, -1000.0))?;
//! assert!(hit.did_hit);
//! ```

use glam::Vec3;
use log::trace;

use crate::error::AimError;

/// Result of a segment trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceHit {
    /// First blocking point, or the segment end when nothing was hit
    pub hit_point: Vec3,
    /// Whether anything blocked the segment
    pub did_hit: bool,
    /// Surface normal at the hit point (zero when nothing was hit)
    pub normal: Vec3,
}

impl TraceHit {
    /// A trace that reached `end` unobstructed.
    pub fn miss(end: Vec3) -> Self {
        Self {
            hit_point: end,
            did_hit: false,
            normal: Vec3::ZERO,
        }
    }

    /// A trace blocked at `point`.
    pub fn hit(point: Vec3, normal: Vec3) -> Self {
        Self {
            hit_point: point,
            did_hit: true,
            normal,
        }
    }
}

/// Collision-query collaborator: trace a segment against world geometry.
///
/// Implementations must be synchronous. A world that cannot answer yet
/// returns [`AimError::Unavailable`]; callers do not retry.
pub trait SegmentTrace {
    fn trace_segment(&self, start: Vec3, end: Vec3) -> Result<TraceHit, AimError>;
}

impl<F> SegmentTrace for F
where
    F: Fn(Vec3, Vec3) -> Result<TraceHit, AimError>,
{
    fn trace_segment(&self, start: Vec3, end: Vec3) -> Result<TraceHit, AimError> {
        self(start, end)
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Build a box from two opposite corners in any order.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        let half = half_extents.abs();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Outward normal of the face closest to `point`.
    pub fn surface_normal(&self, point: Vec3) -> Vec3 {
        let center = (self.min + self.max) * 0.5;
        let half_extents = ((self.max - self.min) * 0.5).max(Vec3::splat(1e-6));
        let n = (point - center) / half_extents;
        let a = n.abs();

        if a.x >= a.y && a.x >= a.z {
            Vec3::new(n.x.signum(), 0.0, 0.0)
        } else if a.y >= a.z {
            Vec3::new(0.0, n.y.signum(), 0.0)
        } else {
            Vec3::new(0.0, 0.0, n.z.signum())
        }
    }
}

/// Ray-AABB intersection using the slab method.
///
/// `ray_dir` does not need to be normalized; the returned `t` is in units of
/// `ray_dir`. A ray that starts inside the box returns `Some(0.0)`.
///
/// # Returns
///
/// * `Some(t)` - Parameter of the first intersection (t >= 0)
/// * `None` - No intersection, or the box is entirely behind the origin
pub fn ray_aabb_intersect(ray_origin: Vec3, ray_dir: Vec3, aabb: &Aabb) -> Option<f32> {
    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;

    for axis in 0..3 {
        let o = ray_origin[axis];
        let d = ray_dir[axis];
        let (lo, hi) = (aabb.min[axis], aabb.max[axis]);

        if d.abs() < 1e-12 {
            // Parallel to this slab: must already be between its planes
            if o < lo || o > hi {
                return None;
            }
            continue;
        }

        let inv = 1.0 / d;
        let t1 = (lo - o) * inv;
        let t2 = (hi - o) * inv;
        t_min = t_min.max(t1.min(t2));
        t_max = t_max.min(t1.max(t2));

        if t_max < t_min {
            return None;
        }
    }

    if t_max < 0.0 {
        None
    } else {
        Some(t_min.max(0.0))
    }
}

/// A named blocking box in a [`BoxWorld`].
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub name: String,
    pub bounds: Aabb,
}

/// Brute-force collision world made of axis-aligned boxes.
#[derive(Debug, Clone)]
pub struct BoxWorld {
    obstacles: Vec<Obstacle>,
    /// Traces fail with `Unavailable` until the world is loaded
    loaded: bool,
}

impl Default for BoxWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl BoxWorld {
    /// Create an empty, loaded world.
    pub fn new() -> Self {
        Self {
            obstacles: Vec::new(),
            loaded: true,
        }
    }

    /// Create a world that rejects traces until [`BoxWorld::set_loaded`] is called.
    pub fn unloaded() -> Self {
        Self {
            obstacles: Vec::new(),
            loaded: false,
        }
    }

    pub fn set_loaded(&mut self, loaded: bool) {
        self.loaded = loaded;
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn add_box(&mut self, name: impl Into<String>, bounds: Aabb) {
        self.obstacles.push(Obstacle {
            name: name.into(),
            bounds,
        });
    }

    /// Remove every obstacle with the given name. Returns how many were removed.
    pub fn remove(&mut self, name: &str) -> usize {
        let before = self.obstacles.len();
        self.obstacles.retain(|o| o.name != name);
        before - self.obstacles.len()
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Closest obstacle along the segment, with its parameter in [0, 1].
    fn closest_hit(&self, start: Vec3, end: Vec3) -> Option<(f32, &Obstacle)> {
        let delta = end - start;
        self.obstacles
            .iter()
            .filter_map(|o| {
                ray_aabb_intersect(start, delta, &o.bounds)
                    .filter(|&t| t <= 1.0)
                    .map(|t| (t, o))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))
    }
}

impl SegmentTrace for BoxWorld {
    fn trace_segment(&self, start: Vec3, end: Vec3) -> Result<TraceHit, AimError> {
        if !self.loaded {
            return Err(AimError::Unavailable("collision world not loaded".to_string()));
        }
        if start.distance_squared(end) < 1e-12 {
            return Ok(TraceHit::miss(end));
        }

        match self.closest_hit(start, end) {
            Some((t, obstacle)) => {
                let point = start + (end - start) * t;
                trace!("segment blocked by '{}' at {point}", obstacle.name);
                Ok(TraceHit::hit(point, obstacle.bounds.surface_normal(point)))
            }
            None => Ok(TraceHit::miss(end)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Aabb {
        Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0))
    }

    #[test]
    fn test_ray_hits_box_in_front() {
        let t = ray_aabb_intersect(Vec3::new(0.0, 0.0, -5.0), Vec3::Z, &unit_box());
        assert_eq!(t, Some(4.0));
    }

    #[test]
    fn test_ray_misses_box_behind() {
        let t = ray_aabb_intersect(Vec3::new(0.0, 0.0, 5.0), Vec3::Z, &unit_box());
        assert_eq!(t, None);
    }

    #[test]
    fn test_ray_parallel_outside_slab() {
        let t = ray_aabb_intersect(Vec3::new(0.0, 3.0, -5.0), Vec3::Z, &unit_box());
        assert_eq!(t, None);
    }

    #[test]
    fn test_ray_from_inside_hits_at_origin() {
        let t = ray_aabb_intersect(Vec3::ZERO, Vec3::X, &unit_box());
        assert_eq!(t, Some(0.0));
    }

    #[test]
    fn test_aabb_new_orders_corners() {
        let b = Aabb::new(Vec3::new(1.0, -2.0, 3.0), Vec3::new(-1.0, 2.0, -3.0));
        assert_eq!(b.min, Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(b.max, Vec3::new(1.0, 2.0, 3.0));
        assert!(b.contains(Vec3::ZERO));
        assert!(!b.contains(Vec3::new(0.0, 0.0, 4.0)));
    }

    #[test]
    fn test_surface_normal() {
        let b = unit_box();
        assert_eq!(b.surface_normal(Vec3::new(0.0, 0.0, -1.0)), Vec3::NEG_Z);
        assert_eq!(b.surface_normal(Vec3::new(1.0, 0.2, 0.0)), Vec3::X);
        assert_eq!(b.surface_normal(Vec3::new(0.1, 1.0, 0.3)), Vec3::Y);
    }

    #[test]
    fn test_world_trace_miss_returns_end() {
        let world = BoxWorld::new();
        let end = Vec3::new(0.0, 0.0, -100.0);
        let hit = world.trace_segment(Vec3::ZERO, end).unwrap();
        assert!(!hit.did_hit);
        assert_eq!(hit.hit_point, end);
    }

    #[test]
    fn test_world_trace_picks_closest() {
        let mut world = BoxWorld::new();
        world.add_box("far", Aabb::from_center_half_extents(Vec3::new(0.0, 0.0, -80.0), Vec3::splat(5.0)));
        world.add_box("near", Aabb::from_center_half_extents(Vec3::new(0.0, 0.0, -30.0), Vec3::splat(5.0)));

        let hit = world.trace_segment(Vec3::ZERO, Vec3::new(0.0, 0.0, -100.0)).unwrap();
        assert!(hit.did_hit);
        assert!((hit.hit_point.z - -25.0).abs() < 1e-4);
        assert_eq!(hit.normal, Vec3::Z);
    }

    #[test]
    fn test_world_trace_ignores_box_past_segment_end() {
        let mut world = BoxWorld::new();
        world.add_box("beyond", Aabb::from_center_half_extents(Vec3::new(0.0, 0.0, -200.0), Vec3::splat(5.0)));

        let hit = world.trace_segment(Vec3::ZERO, Vec3::new(0.0, 0.0, -100.0)).unwrap();
        assert!(!hit.did_hit);
    }

    #[test]
    fn test_unloaded_world_is_unavailable() {
        let world = BoxWorld::unloaded();
        let result = world.trace_segment(Vec3::ZERO, Vec3::X);
        assert!(matches!(result, Err(AimError::Unavailable(_))));
    }

    #[test]
    fn test_remove_by_name() {
        let mut world = BoxWorld::new();
        world.add_box("a", unit_box());
        world.add_box("b", unit_box());
        world.add_box("a", unit_box());
        assert_eq!(world.remove("a"), 2);
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn test_closure_implements_trace() {
        let always_hit = |_s: Vec3, _e: Vec3| -> Result<TraceHit, AimError> {
            Ok(TraceHit::hit(Vec3::ONE, Vec3::Y))
        };
        let hit = always_hit.trace_segment(Vec3::ZERO, Vec3::X).unwrap();
        assert_eq!(hit.hit_point, Vec3::ONE);
    }
}
