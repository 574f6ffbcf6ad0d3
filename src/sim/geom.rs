//! Collision primitives for axis-aligned arena geometry
//!
//! Bullets are circles moving along straight paths; walls are axis-aligned
//! rectangles. Sweeping a circle against a rectangle is done with the slab
//! method against the Minkowski-expanded rectangle, which yields the exact
//! first time of contact along the path plus a unit face normal.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (wall or obstacle)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Rectangle from top-left corner plus size
    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self {
            min: origin,
            max: origin + size,
        }
    }

    /// Grow the rectangle by `r` on every side (Minkowski sum with a circle,
    /// corners treated as square)
    #[inline]
    pub fn expand(&self, r: f32) -> Aabb {
        Aabb {
            min: self.min - Vec2::splat(r),
            max: self.max + Vec2::splat(r),
        }
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// First contact of a swept circle with a wall
#[derive(Debug, Clone, Copy)]
pub struct WallHit {
    /// Fraction of the path travelled at contact, in [0, 1]
    pub t: f32,
    /// Circle center at the moment of contact
    pub point: Vec2,
    /// Unit face normal pointing away from the wall, toward the circle
    pub normal: Vec2,
}

/// Sweep a circle of `radius` from `start` along `delta` against `rect`.
///
/// Returns the earliest contact within the path, or `None` if the path
/// clears the wall. A circle already overlapping the wall resolves as a
/// `t = 0` contact with the minimum-penetration face normal; the caller's
/// post-reflection epsilon offset keeps that case out of normal play.
pub fn sweep_circle_aabb(start: Vec2, delta: Vec2, radius: f32, rect: &Aabb) -> Option<WallHit> {
    let expanded = rect.expand(radius);

    if expanded.contains(start) {
        let pens = [
            (start.x - expanded.min.x, Vec2::NEG_X),
            (expanded.max.x - start.x, Vec2::X),
            (start.y - expanded.min.y, Vec2::NEG_Y),
            (expanded.max.y - start.y, Vec2::Y),
        ];
        let (_, normal) = pens
            .into_iter()
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .unwrap_or((0.0, Vec2::NEG_X));
        return Some(WallHit {
            t: 0.0,
            point: start,
            normal,
        });
    }

    let s = [start.x, start.y];
    let d = [delta.x, delta.y];
    let lo = [expanded.min.x, expanded.min.y];
    let hi = [expanded.max.x, expanded.max.y];
    let axis_normals = [Vec2::X, Vec2::Y];

    let mut t_entry = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;
    let mut normal = Vec2::ZERO;

    for axis in 0..2 {
        if d[axis].abs() < f32::EPSILON {
            // Moving parallel to this slab: must already be inside it
            if s[axis] < lo[axis] || s[axis] > hi[axis] {
                return None;
            }
            continue;
        }
        let inv = 1.0 / d[axis];
        let mut t1 = (lo[axis] - s[axis]) * inv;
        let mut t2 = (hi[axis] - s[axis]) * inv;
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
        }
        if t1 > t_entry {
            t_entry = t1;
            // The entry face always opposes the direction of travel
            normal = -axis_normals[axis] * d[axis].signum();
        }
        t_exit = t_exit.min(t2);
    }

    if t_entry > t_exit || t_exit < 0.0 || !(0.0..=1.0).contains(&t_entry) {
        return None;
    }

    Some(WallHit {
        t: t_entry,
        point: start + delta * t_entry,
        normal,
    })
}

/// Earliest wall contact along a swept path.
///
/// Walls are scanned in slice order with a strict `<` comparison on `t`, so
/// a corner hit that reaches two walls at exactly the same time resolves to
/// the earlier wall in the arena's fixed ordering.
pub fn nearest_wall_along(
    walls: &[Aabb],
    start: Vec2,
    delta: Vec2,
    radius: f32,
) -> Option<WallHit> {
    let mut best: Option<WallHit> = None;
    for wall in walls {
        if let Some(hit) = sweep_circle_aabb(start, delta, radius, wall) {
            if best.as_ref().is_none_or(|b| hit.t < b.t) {
                best = Some(hit);
            }
        }
    }
    best
}

/// Mirror a velocity about a unit surface normal: v' = v - 2(v·n)n.
///
/// Speed is preserved exactly; only direction changes.
#[inline]
pub fn reflect(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Circle-circle overlap test
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance_squared(b) < (ra + rb) * (ra + rb)
}
