//! Bullet entity with bounce-budget reflection
//!
//! A bullet flies in a straight line until its swept path meets a wall, then
//! mirrors its velocity about the wall normal. Each reflection spends one
//! bounce from the budget; the wall contact after the budget is exhausted
//! destroys the bullet instead of reflecting it.

use glam::Vec2;

use super::geom::{Aabb, nearest_wall_along, reflect};
use super::player::PlayerId;
use crate::angle_to_dir;
use crate::tuning::Tuning;

/// Maximum number of trail points to store (sliding window)
pub const TRAIL_LENGTH: usize = 10;

/// Offset along the new velocity after a reflection, so the next sweep does
/// not start inside the wall it just left
pub const CONTACT_EPSILON: f32 = 0.5;

/// A projectile owned by the arena's live-bullet collection
#[derive(Debug, Clone)]
pub struct Bullet {
    pub id: u32,
    /// Which player fired it (identity, not ownership)
    pub owner: PlayerId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Wall reflections remaining before the next contact destroys it
    pub bounces_left: u8,
    pub alive: bool,
    /// Past positions for rendering, newest first
    pub trail: Vec<Vec2>,
}

impl Bullet {
    pub fn new(id: u32, owner: PlayerId, pos: Vec2, angle: f32, tuning: &Tuning) -> Self {
        Self {
            id,
            owner,
            pos,
            vel: angle_to_dir(angle) * tuning.bullet_speed,
            radius: tuning.bullet_radius,
            bounces_left: tuning.bounce_budget,
            alive: true,
            trail: Vec::with_capacity(TRAIL_LENGTH),
        }
    }

    /// Integrate one fixed timestep, reflecting off walls along the way.
    ///
    /// The walls slice is in the arena's fixed order; ties between equally
    /// near walls (corner hits) resolve to the earlier wall. Speed is
    /// preserved exactly across reflections.
    pub fn advance(&mut self, dt: f32, walls: &[Aabb]) {
        debug_assert!(self.alive, "advancing a dead bullet");

        let mut remaining = self.vel.length() * dt;
        while remaining > 0.0 {
            let dir = self.vel.normalize_or_zero();
            if dir == Vec2::ZERO {
                break;
            }
            let delta = dir * remaining;

            let Some(hit) = nearest_wall_along(walls, self.pos, delta, self.radius) else {
                self.pos += delta;
                break;
            };

            if self.bounces_left == 0 {
                // Budget exhausted: this contact destroys the bullet
                self.alive = false;
                self.push_trail(hit.point);
                return;
            }

            self.bounces_left -= 1;
            self.vel = reflect(self.vel, hit.normal);
            let new_dir = self.vel.normalize_or_zero();
            self.pos = hit.point + new_dir * CONTACT_EPSILON;
            self.push_trail(hit.point);

            remaining = (remaining * (1.0 - hit.t) - CONTACT_EPSILON).max(0.0);
        }

        self.push_trail(self.pos);
    }

    /// Record a position to the trail, dropping the oldest past the window
    fn push_trail(&mut self, p: Vec2) {
        self.trail.insert(0, p);
        self.trail.truncate(TRAIL_LENGTH);
    }

    /// Current speed in pixels per second
    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tuning() -> Tuning {
        Tuning::default()
    }

    /// Single wall to the right of the origin, tall enough to always be hit
    fn right_wall() -> Vec<Aabb> {
        vec![Aabb::new(
            Vec2::new(100.0, -1000.0),
            Vec2::new(120.0, 1000.0),
        )]
    }

    #[test]
    fn test_straight_flight_no_walls() {
        let t = tuning();
        let mut b = Bullet::new(1, PlayerId::One, Vec2::ZERO, 0.0, &t);
        b.advance(0.1, &[]);
        assert!(b.alive);
        assert!((b.pos.x - t.bullet_speed * 0.1).abs() < 1e-3);
        assert_eq!(b.pos.y, 0.0);
    }

    #[test]
    fn test_reflection_preserves_speed() {
        let t = tuning();
        let walls = right_wall();
        let mut b = Bullet::new(1, PlayerId::One, Vec2::ZERO, 0.3, &t);
        let speed_before = b.speed();
        // Long enough step to guarantee a wall contact
        b.advance(0.5, &walls);
        assert!(b.bounces_left < t.bounce_budget, "expected a reflection");
        assert!((b.speed() - speed_before).abs() < 1e-2);
    }

    #[test]
    fn test_reflection_flips_direction() {
        let t = tuning();
        let walls = right_wall();
        let mut b = Bullet::new(1, PlayerId::One, Vec2::new(90.0, 0.0), 0.0, &t);
        b.advance(0.05, &walls);
        assert!(b.alive);
        assert!(b.vel.x < 0.0, "should now travel left");
        assert_eq!(b.bounces_left, t.bounce_budget - 1);
    }

    #[test]
    fn test_epsilon_offset_avoids_retrigger() {
        let t = tuning();
        let walls = right_wall();
        let mut b = Bullet::new(1, PlayerId::One, Vec2::new(90.0, 0.0), 0.0, &t);
        b.advance(0.02, &walls);
        let bounces_after_first = b.bounces_left;
        // A zero-length follow-up frame must not re-collide with the same wall
        b.advance(0.0, &walls);
        assert_eq!(b.bounces_left, bounces_after_first);
        assert!(b.alive);
    }

    #[test]
    fn test_destroyed_on_contact_after_budget() {
        let mut t = tuning();
        t.bounce_budget = 2;
        // Parallel walls 100 px apart: the bullet ping-pongs between them
        let walls = vec![
            Aabb::new(Vec2::new(100.0, -1000.0), Vec2::new(120.0, 1000.0)),
            Aabb::new(Vec2::new(-120.0, -1000.0), Vec2::new(-100.0, 1000.0)),
        ];
        let mut b = Bullet::new(1, PlayerId::One, Vec2::ZERO, 0.0, &t);
        // Short frames so each one covers at most one crossing
        let mut contacts = 0;
        let mut frames = 0;
        while b.alive && frames < 1000 {
            let before = b.bounces_left;
            b.advance(0.05, &walls);
            if b.bounces_left < before || !b.alive {
                contacts += 1;
            }
            frames += 1;
        }
        // Budget 2: destroyed on exactly the 3rd contact, never earlier
        assert!(!b.alive);
        assert_eq!(contacts, 3);
        assert_eq!(b.bounces_left, 0);
    }

    #[test]
    fn test_trail_is_bounded_window() {
        let t = tuning();
        let mut b = Bullet::new(1, PlayerId::One, Vec2::ZERO, 1.0, &t);
        for _ in 0..(TRAIL_LENGTH * 3) {
            b.advance(0.001, &[]);
        }
        assert_eq!(b.trail.len(), TRAIL_LENGTH);
        // Newest first: head is the current position
        assert_eq!(b.trail[0], b.pos);
    }
}
