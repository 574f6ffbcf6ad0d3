//! Arena: static wall geometry, live bullets and the power-up spawner
//!
//! Walls are immutable for a round and kept in a fixed order (borders first,
//! then obstacles) so collision tie-breaks are deterministic. Bullets and
//! power-ups live in id-stamped collections with explicit removal.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

use super::bullet::Bullet;
use super::geom::{self, Aabb, WallHit, circles_overlap};
use super::player::PlayerId;

/// Power-up kinds a player can pick up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    Shield,
    Speed,
    DoubleShot,
}

/// A power-up waiting on the arena floor
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    /// Seconds since spawn; despawns at the tuned timeout
    pub age: f32,
}

/// The playfield shared by both players
#[derive(Debug, Clone)]
pub struct Arena {
    tuning: Tuning,
    /// Fixed order: top, bottom, left, right borders, then obstacles
    walls: Vec<Aabb>,
    pub bullets: Vec<Bullet>,
    pub power_ups: Vec<PowerUp>,
    spawn_timer: f32,
    rng: Pcg32,
    next_id: u32,
}

impl Arena {
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let w = tuning.arena_width;
        let h = tuning.arena_height;
        let wt = tuning.wall_thickness;

        let walls = vec![
            // Borders
            Aabb::from_origin_size(Vec2::ZERO, Vec2::new(w, wt)),
            Aabb::from_origin_size(Vec2::new(0.0, h - wt), Vec2::new(w, wt)),
            Aabb::from_origin_size(Vec2::ZERO, Vec2::new(wt, h)),
            Aabb::from_origin_size(Vec2::new(w - wt, 0.0), Vec2::new(wt, h)),
            // Obstacle pillars, clear of the player spawn points
            Aabb::from_origin_size(
                Vec2::new(w * 3.0 / 8.0 - 10.0, h / 2.0 - 50.0),
                Vec2::new(20.0, 100.0),
            ),
            Aabb::from_origin_size(
                Vec2::new(w * 5.0 / 8.0 - 10.0, h / 2.0 - 50.0),
                Vec2::new(20.0, 100.0),
            ),
        ];

        Self {
            tuning,
            walls,
            bullets: Vec::new(),
            power_ups: Vec::new(),
            spawn_timer: tuning.power_up_interval,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    #[inline]
    pub fn walls(&self) -> &[Aabb] {
        &self.walls
    }

    /// Earliest wall contact along a swept circular path, or none
    pub fn nearest_wall_along(&self, start: Vec2, delta: Vec2, radius: f32) -> Option<WallHit> {
        geom::nearest_wall_along(&self.walls, start, delta, radius)
    }

    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Create a live bullet fired by `owner`
    pub fn spawn_bullet(&mut self, owner: PlayerId, pos: Vec2, angle: f32) {
        let id = self.next_entity_id();
        self.bullets
            .push(Bullet::new(id, owner, pos, angle, &self.tuning));
    }

    /// Advance every live bullet one tick, then drop destroyed ones and any
    /// that escaped the playfield (defensive, should not happen)
    pub fn advance_bullets(&mut self, dt: f32) {
        let bounds = Aabb::new(
            Vec2::ZERO,
            Vec2::new(self.tuning.arena_width, self.tuning.arena_height),
        );
        for bullet in &mut self.bullets {
            bullet.advance(dt, &self.walls);
            if bullet.alive && !bounds.contains(bullet.pos) {
                log::debug!("bullet {} escaped arena bounds, despawning", bullet.id);
                bullet.alive = false;
            }
        }
        self.bullets.retain(|b| b.alive);
    }

    /// Run the power-up spawn timer and age out stale power-ups
    pub fn update_power_ups(&mut self, dt: f32) {
        let timeout = self.tuning.power_up_timeout;
        for p in &mut self.power_ups {
            p.age += dt;
        }
        self.power_ups.retain(|p| p.age < timeout);

        self.spawn_timer -= dt;
        if self.spawn_timer <= 0.0 {
            self.spawn_timer = self.tuning.power_up_interval;
            if self.power_ups.len() < self.tuning.power_up_cap {
                self.try_spawn_power_up();
            }
        }
    }

    /// Rejection-sample a free position. Gives up after the tuned attempt
    /// bound and skips this cycle rather than blocking.
    fn try_spawn_power_up(&mut self) {
        let r = self.tuning.power_up_radius;
        let margin = self.tuning.wall_thickness + r;
        let x_max = self.tuning.arena_width - margin;
        let y_max = self.tuning.arena_height - margin;
        if x_max <= margin || y_max <= margin {
            log::debug!("arena too small for power-ups, skipping spawn");
            return;
        }

        for _ in 0..self.tuning.spawn_attempts {
            let pos = Vec2::new(
                self.rng.random_range(margin..x_max),
                self.rng.random_range(margin..y_max),
            );

            let blocked = self
                .walls
                .iter()
                .any(|wall| wall.expand(r).contains(pos))
                || self
                    .power_ups
                    .iter()
                    .any(|p| circles_overlap(pos, r, p.pos, r));
            if blocked {
                continue;
            }

            let kind = match self.rng.random_range(0..3) {
                0 => PowerUpKind::Shield,
                1 => PowerUpKind::Speed,
                _ => PowerUpKind::DoubleShot,
            };
            let id = self.next_entity_id();
            self.power_ups.push(PowerUp {
                id,
                kind,
                pos,
                age: 0.0,
            });
            return;
        }

        log::debug!("no free spot for power-up after retry bound, skipping cycle");
    }

    /// Consume the first power-up overlapping a player circle, if any
    pub fn check_pickup(&mut self, pos: Vec2, radius: f32) -> Option<PowerUpKind> {
        let r = self.tuning.power_up_radius;
        let idx = self
            .power_ups
            .iter()
            .position(|p| circles_overlap(pos, radius, p.pos, r))?;
        Some(self.power_ups.remove(idx).kind)
    }

    /// Clear per-round entity state; walls stay put
    pub fn reset_round(&mut self) {
        self.bullets.clear();
        self.power_ups.clear();
        self.spawn_timer = self.tuning.power_up_interval;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena() -> Arena {
        Arena::new(Tuning::default(), 7)
    }

    #[test]
    fn test_wall_layout() {
        let a = arena();
        // 4 borders + 2 obstacles, borders first
        assert_eq!(a.walls().len(), 6);
        assert_eq!(a.walls()[0].min, Vec2::ZERO);
    }

    #[test]
    fn test_spawner_respects_interval_and_cap() {
        // Long timeout so spawned power-ups stick around for the count
        let t = Tuning {
            power_up_timeout: 1.0e6,
            ..Tuning::default()
        };
        let mut a = Arena::new(t, 7);

        // Nothing before the interval elapses
        a.update_power_ups(t.power_up_interval - 0.1);
        assert!(a.power_ups.is_empty());

        // One per elapsed interval, never past the cap
        for _ in 0..20 {
            a.update_power_ups(t.power_up_interval);
        }
        assert_eq!(a.power_ups.len(), t.power_up_cap);
    }

    #[test]
    fn test_spawned_power_ups_clear_walls() {
        let t = Tuning {
            power_up_timeout: 1.0e6,
            ..Tuning::default()
        };
        let mut a = Arena::new(t, 7);
        for _ in 0..20 {
            a.update_power_ups(t.power_up_interval);
        }
        assert!(!a.power_ups.is_empty());
        for p in &a.power_ups {
            for wall in a.walls() {
                assert!(
                    !wall.expand(t.power_up_radius).contains(p.pos),
                    "power-up at {:?} overlaps wall {:?}",
                    p.pos,
                    wall
                );
            }
        }
    }

    #[test]
    fn test_spawn_skipped_when_no_room() {
        // Playfield narrower than the spawn margin: every cycle must skip
        // without blocking or panicking
        let t = Tuning {
            arena_width: 60.0,
            arena_height: 60.0,
            ..Tuning::default()
        };
        let mut a = Arena::new(t, 7);
        for _ in 0..100 {
            a.update_power_ups(t.power_up_interval);
        }
        assert!(a.power_ups.is_empty());
    }

    #[test]
    fn test_spawn_gives_up_when_obstacles_cover_playfield() {
        // 120x120 playfield: the sampleable band is x, y in [35, 85], and the
        // expanded obstacle pillars cover all of it. Every attempt rejects,
        // so each cycle gives up at the retry bound and skips.
        let t = Tuning {
            arena_width: 120.0,
            arena_height: 120.0,
            power_up_timeout: 1.0e6,
            ..Tuning::default()
        };
        let mut a = Arena::new(t, 7);
        let margin = t.wall_thickness + t.power_up_radius;
        assert!(margin < t.arena_width - margin, "sampling range must be non-empty");
        for _ in 0..100 {
            a.update_power_ups(t.power_up_interval);
        }
        assert!(a.power_ups.is_empty());
    }

    #[test]
    fn test_pickup_consumes_power_up() {
        let t = Tuning::default();
        let mut a = arena();
        a.power_ups.push(PowerUp {
            id: 99,
            kind: PowerUpKind::Speed,
            pos: Vec2::new(400.0, 300.0),
            age: 0.0,
        });

        // Too far away: nothing consumed
        assert!(a.check_pickup(Vec2::new(100.0, 100.0), t.player_radius).is_none());
        assert_eq!(a.power_ups.len(), 1);

        let kind = a.check_pickup(Vec2::new(405.0, 300.0), t.player_radius);
        assert_eq!(kind, Some(PowerUpKind::Speed));
        assert!(a.power_ups.is_empty());
    }

    #[test]
    fn test_power_up_times_out() {
        // Large interval so the spawn timer can't fire during the timeout step
        let t = Tuning {
            power_up_interval: 1.0e6,
            ..Tuning::default()
        };
        let mut a = Arena::new(t, 7);
        a.power_ups.push(PowerUp {
            id: 1,
            kind: PowerUpKind::Shield,
            pos: Vec2::new(400.0, 300.0),
            age: 0.0,
        });
        a.update_power_ups(t.power_up_timeout + 0.1);
        assert!(a.power_ups.is_empty());
    }

    #[test]
    fn test_bullet_out_of_bounds_despawned() {
        let mut a = arena();
        a.spawn_bullet(PlayerId::One, Vec2::new(400.0, 300.0), 0.0);
        // Teleport it outside the playfield; the defensive check removes it
        a.bullets[0].pos = Vec2::new(5000.0, 5000.0);
        a.advance_bullets(1.0 / 60.0);
        assert!(a.bullets.is_empty());
    }

    #[test]
    fn test_seeded_spawns_are_deterministic() {
        let t = Tuning::default();
        let mut a = Arena::new(t, 42);
        let mut b = Arena::new(t, 42);
        for _ in 0..5 {
            a.update_power_ups(t.power_up_interval);
            b.update_power_ups(t.power_up_interval);
        }
        let pa: Vec<_> = a.power_ups.iter().map(|p| (p.kind, p.pos)).collect();
        let pb: Vec<_> = b.power_ups.iter().map(|p| (p.kind, p.pos)).collect();
        assert_eq!(pa, pb);
    }
}
