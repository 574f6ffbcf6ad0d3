//! Player entity: movement, rotation, shooting and power-up state
//!
//! Players never mutate each other; hits land through the round controller
//! calling [`Player::take_hit`] on the target.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;
use crate::wrap_angle;

use super::arena::PowerUpKind;

/// One of the two player slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    /// Fixed iteration order for deterministic collision resolution
    pub const ALL: [PlayerId; 2] = [PlayerId::One, PlayerId::Two];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }

    #[inline]
    pub fn opponent(self) -> PlayerId {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }
}

/// Active power-up timers; at most one instance per kind, reapplying
/// refreshes the duration instead of stacking
#[derive(Debug, Clone, Copy, Default)]
pub struct ActiveEffects {
    pub shield: Option<f32>,
    pub speed: Option<f32>,
    pub double_shot: Option<f32>,
    /// One-hit absorb granted by the shield power-up; cleared on use or expiry
    pub shield_absorb: bool,
}

impl ActiveEffects {
    /// Count down remaining durations; expired effects clear out
    pub fn tick(&mut self, dt: f32) {
        for timer in [&mut self.shield, &mut self.speed, &mut self.double_shot] {
            if let Some(remaining) = timer {
                *remaining -= dt;
                if *remaining <= 0.0 {
                    *timer = None;
                }
            }
        }
        if self.shield.is_none() {
            self.shield_absorb = false;
        }
    }

    /// (kind, remaining) pairs for the presentation snapshot
    pub fn active(&self) -> Vec<(PowerUpKind, f32)> {
        let mut out = Vec::new();
        if let Some(r) = self.shield {
            out.push((PowerUpKind::Shield, r));
        }
        if let Some(r) = self.speed {
            out.push((PowerUpKind::Speed, r));
        }
        if let Some(r) = self.double_shot {
            out.push((PowerUpKind::DoubleShot, r));
        }
        out
    }
}

/// A player character, owned by the game state and reset at round boundaries
#[derive(Debug, Clone)]
pub struct Player {
    pub id: PlayerId,
    pub pos: Vec2,
    /// Facing angle, wrapped to [0, 2π)
    pub angle: f32,
    pub vel: Vec2,
    pub health: i32,
    /// Points scored this round (reset at the round boundary)
    pub score: u32,
    /// Seconds until the next shot is allowed
    pub cooldown: f32,
    pub effects: ActiveEffects,
}

impl Player {
    pub fn new(id: PlayerId, pos: Vec2, angle: f32, tuning: &Tuning) -> Self {
        Self {
            id,
            pos,
            angle: wrap_angle(angle),
            vel: Vec2::ZERO,
            health: tuning.player_health,
            score: 0,
            cooldown: 0.0,
            effects: ActiveEffects::default(),
        }
    }

    /// Reset to round-start state at the given spawn
    pub fn reset(&mut self, pos: Vec2, angle: f32, tuning: &Tuning) {
        self.pos = pos;
        self.angle = wrap_angle(angle);
        self.vel = Vec2::ZERO;
        self.health = tuning.player_health;
        self.score = 0;
        self.cooldown = 0.0;
        self.effects = ActiveEffects::default();
    }

    /// Maximum speed, accounting for an active speed boost
    #[inline]
    pub fn max_speed(&self, tuning: &Tuning) -> f32 {
        if self.effects.speed.is_some() {
            tuning.move_speed * tuning.speed_boost_factor
        } else {
            tuning.move_speed
        }
    }

    /// Apply a movement direction for this tick. Velocity is clamped to the
    /// current max speed and the position stays inside the playfield.
    pub fn apply_movement(&mut self, dir: Option<Vec2>, dt: f32, tuning: &Tuning) {
        self.vel = match dir {
            Some(d) => d.normalize_or_zero() * self.max_speed(tuning),
            None => Vec2::ZERO,
        };
        self.pos += self.vel * dt;

        let margin = tuning.wall_thickness + tuning.player_radius;
        self.pos.x = self.pos.x.clamp(margin, tuning.arena_width - margin);
        self.pos.y = self.pos.y.clamp(margin, tuning.arena_height - margin);
    }

    /// Rotate by `dir` (clamped to [-1, 1]) at the tuned turn rate
    pub fn apply_turn(&mut self, dir: f32, dt: f32, tuning: &Tuning) {
        self.angle = wrap_angle(self.angle + dir.clamp(-1.0, 1.0) * tuning.turn_rate * dt);
    }

    pub fn tick_cooldown(&mut self, dt: f32) {
        self.cooldown = (self.cooldown - dt).max(0.0);
    }

    /// Attempt to fire. Returns the firing angles (two diverging angles when
    /// double-shot is active), or an empty vec while the cooldown is pending
    /// — an ignored input, not an error.
    pub fn try_shoot(&mut self, tuning: &Tuning) -> Vec<f32> {
        if self.cooldown > 0.0 {
            return Vec::new();
        }
        self.cooldown = tuning.shoot_cooldown;
        if self.effects.double_shot.is_some() {
            vec![
                self.angle - tuning.double_shot_spread,
                self.angle + tuning.double_shot_spread,
            ]
        } else {
            vec![self.angle]
        }
    }

    /// Set or refresh a power-up. Applying to an eliminated player is an
    /// impossible-state request: ignored with a warning.
    pub fn apply_power_up(&mut self, kind: PowerUpKind, tuning: &Tuning) {
        if self.eliminated() {
            log::warn!("power-up {kind:?} applied to eliminated player {:?}", self.id);
            return;
        }
        let duration = tuning.power_up_duration;
        match kind {
            PowerUpKind::Shield => {
                self.effects.shield = Some(duration);
                self.effects.shield_absorb = true;
            }
            PowerUpKind::Speed => self.effects.speed = Some(duration),
            PowerUpKind::DoubleShot => self.effects.double_shot = Some(duration),
        }
    }

    /// Take a bullet hit. A shield absorb consumes the shield and blocks all
    /// damage. Returns true if the player is eliminated for this round.
    pub fn take_hit(&mut self, damage: i32) -> bool {
        if self.effects.shield_absorb {
            self.effects.shield_absorb = false;
            self.effects.shield = None;
            return false;
        }
        self.health -= damage;
        self.health <= 0
    }

    #[inline]
    pub fn eliminated(&self) -> bool {
        self.health <= 0
    }
}
