//! Data-driven game balance
//!
//! Every gameplay number lives in an explicit [`Tuning`] struct that is
//! passed into the simulation at construction. Keep this separate from
//! runtime configuration (the fixed timestep) in `consts`.

/// Gameplay tuning for the Bullet Bounce simulation.
///
/// Immutable after construction; shared by the arena, both players and the
/// round controller.
#[derive(Debug, Clone, Copy)]
pub struct Tuning {
    // === Arena ===
    /// Playfield width in pixels.
    pub arena_width: f32,
    /// Playfield height in pixels.
    pub arena_height: f32,
    /// Border wall thickness in pixels.
    pub wall_thickness: f32,

    // === Player ===
    /// Player collision radius in pixels.
    pub player_radius: f32,
    /// Health at round start.
    pub player_health: i32,
    /// Maximum movement speed in pixels per second.
    pub move_speed: f32,
    /// Multiplier applied to `move_speed` while speed boost is active.
    pub speed_boost_factor: f32,
    /// Rotation speed in radians per second.
    pub turn_rate: f32,
    /// Seconds between shots.
    pub shoot_cooldown: f32,
    /// Health lost per bullet hit.
    pub hit_damage: i32,

    // === Bullet ===
    /// Bullet collision radius in pixels.
    pub bullet_radius: f32,
    /// Bullet speed in pixels per second (preserved across reflections).
    pub bullet_speed: f32,
    /// Wall reflections before the next wall contact destroys the bullet.
    pub bounce_budget: u8,
    /// Angular divergence of the double-shot pair, in radians.
    pub double_shot_spread: f32,

    // === Power-ups ===
    /// Pickup collision radius in pixels.
    pub power_up_radius: f32,
    /// Seconds between spawn attempts.
    pub power_up_interval: f32,
    /// Maximum concurrent power-ups on the floor.
    pub power_up_cap: usize,
    /// Seconds an uncollected power-up stays on the floor.
    pub power_up_timeout: f32,
    /// Seconds an applied power-up effect lasts.
    pub power_up_duration: f32,
    /// Rejection-sampling attempts before a spawn cycle is skipped.
    pub spawn_attempts: u32,

    // === Round / match ===
    /// Points that end the round immediately.
    pub point_threshold: u32,
    /// Round length in seconds.
    pub round_time: f32,
    /// Countdown before each round, in seconds.
    pub countdown_time: f32,
    /// Seconds the round-over banner stays up before auto-advancing.
    pub round_over_delay: f32,
    /// Total rounds in a match (best-of).
    pub best_of: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_width: 800.0,
            arena_height: 600.0,
            wall_thickness: 20.0,

            player_radius: 20.0,
            player_health: 100,
            move_speed: 300.0,
            speed_boost_factor: 1.5,
            turn_rate: 6.0,
            shoot_cooldown: 0.3,
            hit_damage: 20,

            bullet_radius: 5.0,
            bullet_speed: 600.0,
            bounce_budget: 3,
            double_shot_spread: 0.2,

            power_up_radius: 15.0,
            power_up_interval: 10.0,
            power_up_cap: 3,
            power_up_timeout: 10.0,
            power_up_duration: 5.0,
            spawn_attempts: 50,

            point_threshold: 5,
            round_time: 60.0,
            countdown_time: 3.0,
            round_over_delay: 3.0,
            best_of: 3,
        }
    }
}

impl Tuning {
    /// Round wins needed to take the match.
    #[inline]
    pub fn wins_needed(&self) -> u32 {
        self.best_of / 2 + 1
    }
}
