//! Bullet Bounce - a two-player arena shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, round state)
//! - `hub`: Uniform game capability trait for the external launcher
//! - `tuning`: Data-driven game balance
//!
//! The presentation layer (rendering, input devices, sound) lives outside
//! this crate. It feeds discrete [`sim::TickInput`] events in and reads a
//! [`sim::Snapshot`] back out each frame; nothing in here performs I/O.

pub mod hub;
pub mod sim;
pub mod tuning;

pub use hub::{ArcadeGame, BulletBounce};
pub use tuning::Tuning;

use glam::Vec2;

/// Fixed-step timing constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
}

/// Wrap an angle to [0, 2π)
#[inline]
pub fn wrap_angle(mut angle: f32) -> f32 {
    use std::f32::consts::TAU;
    angle %= TAU;
    if angle < 0.0 {
        angle += TAU;
    }
    angle
}

/// Unit direction vector for a facing angle
#[inline]
pub fn angle_to_dir(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
