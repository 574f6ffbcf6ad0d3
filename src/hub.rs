//! Uniform game capability trait for the external launcher
//!
//! The launcher drives every game through the same narrow surface: feed
//! inputs in, pull a serializable frame out, ask whether the game is done.
//! Object-safe so the launcher can hold a `Box<dyn ArcadeGame>` per menu
//! entry without knowing which game is behind it.

use serde_json::Value;

use crate::consts::SIM_DT;
use crate::sim::{self, GamePhase, GameState, TickInput};
use crate::tuning::Tuning;

/// Capability set every hosted game exposes to the launcher.
pub trait ArcadeGame {
    /// Display name for the launcher menu
    fn name(&self) -> &str;

    /// Advance the game by one fixed timestep
    fn update(&mut self, input: &TickInput, dt: f32);

    /// Serializable view of the current frame for the presentation layer
    fn snapshot(&self) -> Value;

    /// Whether the launcher should tear this game down
    fn over(&self) -> bool;
}

/// The Bullet Bounce arena shooter behind the [`ArcadeGame`] surface.
pub struct BulletBounce {
    state: GameState,
}

impl BulletBounce {
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        log::info!("starting Bullet Bounce match, seed {seed}");
        Self {
            state: GameState::new(seed, tuning),
        }
    }

    /// Direct state access for hosts that want more than the JSON view
    pub fn state(&self) -> &GameState {
        &self.state
    }
}

impl ArcadeGame for BulletBounce {
    fn name(&self) -> &str {
        "Bullet Bounce"
    }

    fn update(&mut self, input: &TickInput, dt: f32) {
        sim::tick(&mut self.state, input, dt);
    }

    fn snapshot(&self) -> Value {
        serde_json::to_value(self.state.snapshot()).unwrap_or(Value::Null)
    }

    fn over(&self) -> bool {
        self.state.exit_requested || self.state.phase == GamePhase::MatchOver
    }
}

/// Run a game for `frames` fixed steps with a constant input. Demo helper;
/// real hosts drive [`ArcadeGame::update`] from their own frame loop.
pub fn run_frames(game: &mut dyn ArcadeGame, input: &TickInput, frames: u32) {
    for _ in 0..frames {
        if game.over() {
            break;
        }
        game.update(input, SIM_DT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_is_json_object() {
        let game = BulletBounce::new(5);
        let snap = game.snapshot();
        assert!(snap.is_object());
        assert_eq!(snap["round"], 1);
    }

    #[test]
    fn test_quit_input_marks_game_over() {
        let mut game = BulletBounce::new(5);
        assert!(!game.over());
        let input = TickInput {
            quit: true,
            ..TickInput::default()
        };
        game.update(&input, SIM_DT);
        assert!(game.over());
    }

    #[test]
    fn test_trait_object_runs() {
        let mut game: Box<dyn ArcadeGame> = Box::new(BulletBounce::new(5));
        assert_eq!(game.name(), "Bullet Bounce");
        run_frames(game.as_mut(), &TickInput::default(), 10);
        assert_eq!(game.snapshot()["phase"], "Countdown");
    }
}
