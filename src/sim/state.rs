//! Round and match state
//!
//! The phase machine is total: every control event has a defined effect in
//! every phase, "ignored" included. Timer-driven transitions (countdown
//! expiry, round timer expiry, banner delay) live in the tick loop.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

use super::arena::Arena;
use super::player::{Player, PlayerId};
use super::snapshot::Snapshot;

/// Phase a pause can freeze and later resume to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrozenPhase {
    Countdown,
    Playing,
}

/// Current phase of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Pre-round countdown; input ignored except pause
    Countdown,
    /// Active simulation
    Playing,
    /// Frozen; resumes to the phase it interrupted without resetting timers
    Paused { from: FrozenPhase },
    /// Round banner; advances after a delay or explicit continue
    RoundOver,
    /// Terminal; only exit is back to the launcher
    MatchOver,
}

/// Discrete control events from the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    PauseToggle,
    Advance,
    Quit,
}

impl GamePhase {
    /// Control-event transition table. `Advance` only acts in `RoundOver`,
    /// where the destination depends on match bookkeeping; the caller passes
    /// it in. `Quit` never changes phase (teardown is a flag, see tick).
    pub fn apply_control(self, event: ControlEvent, advance_target: GamePhase) -> GamePhase {
        match (self, event) {
            (GamePhase::Countdown, ControlEvent::PauseToggle) => GamePhase::Paused {
                from: FrozenPhase::Countdown,
            },
            (GamePhase::Playing, ControlEvent::PauseToggle) => GamePhase::Paused {
                from: FrozenPhase::Playing,
            },
            (GamePhase::Paused { from }, ControlEvent::PauseToggle) => match from {
                FrozenPhase::Countdown => GamePhase::Countdown,
                FrozenPhase::Playing => GamePhase::Playing,
            },
            (GamePhase::RoundOver, ControlEvent::Advance) => advance_target,
            // Everything else is a defined no-op
            (phase, _) => phase,
        }
    }

    /// Whether simulation updates run this phase
    #[inline]
    pub fn simulating(self) -> bool {
        matches!(self, GamePhase::Playing)
    }
}

/// Complete game state for one Bullet Bounce match
#[derive(Debug, Clone)]
pub struct GameState {
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub players: [Player; 2],
    pub arena: Arena,
    /// Current round, 1-based
    pub round: u32,
    /// Rounds won per player slot
    pub round_wins: [u32; 2],
    /// Seconds left on the pre-round countdown
    pub countdown_timer: f32,
    /// Seconds left in the round
    pub round_timer: f32,
    /// Seconds until the round-over banner auto-advances
    pub round_over_timer: f32,
    /// Winner of the round just ended (None on a tied timeout)
    pub round_winner: Option<PlayerId>,
    /// Winner of the match (None while running, or on a drawn match)
    pub match_winner: Option<PlayerId>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Set by the quit input; the launcher tears the game down
    pub exit_requested: bool,
}

impl GameState {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let [(p1_pos, p1_angle), (p2_pos, p2_angle)] = Self::spawn_points(&tuning);
        Self {
            seed,
            tuning,
            phase: GamePhase::Countdown,
            players: [
                Player::new(PlayerId::One, p1_pos, p1_angle, &tuning),
                Player::new(PlayerId::Two, p2_pos, p2_angle, &tuning),
            ],
            arena: Arena::new(tuning, seed),
            round: 1,
            round_wins: [0, 0],
            countdown_timer: tuning.countdown_time,
            round_timer: tuning.round_time,
            round_over_timer: 0.0,
            round_winner: None,
            match_winner: None,
            time_ticks: 0,
            exit_requested: false,
        }
    }

    /// Round-start spawns: facing each other across the arena
    fn spawn_points(tuning: &Tuning) -> [(Vec2, f32); 2] {
        let w = tuning.arena_width;
        let h = tuning.arena_height;
        [
            (Vec2::new(w / 4.0, h / 2.0), 0.0),
            (Vec2::new(w * 3.0 / 4.0, h / 2.0), std::f32::consts::PI),
        ]
    }

    /// End the current round. `winner` is None on a tied timeout, which
    /// credits neither player.
    pub fn end_round(&mut self, winner: Option<PlayerId>) {
        if let Some(id) = winner {
            self.round_wins[id.index()] += 1;
        }
        self.round_winner = winner;
        self.round_over_timer = self.tuning.round_over_delay;
        self.phase = GamePhase::RoundOver;
    }

    /// What leaving RoundOver leads to: the next round's countdown, or the
    /// end of the match
    pub fn advance_target(&self) -> GamePhase {
        let needed = self.tuning.wins_needed();
        if self.round_wins.iter().any(|&w| w >= needed) || self.round >= self.tuning.best_of {
            GamePhase::MatchOver
        } else {
            GamePhase::Countdown
        }
    }

    /// Leave RoundOver: start the next round or finish the match
    pub fn leave_round_over(&mut self) {
        debug_assert_eq!(self.phase, GamePhase::RoundOver);
        match self.advance_target() {
            GamePhase::MatchOver => {
                self.phase = GamePhase::MatchOver;
                self.match_winner = match self.round_wins[0].cmp(&self.round_wins[1]) {
                    std::cmp::Ordering::Greater => Some(PlayerId::One),
                    std::cmp::Ordering::Less => Some(PlayerId::Two),
                    std::cmp::Ordering::Equal => None,
                };
            }
            _ => {
                self.round += 1;
                self.reset_round();
            }
        }
    }

    /// Reset per-round entity state and enter the countdown
    pub fn reset_round(&mut self) {
        let spawns = Self::spawn_points(&self.tuning);
        for (player, (pos, angle)) in self.players.iter_mut().zip(spawns) {
            player.reset(pos, angle, &self.tuning);
        }
        self.arena.reset_round();
        self.round_timer = self.tuning.round_time;
        self.countdown_timer = self.tuning.countdown_time;
        self.round_winner = None;
        self.phase = GamePhase::Countdown;
    }

    #[inline]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    #[inline]
    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id.index()]
    }

    /// Read-only view for the presentation layer
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::of(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_PHASES: [GamePhase; 6] = [
        GamePhase::Countdown,
        GamePhase::Playing,
        GamePhase::Paused {
            from: FrozenPhase::Countdown,
        },
        GamePhase::Paused {
            from: FrozenPhase::Playing,
        },
        GamePhase::RoundOver,
        GamePhase::MatchOver,
    ];

    const ALL_EVENTS: [ControlEvent; 3] = [
        ControlEvent::PauseToggle,
        ControlEvent::Advance,
        ControlEvent::Quit,
    ];

    /// Full (phase, event) table: every pair has exactly the expected
    /// deterministic successor.
    #[test]
    fn test_control_transitions_are_total() {
        use ControlEvent::*;
        use GamePhase::*;

        let target = Countdown; // advance target used for RoundOver
        for phase in ALL_PHASES {
            for event in ALL_EVENTS {
                let next = phase.apply_control(event, target);
                let expected = match (phase, event) {
                    (Countdown, PauseToggle) => Paused {
                        from: FrozenPhase::Countdown,
                    },
                    (Playing, PauseToggle) => Paused {
                        from: FrozenPhase::Playing,
                    },
                    (Paused { from: FrozenPhase::Countdown }, PauseToggle) => Countdown,
                    (Paused { from: FrozenPhase::Playing }, PauseToggle) => Playing,
                    (RoundOver, Advance) => target,
                    (p, _) => p,
                };
                assert_eq!(next, expected, "({phase:?}, {event:?})");
            }
        }
    }

    #[test]
    fn test_simulating_only_while_playing() {
        for phase in ALL_PHASES {
            assert_eq!(phase.simulating(), phase == GamePhase::Playing);
        }
    }

    #[test]
    fn test_pause_roundtrip_preserves_origin() {
        for from in [FrozenPhase::Countdown, FrozenPhase::Playing] {
            let start = match from {
                FrozenPhase::Countdown => GamePhase::Countdown,
                FrozenPhase::Playing => GamePhase::Playing,
            };
            let paused = start.apply_control(ControlEvent::PauseToggle, GamePhase::Countdown);
            let resumed = paused.apply_control(ControlEvent::PauseToggle, GamePhase::Countdown);
            assert_eq!(resumed, start);
        }
    }

    #[test]
    fn test_match_over_when_wins_reached() {
        let mut s = GameState::new(1, Tuning::default());
        s.round_wins = [1, 1];
        s.round = 3;
        s.end_round(Some(PlayerId::One));
        assert_eq!(s.advance_target(), GamePhase::MatchOver);
        s.leave_round_over();
        assert_eq!(s.phase, GamePhase::MatchOver);
        assert_eq!(s.match_winner, Some(PlayerId::One));
    }

    #[test]
    fn test_next_round_after_single_win() {
        let mut s = GameState::new(1, Tuning::default());
        s.phase = GamePhase::Playing;
        s.player_mut(PlayerId::One).score = 5;
        s.end_round(Some(PlayerId::One));
        assert_eq!(s.round_wins, [1, 0]);
        s.leave_round_over();
        assert_eq!(s.phase, GamePhase::Countdown);
        assert_eq!(s.round, 2);
        // Round-local state reset
        assert_eq!(s.player(PlayerId::One).score, 0);
        assert!(s.arena.bullets.is_empty());
        assert!((s.round_timer - s.tuning.round_time).abs() < 1e-5);
    }

    #[test]
    fn test_tied_timeout_credits_no_one() {
        let mut s = GameState::new(1, Tuning::default());
        s.end_round(None);
        assert_eq!(s.round_wins, [0, 0]);
        assert_eq!(s.round_winner, None);
    }

    #[test]
    fn test_drawn_match_has_no_winner() {
        let mut s = GameState::new(1, Tuning::default());
        s.round = 3;
        s.round_wins = [1, 1];
        s.end_round(None);
        s.leave_round_over();
        assert_eq!(s.phase, GamePhase::MatchOver);
        assert_eq!(s.match_winner, None);
    }
}
