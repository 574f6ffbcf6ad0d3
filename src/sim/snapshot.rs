//! Read-only per-frame view for the presentation layer
//!
//! Everything the UI needs to draw a frame, with no way to reach back into
//! the simulation. Serializable so the launcher can treat all games
//! uniformly.

use glam::Vec2;
use serde::Serialize;

use super::arena::PowerUpKind;
use super::player::PlayerId;
use super::state::{FrozenPhase, GamePhase, GameState};

/// An active effect on a player
#[derive(Debug, Clone, Serialize)]
pub struct EffectView {
    pub kind: PowerUpKind,
    pub remaining: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub pos: Vec2,
    pub angle: f32,
    pub health: i32,
    pub score: u32,
    pub effects: Vec<EffectView>,
    /// Whether the next hit will be absorbed
    pub shield_ready: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BulletView {
    pub owner: PlayerId,
    pub pos: Vec2,
    /// Past positions, newest first
    pub trail: Vec<Vec2>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PowerUpView {
    pub kind: PowerUpKind,
    pub pos: Vec2,
}

/// One frame's worth of game state, read-only
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub round: u32,
    pub best_of: u32,
    pub round_wins: [u32; 2],
    /// Seconds left in the round
    pub time_remaining: f32,
    /// Seconds left on the countdown (0 unless counting down, paused
    /// mid-countdown included)
    pub countdown_remaining: f32,
    pub round_winner: Option<PlayerId>,
    pub match_winner: Option<PlayerId>,
    pub players: [PlayerView; 2],
    pub bullets: Vec<BulletView>,
    pub power_ups: Vec<PowerUpView>,
}

impl Snapshot {
    pub(super) fn of(state: &GameState) -> Self {
        let players = [PlayerId::One, PlayerId::Two].map(|id| {
            let p = state.player(id);
            PlayerView {
                id,
                pos: p.pos,
                angle: p.angle,
                health: p.health.max(0),
                score: p.score,
                effects: p
                    .effects
                    .active()
                    .into_iter()
                    .map(|(kind, remaining)| EffectView { kind, remaining })
                    .collect(),
                shield_ready: p.effects.shield_absorb,
            }
        });

        Self {
            phase: state.phase,
            round: state.round,
            best_of: state.tuning.best_of,
            round_wins: state.round_wins,
            time_remaining: state.round_timer.max(0.0),
            countdown_remaining: match state.phase {
                GamePhase::Countdown
                | GamePhase::Paused {
                    from: FrozenPhase::Countdown,
                } => state.countdown_timer.max(0.0),
                _ => 0.0,
            },
            round_winner: state.round_winner,
            match_winner: state.match_winner,
            players,
            bullets: state
                .arena
                .bullets
                .iter()
                .map(|b| BulletView {
                    owner: b.owner,
                    pos: b.pos,
                    trail: b.trail.clone(),
                })
                .collect(),
            power_ups: state
                .arena
                .power_ups
                .iter()
                .map(|p| PowerUpView {
                    kind: p.kind,
                    pos: p.pos,
                })
                .collect(),
        }
    }
}
