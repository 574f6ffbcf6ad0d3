//! Fixed timestep simulation tick
//!
//! One call advances the match by one frame. The update order within
//! Playing is fixed and deterministic: input application (movement,
//! rotation, firing) → bullet advancement and wall reflection →
//! bullet–player collision → power-up pickup → power-up countdown →
//! scoring/elimination check → phase transition check.

use glam::Vec2;

use super::geom::circles_overlap;
use super::player::PlayerId;
use super::state::{ControlEvent, GamePhase, GameState};

/// Per-player discrete input for one tick
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerInput {
    /// Movement direction, or none to stand still
    pub movement: Option<Vec2>,
    /// Rotation direction in [-1, 1]
    pub turn: f32,
    /// Fire trigger
    pub shoot: bool,
}

/// Input events for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub players: [PlayerInput; 2],
    /// Pause toggle
    pub pause: bool,
    /// Continue past the round-over banner
    pub advance: bool,
    /// Return to the launcher
    pub quit: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.quit {
        state.exit_requested = true;
    }
    if input.pause {
        let target = state.advance_target();
        state.phase = state.phase.apply_control(ControlEvent::PauseToggle, target);
    }

    match state.phase {
        // Frozen: accept only the pause/quit inputs handled above
        GamePhase::Paused { .. } | GamePhase::MatchOver => return,

        GamePhase::Countdown => {
            state.time_ticks += 1;
            state.countdown_timer -= dt;
            if state.countdown_timer <= 0.0 {
                state.phase = GamePhase::Playing;
            }
            return;
        }

        GamePhase::RoundOver => {
            state.time_ticks += 1;
            state.round_over_timer -= dt;
            if input.advance || state.round_over_timer <= 0.0 {
                state.leave_round_over();
            }
            return;
        }

        GamePhase::Playing => {}
    }

    state.time_ticks += 1;
    state.round_timer -= dt;
    let tuning = state.tuning;

    // Input application: movement and rotation integration
    for id in PlayerId::ALL {
        let pin = input.players[id.index()];
        let player = &mut state.players[id.index()];
        player.tick_cooldown(dt);
        player.apply_movement(pin.movement, dt, &tuning);
        player.apply_turn(pin.turn, dt, &tuning);
    }

    // Firing: bullets spawned this frame advance below like any other
    for id in PlayerId::ALL {
        if !input.players[id.index()].shoot {
            continue;
        }
        let player = &mut state.players[id.index()];
        if player.eliminated() {
            continue;
        }
        let pos = player.pos;
        for angle in player.try_shoot(&tuning) {
            state.arena.spawn_bullet(id, pos, angle);
        }
    }

    // Bullet advancement, wall reflection, defensive despawn
    state.arena.advance_bullets(dt);

    // Bullet–player collision
    resolve_bullet_hits(state);

    // Power-up pickup
    for id in PlayerId::ALL {
        let player = &state.players[id.index()];
        if player.eliminated() {
            continue;
        }
        let pos = player.pos;
        if let Some(kind) = state.arena.check_pickup(pos, tuning.player_radius) {
            state.players[id.index()].apply_power_up(kind, &tuning);
        }
    }

    // Power-up duration countdown/expiry, plus the arena spawn timer
    for player in &mut state.players {
        player.effects.tick(dt);
    }
    state.arena.update_power_ups(dt);

    // Scoring/elimination check, then the phase transition it implies
    check_round_end(state);
}

/// Resolve overlaps between live bullets and players.
///
/// Players are scanned in fixed slot order, so a bullet overlapping both
/// players hits only the first. A bullet never harms its owner. A hit that
/// leaves the target alive scores one point for the shooter; the
/// elimination case is settled by the round-end check afterwards.
fn resolve_bullet_hits(state: &mut GameState) {
    let damage = state.tuning.hit_damage;
    let player_radius = state.tuning.player_radius;
    let mut points = [0u32; 2];

    for bullet in &mut state.arena.bullets {
        for id in PlayerId::ALL {
            if id == bullet.owner {
                continue;
            }
            let target = &mut state.players[id.index()];
            if target.eliminated() {
                continue;
            }
            if circles_overlap(bullet.pos, bullet.radius, target.pos, player_radius) {
                let eliminated = target.take_hit(damage);
                bullet.alive = false;
                if !eliminated {
                    points[bullet.owner.index()] += 1;
                }
                break;
            }
        }
    }

    state.arena.bullets.retain(|b| b.alive);
    for id in PlayerId::ALL {
        state.players[id.index()].score += points[id.index()];
    }
}

/// Round-end conditions, checked in a fixed order: elimination, point
/// threshold, round timer. A tied timeout credits neither player.
fn check_round_end(state: &mut GameState) {
    for id in PlayerId::ALL {
        if state.players[id.index()].eliminated() {
            state.end_round(Some(id.opponent()));
            return;
        }
    }

    for id in PlayerId::ALL {
        if state.players[id.index()].score >= state.tuning.point_threshold {
            state.end_round(Some(id));
            return;
        }
    }

    if state.round_timer <= 0.0 {
        let winner = match state.players[0].score.cmp(&state.players[1].score) {
            std::cmp::Ordering::Greater => Some(PlayerId::One),
            std::cmp::Ordering::Less => Some(PlayerId::Two),
            std::cmp::Ordering::Equal => None,
        };
        state.end_round(winner);
    }
}
