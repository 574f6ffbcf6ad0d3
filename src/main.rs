//! Headless Bullet Bounce demo
//!
//! Drives a seeded match with scripted inputs and prints a snapshot line
//! every second of simulated time. Useful for eyeballing the simulation
//! without a presentation layer; set RUST_LOG=debug to watch the spawner.

use glam::Vec2;

use bullet_bounce::consts::SIM_DT;
use bullet_bounce::sim::TickInput;
use bullet_bounce::{ArcadeGame, BulletBounce};

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(2024);
    let mut game = BulletBounce::new(seed);

    // Scripted inputs: both players circle and fire continuously, which
    // exercises wall bounces, hits and power-up pickups
    let mut input = TickInput::default();
    input.players[0].movement = Some(Vec2::new(1.0, 0.4));
    input.players[0].turn = 0.6;
    input.players[0].shoot = true;
    input.players[1].movement = Some(Vec2::new(-1.0, -0.4));
    input.players[1].turn = -0.6;
    input.players[1].shoot = true;

    let frames_per_report = (1.0 / SIM_DT) as u64;
    let max_frames = frames_per_report * 300;

    for frame in 0..max_frames {
        if game.over() {
            break;
        }
        game.update(&input, SIM_DT);

        if frame % frames_per_report == 0 {
            let snap = game.snapshot();
            println!(
                "t={:>3}s phase={} round={} wins={} scores=[{}, {}] bullets={} power_ups={}",
                frame / frames_per_report,
                snap["phase"],
                snap["round"],
                snap["round_wins"],
                snap["players"][0]["score"],
                snap["players"][1]["score"],
                snap["bullets"].as_array().map_or(0, |b| b.len()),
                snap["power_ups"].as_array().map_or(0, |p| p.len()),
            );
        }
    }

    let snap = game.snapshot();
    println!(
        "final: phase={} wins={} match_winner={}",
        snap["phase"], snap["round_wins"], snap["match_winner"]
    );
}
