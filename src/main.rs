//! Solo Pong headless runner
//!
//! Plays one full match between a simple ball-tracking player and the
//! scripted opponent, driving the loop with simulated 60 Hz frames.
//! Usage: `solo-pong [seed]`

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use solo_pong::consts::*;
use solo_pong::platform::{FrameQueue, Key, KeyState, LogRenderer, DelayTimer};
use solo_pong::sim::{GameLoop, TickOutcome, seeded_rng};

/// Give up on matches that somehow never finish (10 minutes of play)
const MAX_FRAMES: u32 = 60 * 60 * 10;
/// Breather after each point
const POINT_PAUSE: Duration = Duration::from_millis(150);

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0)
        });
    log::info!("Solo Pong (headless) starting with seed {}", seed);

    let mut game = GameLoop::new(FrameQueue::new(), LogRenderer::default(), seeded_rng(seed));
    let mut keys = KeyState::new();
    let mut now = 0.0_f64;

    keys.key_down(Key::Start);
    if keys.take_start_request() {
        game.start(now);
    }

    let mut frames = 0;
    let mut score = (0, 0);
    while let Some(handle) = game.scheduler_mut().pop() {
        frames += 1;
        if frames > MAX_FRAMES {
            log::warn!("Match did not finish after {} frames, stopping", MAX_FRAMES);
            game.stop_loop();
            break;
        }

        steer_player(&mut keys, &game.state().snapshot());
        now += BASELINE_FRAME_MS as f64;

        match game.on_frame(handle, now, &keys.tick_input()) {
            TickOutcome::Continued => {
                let snap = game.state().snapshot();
                if (snap.player_score, snap.computer_score) != score {
                    score = (snap.player_score, snap.computer_score);
                    game.pause(&mut DelayTimer, POINT_PAUSE).wait();
                    game.start_loop();
                }
            }
            TickOutcome::GameOver(winner) => {
                log::info!(
                    "Match finished after {} frames, winner: {}",
                    frames,
                    winner.map(|w| w.as_str()).unwrap_or("none")
                );
                break;
            }
            TickOutcome::Stopped | TickOutcome::Ignored => break,
        }
    }

    match serde_json::to_string_pretty(&game.state().snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to encode final state: {}", e),
    }
}

/// Hold up/down to follow the ball while it approaches the player
fn steer_player(keys: &mut KeyState, snap: &solo_pong::Snapshot) {
    keys.key_up(Key::Up);
    keys.key_up(Key::Down);
    if snap.ball_speed_x >= 0.0 {
        return;
    }

    let paddle_center = snap.player_paddle_y + PADDLE_HEIGHT / 2.0;
    let ball_center = snap.ball_y + BALL_SIZE / 2.0;
    if ball_center < paddle_center - PADDLE_SPEED {
        keys.key_down(Key::Up);
    } else if ball_center > paddle_center + PADDLE_SPEED {
        keys.key_down(Key::Down);
    }
}
