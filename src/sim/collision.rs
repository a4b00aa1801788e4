//! Collision detection and scoring
//!
//! Runs once per tick after the ball and paddles have moved. Every check reads
//! the same pre-pass copy of the state, so a velocity flipped by one check
//! does not change what the later checks see.

use super::rng::RandomSource;
use super::state::GameState;
use crate::consts::*;

/// Side that won a point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointScored {
    Player,
    Computer,
}

/// What a resolver pass detected
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionOutcome {
    pub wall_bounce: bool,
    pub player_hit: bool,
    pub computer_hit: bool,
    pub point: Option<PointScored>,
    /// The point just scored won the match
    pub game_ended: bool,
}

/// Ball rect overlaps the paddle rect vertically
#[inline]
fn overlaps_paddle(ball_y: f32, paddle_y: f32) -> bool {
    ball_y + BALL_SIZE >= paddle_y && ball_y <= paddle_y + PADDLE_HEIGHT
}

/// Ball is inside the player's strike zone, moving toward the player
fn in_player_zone(state: &GameState) -> bool {
    let x = state.ball.x;
    x <= PADDLE_WIDTH + PADDLE_INSET
        && x + BALL_SIZE >= PADDLE_INSET
        && overlaps_paddle(state.ball.y, state.player_paddle_y)
        && state.ball_vel.x < 0.0
}

/// Mirror of `in_player_zone` on the computer's side
fn in_computer_zone(state: &GameState) -> bool {
    let x = state.ball.x;
    x + BALL_SIZE >= BOARD_WIDTH - PADDLE_WIDTH - PADDLE_INSET
        && x <= BOARD_WIDTH - PADDLE_INSET
        && overlaps_paddle(state.ball.y, state.computer_paddle_y)
        && state.ball_vel.x > 0.0
}

/// Detect wall, paddle and out-of-bounds events and react to them
///
/// Wall contact only flips the vertical direction; the ball is not moved back
/// inside the board, so it may sit past the top or bottom edge for a tick.
pub fn resolve_collisions<R: RandomSource + ?Sized>(
    state: &mut GameState,
    rng: &mut R,
) -> CollisionOutcome {
    let before = *state;
    let mut outcome = CollisionOutcome::default();

    if before.ball.y <= 0.0 || before.ball.y + BALL_SIZE >= BOARD_HEIGHT {
        state.reverse_ball_y();
        outcome.wall_bounce = true;
    }

    if in_player_zone(&before) {
        state.reverse_ball_x();
        state.adjust_ball_angle(before.player_paddle_y);
        state.increase_ball_speed();
        outcome.player_hit = true;
        log::debug!("Player paddle hit, vx={:.2}", state.ball_vel.x);
    }

    if in_computer_zone(&before) {
        state.reverse_ball_x();
        state.adjust_ball_angle(before.computer_paddle_y);
        state.increase_ball_speed();
        outcome.computer_hit = true;
        log::debug!("Computer paddle hit, vx={:.2}", state.ball_vel.x);
    }

    if before.ball.x + BALL_SIZE < 0.0 {
        outcome.point = Some(PointScored::Computer);
        outcome.game_ended = state.increase_computer_score(rng);
    } else if before.ball.x > BOARD_WIDTH {
        outcome.point = Some(PointScored::Player);
        outcome.game_ended = state.increase_player_score(rng);
    }

    outcome
}

/// Run a resolver pass, returning whether a point ended the match
pub fn check_collisions<R: RandomSource + ?Sized>(state: &mut GameState, rng: &mut R) -> bool {
    resolve_collisions(state, rng).game_ended
}

/// Vertical position the ball would be clamped to, without mutating anything
pub fn keep_ball_in_bounds(state: &GameState) -> f32 {
    let y = state.ball.y;
    if y <= 0.0 {
        0.0
    } else if y + BALL_SIZE >= BOARD_HEIGHT {
        BOARD_HEIGHT - BALL_SIZE
    } else {
        y
    }
}
