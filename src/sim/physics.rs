//! Ball motion
//!
//! Integration is scaled by elapsed time so the ball covers the same distance
//! per second regardless of frame rate.

use super::state::GameState;
use crate::consts::*;

/// Convert elapsed milliseconds to a multiple of the baseline frame
///
/// A zero (or non-finite) delta counts as exactly one baseline frame.
#[inline]
pub fn time_scale(delta_ms: Option<f32>) -> f32 {
    match delta_ms {
        Some(dt) if dt != 0.0 && dt.is_finite() => dt / BASELINE_FRAME_MS,
        _ => 1.0,
    }
}

impl GameState {
    /// Advance the ball by its velocity scaled to the elapsed time
    pub fn update_ball_position(&mut self, delta_ms: Option<f32>) {
        let scale = time_scale(delta_ms);
        self.ball += self.ball_vel * scale;
    }

    /// Set vertical speed from where the ball struck a paddle
    ///
    /// Center hits leave the ball flat, edge hits send it off at up to
    /// `BALL_MAX_SPEED_Y`.
    pub fn adjust_ball_angle(&mut self, paddle_y: f32) {
        let impact = (self.ball.y + BALL_SIZE / 2.0) - (paddle_y + PADDLE_HEIGHT / 2.0);
        let ratio = impact / (PADDLE_HEIGHT / 2.0);
        self.ball_vel.y = ratio * BALL_MAX_SPEED_Y;
    }

    /// Speed the ball up after a paddle hit
    ///
    /// The cap only gates the multiply, so |vx| can end up slightly above
    /// `BALL_MAX_SPEED_X` (by less than one growth step).
    pub fn increase_ball_speed(&mut self) {
        if self.ball_vel.x.abs() < BALL_MAX_SPEED_X {
            self.ball_vel.x *= BALL_SPEED_GROWTH;
        }
    }

    pub fn reverse_ball_x(&mut self) {
        self.ball_vel.x = -self.ball_vel.x;
    }

    pub fn reverse_ball_y(&mut self) {
        self.ball_vel.y = -self.ball_vel.y;
    }
}
