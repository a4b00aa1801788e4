//! Scripted opponent
//!
//! The opponent tracks the ball only while it approaches, aims with a random
//! error and sometimes skips a tick entirely to model reaction delay. While
//! the ball moves away it drifts slowly back toward the middle.

use super::rng::RandomSource;
use super::state::GameState;
use crate::consts::*;
use crate::{centered_paddle_y, clamp_paddle_y};

impl GameState {
    /// Move the computer paddle for one tick
    ///
    /// Draws one value for the aim error every tick, then one more for the
    /// reaction roll when the ball is heading toward the computer.
    pub fn update_computer_paddle<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        let paddle_center = self.computer_paddle_y + PADDLE_HEIGHT / 2.0;
        let ball_center = self.ball.y + BALL_SIZE / 2.0;
        let aim_error = rng.in_span(-AI_AIM_ERROR, AI_AIM_ERROR * 2.0);

        if self.ball_vel.x > 0.0 {
            if rng.next_unit() < COMPUTER_DIFFICULTY {
                let target = ball_center + aim_error;
                let step = PADDLE_SPEED * AI_TRACKING_FACTOR;

                if paddle_center < target - AI_TRACKING_DEADBAND {
                    self.computer_paddle_y += step;
                } else if paddle_center > target + AI_TRACKING_DEADBAND {
                    self.computer_paddle_y -= step;
                }
            }
        } else {
            let home = centered_paddle_y();
            if (self.computer_paddle_y - home).abs() > AI_RECENTER_DEADBAND {
                self.computer_paddle_y += if self.computer_paddle_y > home {
                    -AI_RECENTER_STEP
                } else {
                    AI_RECENTER_STEP
                };
            }
        }

        self.computer_paddle_y = clamp_paddle_y(self.computer_paddle_y);
    }
}
