//! Game state and core simulation types
//!
//! `GameState` is the single authoritative store for one match. Other parts of
//! the simulation mutate it only through the methods defined here and in the
//! sibling `physics`/`ai` modules.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use crate::consts::*;
use crate::{centered_paddle_y, clamp_paddle_y};

/// Current phase of a match, derived from the running/ended flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Nothing started yet
    Idle,
    /// Active gameplay
    Running,
    /// Match finished
    Ended,
}

/// Which side won the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Player,
    Computer,
}

impl Winner {
    pub fn as_str(&self) -> &'static str {
        match self {
            Winner::Player => "player",
            Winner::Computer => "computer",
        }
    }

    /// End-of-game text shown to the player
    pub fn message(&self) -> &'static str {
        match self {
            Winner::Player => "You win!",
            Winner::Computer => "Computer wins!",
        }
    }
}

/// Read-only copy of every state attribute
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub running: bool,
    pub ended: bool,
    pub player_score: u32,
    pub computer_score: u32,
    pub ball_x: f32,
    pub ball_y: f32,
    pub ball_speed_x: f32,
    pub ball_speed_y: f32,
    pub player_paddle_y: f32,
    pub computer_paddle_y: f32,
    pub last_tick_time: f64,
}

/// Complete match state (serializable)
///
/// `ball` is the top-left corner of the ball's square, paddle values are the
/// paddle's top edge. Paddles always stay inside the board; the ball may sit
/// past the left/right edge for the tick in which a point is scored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) running: bool,
    pub(crate) ended: bool,
    pub(crate) player_score: u32,
    pub(crate) computer_score: u32,
    /// Ball top-left position
    pub(crate) ball: Vec2,
    /// Ball velocity in units per baseline frame
    pub(crate) ball_vel: Vec2,
    pub(crate) player_paddle_y: f32,
    pub(crate) computer_paddle_y: f32,
    /// Timestamp of the previous tick (ms)
    pub(crate) last_tick_time: f64,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            running: false,
            ended: false,
            player_score: 0,
            computer_score: 0,
            ball: Vec2::new(390.0, 240.0),
            ball_vel: Vec2::new(BALL_BASE_SPEED, BALL_BASE_SPEED),
            player_paddle_y: centered_paddle_y(),
            computer_paddle_y: centered_paddle_y(),
            last_tick_time: 0.0,
        }
    }
}

/// Top-left ball position that centers it on the board
fn centered_ball() -> Vec2 {
    Vec2::new(
        BOARD_WIDTH / 2.0 - BALL_SIZE / 2.0,
        BOARD_HEIGHT / 2.0 - BALL_SIZE / 2.0,
    )
}

impl GameState {
    /// Create a fresh, idle match with a random serve
    pub fn new<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        let mut state = Self::default();
        state.initialize_game(true, rng);
        state
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            running: self.running,
            ended: self.ended,
            player_score: self.player_score,
            computer_score: self.computer_score,
            ball_x: self.ball.x,
            ball_y: self.ball.y,
            ball_speed_x: self.ball_vel.x,
            ball_speed_y: self.ball_vel.y,
            player_paddle_y: self.player_paddle_y,
            computer_paddle_y: self.computer_paddle_y,
            last_tick_time: self.last_tick_time,
        }
    }

    pub fn phase(&self) -> GamePhase {
        if self.running {
            GamePhase::Running
        } else if self.ended {
            GamePhase::Ended
        } else {
            GamePhase::Idle
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn player_score(&self) -> u32 {
        self.player_score
    }

    pub fn computer_score(&self) -> u32 {
        self.computer_score
    }

    /// Recenter ball and paddles and pick a new serve
    ///
    /// Scores are cleared only when `new_game` is set. The serve has a fixed
    /// horizontal speed with a random sign and a vertical speed drawn from
    /// [-4, 0) or [0, 4) depending on a second random sign.
    pub fn initialize_game<R: RandomSource + ?Sized>(&mut self, new_game: bool, rng: &mut R) {
        self.ball = centered_ball();
        self.player_paddle_y = centered_paddle_y();
        self.computer_paddle_y = centered_paddle_y();

        if new_game {
            self.player_score = 0;
            self.computer_score = 0;
        }

        let speed_x = BALL_BASE_SPEED * rng.pick_sign(1.0, -1.0);
        let base_y = rng.in_span(-2.0, 4.0);
        let speed_y = base_y + rng.pick_sign(2.0, -2.0);
        self.ball_vel = Vec2::new(speed_x, speed_y);
    }

    /// Begin a match; a finished match is wiped first
    pub fn start_game<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        if self.is_game_over() {
            self.player_score = 0;
            self.computer_score = 0;
        }

        self.running = true;
        self.ended = false;
        self.initialize_game(false, rng);

        log::info!("Match started ({} - {})", self.player_score, self.computer_score);
    }

    /// Freeze the match in its terminal state
    pub fn end_game(&mut self) {
        self.running = false;
        self.ended = true;
    }

    /// Serve again after a point
    ///
    /// Does nothing unless a match is running. The serve heads toward the
    /// player when the computer leads, otherwise toward the computer.
    /// Returns true when the point just scored won the match.
    pub fn reset_ball<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> bool {
        if !self.running || self.ended {
            return false;
        }

        self.ball = centered_ball();
        let direction = if self.computer_score > self.player_score {
            -1.0
        } else {
            1.0
        };
        self.ball_vel = Vec2::new(BALL_BASE_SPEED * direction, rng.in_span(-2.0, 4.0));

        if self.is_game_over() {
            self.ended = true;
            self.running = false;
            log::info!("Match over: {} - {}", self.player_score, self.computer_score);
            return true;
        }

        false
    }

    pub fn increase_player_score<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> bool {
        self.player_score += 1;
        log::debug!("Player scores ({} - {})", self.player_score, self.computer_score);
        self.reset_ball(rng)
    }

    pub fn increase_computer_score<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> bool {
        self.computer_score += 1;
        log::debug!("Computer scores ({} - {})", self.player_score, self.computer_score);
        self.reset_ball(rng)
    }

    pub fn is_game_over(&self) -> bool {
        self.player_score >= WINNING_SCORE || self.computer_score >= WINNING_SCORE
    }

    /// Winner of the match, if any. The player is checked first.
    pub fn winner(&self) -> Option<Winner> {
        if self.player_score >= WINNING_SCORE {
            Some(Winner::Player)
        } else if self.computer_score >= WINNING_SCORE {
            Some(Winner::Computer)
        } else {
            None
        }
    }

    pub fn set_player_paddle_y(&mut self, y: f32) {
        self.player_paddle_y = clamp_paddle_y(y);
    }

    pub fn move_player_paddle_up(&mut self) {
        self.set_player_paddle_y(self.player_paddle_y - PADDLE_SPEED);
    }

    pub fn move_player_paddle_down(&mut self) {
        self.set_player_paddle_y(self.player_paddle_y + PADDLE_SPEED);
    }

    pub fn last_tick_time(&self) -> f64 {
        self.last_tick_time
    }

    pub fn set_last_tick_time(&mut self, time: f64) {
        self.last_tick_time = time;
    }
}
