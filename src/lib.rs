//! Solo Pong - classic two-paddle Pong against a scripted opponent
//!
//! Core modules:
//! - `sim`: Simulation (state store, ball physics, opponent AI, collisions, loop driver)
//! - `platform`: Host-side helpers (input capture, frame scheduling, delays, logging renderer)

pub mod platform;
pub mod sim;

pub use sim::{GameLoop, GamePhase, GameState, Snapshot, TickInput, TickOutcome, Winner};

/// Game configuration constants
pub mod consts {
    /// Board dimensions
    pub const BOARD_WIDTH: f32 = 800.0;
    pub const BOARD_HEIGHT: f32 = 500.0;

    /// Paddle defaults
    pub const PADDLE_HEIGHT: f32 = 100.0;
    pub const PADDLE_WIDTH: f32 = 15.0;
    /// Gap between a paddle and its side of the board
    pub const PADDLE_INSET: f32 = 20.0;
    /// Distance a paddle moves per key-held tick
    pub const PADDLE_SPEED: f32 = 8.0;

    /// Ball defaults (ball is a square of this side length)
    pub const BALL_SIZE: f32 = 20.0;
    /// Horizontal serve speed
    pub const BALL_BASE_SPEED: f32 = 5.0;
    /// Paddle hits stop speeding the ball up once |vx| reaches this
    pub const BALL_MAX_SPEED_X: f32 = 15.0;
    /// Vertical speed when the ball strikes the very edge of a paddle
    pub const BALL_MAX_SPEED_Y: f32 = 7.0;
    /// Speed boost when ball hits paddle (multiplicative)
    pub const BALL_SPEED_GROWTH: f32 = 1.05;

    /// Points needed to win a match
    pub const WINNING_SCORE: u32 = 5;

    /// Nominal frame time in milliseconds (60 updates per second)
    pub const BASELINE_FRAME_MS: f32 = 16.67;

    /// Opponent AI tuning
    /// Probability per tick that the opponent reacts at all
    pub const COMPUTER_DIFFICULTY: f32 = 0.85;
    /// Aim error is drawn uniformly from [-AI_AIM_ERROR, AI_AIM_ERROR)
    pub const AI_AIM_ERROR: f32 = 20.0;
    /// Fraction of PADDLE_SPEED used while tracking the ball
    pub const AI_TRACKING_FACTOR: f32 = 0.7;
    pub const AI_TRACKING_DEADBAND: f32 = 10.0;
    /// Drift step back toward center while the ball moves away
    pub const AI_RECENTER_STEP: f32 = 2.0;
    pub const AI_RECENTER_DEADBAND: f32 = 50.0;

    /// Start control labels
    pub const LABEL_RESTART: &str = "Restart Game";
    pub const LABEL_NEW_GAME: &str = "New Game";
}

use consts::{BOARD_HEIGHT, PADDLE_HEIGHT};

/// Clamp a paddle's top edge to [0, BOARD_HEIGHT - PADDLE_HEIGHT]
#[inline]
pub fn clamp_paddle_y(y: f32) -> f32 {
    y.clamp(0.0, BOARD_HEIGHT - PADDLE_HEIGHT)
}

/// Top edge that vertically centers a paddle on the board
#[inline]
pub fn centered_paddle_y() -> f32 {
    BOARD_HEIGHT / 2.0 - PADDLE_HEIGHT / 2.0
}

/// Paddle top that centers the paddle on a pointer at `relative_y`
///
/// Only pointers strictly inside the board's vertical extent count.
pub fn pointer_paddle_y(relative_y: f32) -> Option<f32> {
    if relative_y > 0.0 && relative_y < BOARD_HEIGHT {
        Some(clamp_paddle_y(relative_y - PADDLE_HEIGHT / 2.0))
    } else {
        None
    }
}
