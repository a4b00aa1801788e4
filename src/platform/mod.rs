//! Platform abstraction layer
//!
//! Host-side pieces the simulation talks to through its capability traits:
//! - Input capture (held keys, start requests, pointer mapping)
//! - Time (frame scheduling, pause delays)
//! - Rendering sinks that log or record what the view would show

pub mod input;
pub mod time;

pub use input::{Key, KeyState, pointer_paddle_y};
pub use time::{FrameQueue, PauseSignal, DelayTimer};

use crate::sim::{Renderer, Winner};

/// Renderer that reports through the `log` facade (headless hosts)
#[derive(Debug, Default)]
pub struct LogRenderer {
    last_score: (u32, u32),
}

impl Renderer for LogRenderer {
    fn sync_positions(
        &mut self,
        ball_x: f32,
        ball_y: f32,
        player_paddle_y: f32,
        computer_paddle_y: f32,
    ) {
        log::trace!(
            "ball=({:.1}, {:.1}) player={:.1} computer={:.1}",
            ball_x,
            ball_y,
            player_paddle_y,
            computer_paddle_y
        );
    }

    fn sync_score(&mut self, player_score: u32, computer_score: u32) {
        if self.last_score != (player_score, computer_score) {
            log::info!("Score: {} - {}", player_score, computer_score);
            self.last_score = (player_score, computer_score);
        }
    }

    fn set_start_label(&mut self, text: &str) {
        log::debug!("Start control: {}", text);
    }

    fn announce_winner(&mut self, winner: Option<Winner>) {
        let message = winner.unwrap_or(Winner::Computer).message();
        log::info!("{}", message);
    }
}

/// One call made on a [`RenderLog`]
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall {
    Positions {
        ball_x: f32,
        ball_y: f32,
        player_paddle_y: f32,
        computer_paddle_y: f32,
    },
    Score(u32, u32),
    Label(String),
    Winner(Option<Winner>),
}

/// Renderer that records every call, for tests and replays
#[derive(Debug, Clone, Default)]
pub struct RenderLog {
    calls: Vec<RenderCall>,
}

impl RenderLog {
    pub fn calls(&self) -> &[RenderCall] {
        &self.calls
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn last_label(&self) -> Option<&str> {
        self.calls.iter().rev().find_map(|call| match call {
            RenderCall::Label(text) => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn last_score(&self) -> Option<(u32, u32)> {
        self.calls.iter().rev().find_map(|call| match call {
            RenderCall::Score(player, computer) => Some((*player, *computer)),
            _ => None,
        })
    }

    pub fn winners(&self) -> Vec<Option<Winner>> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                RenderCall::Winner(w) => Some(*w),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for RenderLog {
    fn sync_positions(
        &mut self,
        ball_x: f32,
        ball_y: f32,
        player_paddle_y: f32,
        computer_paddle_y: f32,
    ) {
        self.calls.push(RenderCall::Positions {
            ball_x,
            ball_y,
            player_paddle_y,
            computer_paddle_y,
        });
    }

    fn sync_score(&mut self, player_score: u32, computer_score: u32) {
        self.calls.push(RenderCall::Score(player_score, computer_score));
    }

    fn set_start_label(&mut self, text: &str) {
        self.calls.push(RenderCall::Label(text.to_string()));
    }

    fn announce_winner(&mut self, winner: Option<Winner>) {
        self.calls.push(RenderCall::Winner(winner));
    }
}
