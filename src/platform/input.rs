//! Input capture
//!
//! Keys are tracked as held/released so paddle motion is continuous while a
//! key is down. Start requests (space bar or a click) are one-shot.

use crate::sim::tick::TickInput;

pub use crate::pointer_paddle_y;

/// Keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Start,
    Other,
}

impl Key {
    /// Map a DOM-style key name
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowUp" => Key::Up,
            "ArrowDown" => Key::Down,
            " " | "Space" | "Spacebar" => Key::Start,
            _ => Key::Other,
        }
    }
}

/// Held keys plus a pending start request
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyState {
    up: bool,
    down: bool,
    start_requested: bool,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the key asked for a (re)start
    pub fn key_down(&mut self, key: Key) -> bool {
        match key {
            Key::Up => self.up = true,
            Key::Down => self.down = true,
            Key::Start => {
                self.start_requested = true;
                return true;
            }
            Key::Other => {}
        }
        false
    }

    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Up => self.up = false,
            Key::Down => self.down = false,
            _ => {}
        }
    }

    /// Pointer click on the start control
    pub fn request_start(&mut self) {
        self.start_requested = true;
    }

    /// Consume the pending start request, if any
    pub fn take_start_request(&mut self) -> bool {
        std::mem::take(&mut self.start_requested)
    }

    pub fn tick_input(&self) -> TickInput {
        TickInput {
            move_up: self.up,
            move_down: self.down,
        }
    }
}
