//! Frame scheduling and delays for hosts without their own
//!
//! `FrameQueue` hands out frame handles and keeps them until the host pops
//! them, which is all a headless host or a test needs. `DelayTimer` backs
//! `GameLoop::pause` with a one-shot `crossbeam_channel::after` channel.

use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, TryRecvError};

use crate::sim::tick::{Scheduler, TickHandle, Timer};

/// Manually driven frame scheduler
#[derive(Debug, Default)]
pub struct FrameQueue {
    next_id: u64,
    pending: Vec<TickHandle>,
    last_cancelled: Option<TickHandle>,
    scheduled: usize,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the oldest pending frame so the host can fire it
    pub fn pop(&mut self) -> Option<TickHandle> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }

    pub fn pending(&self) -> &[TickHandle] {
        &self.pending
    }

    /// Most recently cancelled handle
    pub fn last_cancelled(&self) -> Option<TickHandle> {
        self.last_cancelled
    }

    /// Total number of frames ever scheduled
    pub fn scheduled_count(&self) -> usize {
        self.scheduled
    }
}

impl Scheduler for FrameQueue {
    fn schedule_tick(&mut self) -> TickHandle {
        self.next_id += 1;
        self.scheduled += 1;
        let handle = TickHandle(self.next_id);
        self.pending.push(handle);
        handle
    }

    fn cancel_tick(&mut self, handle: TickHandle) {
        self.pending.retain(|h| *h != handle);
        self.last_cancelled = Some(handle);
    }
}

/// Completes once the requested delay has elapsed
#[derive(Debug)]
pub struct PauseSignal {
    rx: Receiver<Instant>,
    done: bool,
}

impl PauseSignal {
    /// Block until the delay has elapsed
    pub fn wait(self) {
        if !self.done {
            let _ = self.rx.recv();
        }
    }

    /// Non-blocking check
    pub fn is_complete(&mut self) -> bool {
        if !self.done {
            self.done = !matches!(self.rx.try_recv(), Err(TryRecvError::Empty));
        }
        self.done
    }
}

/// Delays through crossbeam's timer channel
#[derive(Debug, Clone, Copy, Default)]
pub struct DelayTimer;

impl Timer for DelayTimer {
    type Signal = PauseSignal;

    fn delay(&mut self, duration: Duration) -> PauseSignal {
        PauseSignal {
            rx: crossbeam_channel::after(duration),
            done: false,
        }
    }
}
