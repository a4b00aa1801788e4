//! Frame-driven game loop
//!
//! The loop never owns a timing source. It asks an injected [`Scheduler`] for
//! the next frame and the host calls [`GameLoop::on_frame`] when that frame
//! fires. At most one frame is pending at any time; frames that were
//! cancelled or superseded are ignored and change nothing.

use std::time::Duration;

use rand_pcg::Pcg32;

use super::collision::check_collisions;
use super::rng::RandomSource;
use super::state::{GameState, Winner};
use crate::consts::{LABEL_NEW_GAME, LABEL_RESTART};
use crate::pointer_paddle_y;

/// Identifies one scheduled frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(pub u64);

/// Host frame scheduler ("run before the next frame")
pub trait Scheduler {
    fn schedule_tick(&mut self) -> TickHandle;
    fn cancel_tick(&mut self, handle: TickHandle);
}

/// Receives everything the view needs after each tick
pub trait Renderer {
    fn sync_positions(
        &mut self,
        ball_x: f32,
        ball_y: f32,
        player_paddle_y: f32,
        computer_paddle_y: f32,
    );
    fn sync_score(&mut self, player_score: u32, computer_score: u32);
    fn set_start_label(&mut self, text: &str);
    fn announce_winner(&mut self, winner: Option<Winner>);
}

/// Delay primitive independent of the frame scheduler
pub trait Timer {
    type Signal;
    fn delay(&mut self, duration: Duration) -> Self::Signal;
}

/// Held-key state for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_up: bool,
    pub move_down: bool,
}

/// What a frame callback did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Handle was stale; nothing happened
    Ignored,
    /// Match not running; loop stopped without advancing
    Stopped,
    /// Advanced one tick and scheduled the next
    Continued,
    /// Advanced one tick and the match is over
    GameOver(Option<Winner>),
}

/// Owns one match and drives it frame by frame
pub struct GameLoop<S, R, G = Pcg32> {
    state: GameState,
    scheduler: S,
    renderer: R,
    rng: G,
    pending: Option<TickHandle>,
}

impl<S: Scheduler, R: Renderer, G: RandomSource> GameLoop<S, R, G> {
    /// Set up an idle match and show its score
    pub fn new(scheduler: S, mut renderer: R, mut rng: G) -> Self {
        let state = GameState::new(&mut rng);
        renderer.sync_score(state.player_score(), state.computer_score());
        Self {
            state,
            scheduler,
            renderer,
            rng,
            pending: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Handle of the frame currently waiting to run
    pub fn pending_tick(&self) -> Option<TickHandle> {
        self.pending
    }

    pub fn is_looping(&self) -> bool {
        self.pending.is_some()
    }

    /// Start or restart a match at host time `now` (ms)
    pub fn start(&mut self, now: f64) {
        self.state.start_game(&mut self.rng);
        self.state.set_last_tick_time(now);

        self.renderer.set_start_label(LABEL_RESTART);
        self.renderer.sync_score(self.state.player_score(), self.state.computer_score());

        self.start_loop();
    }

    /// Schedule the first frame, replacing any frame already pending
    pub fn start_loop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_tick(handle);
        }
        self.pending = Some(self.scheduler.schedule_tick());
    }

    pub fn stop_loop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_tick(handle);
        }
    }

    /// Stop the loop and hand back a signal that completes after `duration`
    pub fn pause<T: Timer>(&mut self, timer: &mut T, duration: Duration) -> T::Signal {
        self.stop_loop();
        log::debug!("Paused for {:?}", duration);
        timer.delay(duration)
    }

    /// Move the player paddle to follow a pointer at `relative_y`
    ///
    /// Positions outside the board are ignored.
    pub fn pointer_moved(&mut self, relative_y: f32) {
        if let Some(y) = pointer_paddle_y(relative_y) {
            self.state.set_player_paddle_y(y);
        }
    }

    /// Run one tick for the frame `handle` firing at `timestamp` (ms)
    pub fn on_frame(
        &mut self,
        handle: TickHandle,
        timestamp: f64,
        input: &TickInput,
    ) -> TickOutcome {
        if self.pending != Some(handle) {
            log::trace!("Ignoring stale frame {:?}", handle);
            return TickOutcome::Ignored;
        }
        self.pending = None;

        if !self.state.is_running() {
            return TickOutcome::Stopped;
        }
        let was_ended = self.state.is_ended();

        let delta = (timestamp - self.state.last_tick_time()) as f32;
        self.state.set_last_tick_time(timestamp);

        if input.move_up {
            self.state.move_player_paddle_up();
        }
        if input.move_down {
            self.state.move_player_paddle_down();
        }

        self.state.update_computer_paddle(&mut self.rng);
        self.state.update_ball_position(Some(delta));

        let ended_by_point = check_collisions(&mut self.state, &mut self.rng);

        self.sync_view();

        if ended_by_point || self.state.is_game_over() {
            let winner = self.state.winner();
            if !was_ended {
                self.state.end_game();
                self.renderer.set_start_label(LABEL_NEW_GAME);
                self.renderer.announce_winner(winner);
                log::info!("Winner: {}", winner.map(|w| w.as_str()).unwrap_or("none"));
            }
            return TickOutcome::GameOver(winner);
        }

        self.pending = Some(self.scheduler.schedule_tick());
        TickOutcome::Continued
    }

    fn sync_view(&mut self) {
        let snap = self.state.snapshot();
        self.renderer.sync_positions(
            snap.ball_x,
            snap.ball_y,
            snap.player_paddle_y,
            snap.computer_paddle_y,
        );
        self.renderer.sync_score(snap.player_score, snap.computer_score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::platform::time::FrameQueue;
    use crate::platform::{RenderCall, RenderLog};
    use crate::sim::rng::ScriptedRng;
    use crate::sim::state::GamePhase;
    use glam::Vec2;

    type TestLoop = GameLoop<FrameQueue, RenderLog, ScriptedRng>;

    /// Records requested delays; its signal is the duration itself
    #[derive(Default)]
    struct ManualTimer {
        requested: Vec<Duration>,
    }

    impl Timer for ManualTimer {
        type Signal = Duration;

        fn delay(&mut self, duration: Duration) -> Duration {
            self.requested.push(duration);
            duration
        }
    }

    fn new_loop() -> TestLoop {
        GameLoop::new(FrameQueue::new(), RenderLog::default(), ScriptedRng::new(vec![0.5]))
    }

    fn started(now: f64) -> TestLoop {
        let mut game = new_loop();
        game.start(now);
        game
    }

    /// Fire the pending frame at `timestamp`
    fn fire(game: &mut TestLoop, timestamp: f64, input: TickInput) -> TickOutcome {
        let handle = game
            .scheduler_mut()
            .pop()
            .expect("a frame should be pending");
        game.on_frame(handle, timestamp, &input)
    }

    #[test]
    fn test_new_loop_is_idle_and_shows_score() {
        let game = new_loop();
        assert_eq!(game.state().phase(), GamePhase::Idle);
        assert!(!game.is_looping());
        assert_eq!(game.renderer().calls(), &[RenderCall::Score(0, 0)]);
    }

    #[test]
    fn test_start_schedules_a_frame() {
        let game = started(1000.0);
        assert!(game.is_looping());
        assert_eq!(game.scheduler().scheduled_count(), 1);
        assert_eq!(game.state().phase(), GamePhase::Running);
        assert_eq!(game.state().last_tick_time(), 1000.0);
        assert_eq!(game.renderer().last_label(), Some(LABEL_RESTART));
    }

    #[test]
    fn test_restart_cancels_pending_frame() {
        let mut game = started(0.0);
        let first = game.pending_tick();
        game.start(10.0);

        assert_eq!(game.scheduler().last_cancelled(), first);
        assert_eq!(game.scheduler().pending().len(), 1);
        assert_ne!(game.pending_tick(), first);
    }

    #[test]
    fn test_stop_without_pending_frame_cancels_nothing() {
        let mut game = new_loop();
        game.stop_loop();
        assert_eq!(game.scheduler().last_cancelled(), None);
    }

    #[test]
    fn test_stop_cancels_and_frame_is_ignored() {
        let mut game = started(0.0);
        let handle = game.pending_tick().unwrap();
        game.stop_loop();
        let before = *game.state();

        assert!(!game.is_looping());
        assert_eq!(game.scheduler().last_cancelled(), Some(handle));
        assert_eq!(game.on_frame(handle, 16.67, &TickInput::default()), TickOutcome::Ignored);
        assert_eq!(*game.state(), before);
    }

    #[test]
    fn test_frame_advances_and_reschedules() {
        let mut game = started(1000.0);
        let start_ball = game.state().ball;
        let vel = game.state().ball_vel;

        let outcome = fire(&mut game, 1000.0 + BASELINE_FRAME_MS as f64, TickInput::default());

        assert_eq!(outcome, TickOutcome::Continued);
        assert_eq!(game.scheduler().scheduled_count(), 2);
        assert!(game.is_looping());
        let moved = game.state().ball - start_ball;
        assert!((moved - vel).length() < 1e-3);
        assert!(matches!(
            game.renderer().calls()[..],
            [.., RenderCall::Positions { .. }, RenderCall::Score(0, 0)]
        ));
    }

    #[test]
    fn test_delta_time_scales_motion() {
        let mut game = started(0.0);
        let start_ball = game.state().ball;
        let vel = game.state().ball_vel;

        fire(&mut game, (BASELINE_FRAME_MS * 3.0) as f64, TickInput::default());

        let moved = game.state().ball - start_ball;
        assert!((moved - vel * 3.0).length() < 1e-3);
        assert_eq!(game.state().last_tick_time(), (BASELINE_FRAME_MS * 3.0) as f64);
    }

    #[test]
    fn test_held_keys_move_player_paddle() {
        let mut game = started(0.0);
        let y = game.state().player_paddle_y;

        fire(&mut game, 16.0, TickInput { move_up: true, move_down: false });
        assert_eq!(game.state().player_paddle_y, y - PADDLE_SPEED);

        fire(&mut game, 32.0, TickInput { move_up: false, move_down: true });
        assert_eq!(game.state().player_paddle_y, y);

        fire(&mut game, 48.0, TickInput { move_up: true, move_down: true });
        assert_eq!(game.state().player_paddle_y, y);
    }

    #[test]
    fn test_frame_when_not_running_stops_loop() {
        let mut game = new_loop();
        game.start_loop();
        let before = *game.state();

        let outcome = fire(&mut game, 16.0, TickInput::default());

        assert_eq!(outcome, TickOutcome::Stopped);
        assert!(!game.is_looping());
        assert_eq!(game.scheduler().scheduled_count(), 1);
        assert_eq!(*game.state(), before);
    }

    #[test]
    fn test_winning_point_ends_match_once() {
        let mut game = started(0.0);
        game.state.player_score = WINNING_SCORE - 1;
        game.state.ball = Vec2::new(810.0, 200.0);
        game.state.ball_vel = Vec2::new(5.0, 0.0);

        let outcome = fire(&mut game, 16.67, TickInput::default());

        assert_eq!(outcome, TickOutcome::GameOver(Some(Winner::Player)));
        assert_eq!(game.state().phase(), GamePhase::Ended);
        assert!(!game.is_looping());
        assert_eq!(game.scheduler().scheduled_count(), 1);
        assert_eq!(game.renderer().last_label(), Some(LABEL_NEW_GAME));
        assert_eq!(game.renderer().winners(), vec![Some(Winner::Player)]);
        assert_eq!(game.renderer().last_score(), Some((WINNING_SCORE, 0)));
    }

    #[test]
    fn test_game_over_without_scoring_point_ends_match() {
        // Score already at threshold while running: the tick still stops
        let mut game = started(0.0);
        game.state.computer_score = WINNING_SCORE;

        let outcome = fire(&mut game, 16.0, TickInput::default());

        assert_eq!(outcome, TickOutcome::GameOver(Some(Winner::Computer)));
        assert!(game.state().is_ended());
        assert_eq!(game.renderer().winners(), vec![Some(Winner::Computer)]);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut game = started(0.0);
        game.state.player_score = WINNING_SCORE - 1;
        game.state.ball = Vec2::new(810.0, 200.0);
        fire(&mut game, 16.0, TickInput::default());
        assert_eq!(game.state().phase(), GamePhase::Ended);

        game.start(5000.0);

        assert_eq!(game.state().phase(), GamePhase::Running);
        assert_eq!(game.state().player_score(), 0);
        assert_eq!(game.state().computer_score(), 0);
        assert_eq!(fire(&mut game, 5016.0, TickInput::default()), TickOutcome::Continued);
    }

    #[test]
    fn test_pointer_moves_paddle_inside_board_only() {
        let mut game = started(0.0);
        game.pointer_moved(300.0);
        assert_eq!(game.state().player_paddle_y, 250.0);

        game.pointer_moved(-10.0);
        assert_eq!(game.state().player_paddle_y, 250.0);
        game.pointer_moved(BOARD_HEIGHT + 1.0);
        assert_eq!(game.state().player_paddle_y, 250.0);

        game.pointer_moved(10.0);
        assert_eq!(game.state().player_paddle_y, 0.0);
    }

    #[test]
    fn test_pause_stops_loop_and_completes() {
        let mut game = started(0.0);
        let handle = game.pending_tick().unwrap();

        let before = *game.state();
        let mut timer = ManualTimer::default();
        let signal = game.pause(&mut timer, Duration::from_millis(20));

        assert_eq!(signal, Duration::from_millis(20));
        assert_eq!(timer.requested, vec![Duration::from_millis(20)]);
        assert!(!game.is_looping());
        assert_eq!(game.scheduler().last_cancelled(), Some(handle));
        assert_eq!(game.on_frame(handle, 16.67, &TickInput::default()), TickOutcome::Ignored);
        assert_eq!(*game.state(), before);
        assert_eq!(game.state().phase(), GamePhase::Running);

        game.start_loop();
        let resumed = game.pending_tick().unwrap();
        assert_ne!(resumed, handle);
        assert_eq!(game.on_frame(resumed, 16.67, &TickInput::default()), TickOutcome::Continued);
    }
}
