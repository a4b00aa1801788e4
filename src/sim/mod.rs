//! Deterministic simulation module
//!
//! All gameplay logic lives here. Given the same random draws, frame
//! timestamps and input, a match plays out identically:
//! - Seeded or scripted RNG only
//! - No rendering or platform dependencies beyond the capability traits

pub mod ai;
pub mod collision;
pub mod physics;
pub mod rng;
pub mod state;
pub mod tick;

pub use collision::{
    CollisionOutcome, PointScored, check_collisions, keep_ball_in_bounds, resolve_collisions,
};
pub use physics::time_scale;
pub use rng::{RandomSource, ScriptedRng, seeded_rng};
pub use state::{GamePhase, GameState, Snapshot, Winner};
pub use tick::{GameLoop, Renderer, Scheduler, TickHandle, TickInput, TickOutcome, Timer};
