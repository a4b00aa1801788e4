//! Injectable randomness
//!
//! Every random draw in the simulation goes through [`RandomSource`], so a run
//! can be replayed from a seed or scripted draw-by-draw in tests.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// A source of uniform values in `[0, 1)`
pub trait RandomSource {
    fn next_unit(&mut self) -> f32;

    /// Returns `a` with probability one half (draw > 0.5), else `b`
    fn pick_sign(&mut self, a: f32, b: f32) -> f32 {
        if self.next_unit() > 0.5 { a } else { b }
    }

    /// Uniform value in `[min, min + span)`
    fn in_span(&mut self, min: f32, span: f32) -> f32 {
        self.next_unit() * span + min
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_unit(&mut self) -> f32 {
        (**self).next_unit()
    }
}

impl RandomSource for Pcg32 {
    fn next_unit(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Create the default seeded generator
pub fn seeded_rng(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Replays a fixed list of draws, cycling when it runs out
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScriptedRng {
    values: Vec<f32>,
    cursor: usize,
}

impl ScriptedRng {
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// Number of values drawn so far
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRng {
    fn next_unit(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
