//! Seedable randomness shared by spawning and enemy AI.

use std::f32::consts::TAU;
use std::ops::{Deref, DerefMut};

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Resource, Debug)]
pub struct GameRng(StdRng);

impl GameRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    /// Random heading in `[0, TAU)`.
    pub fn heading(&mut self) -> f32 {
        self.0.gen_range(0.0..TAU)
    }

    /// Uniform value in `[lo, hi]`; a degenerate range returns `lo`.
    pub fn between(&mut self, lo: f32, hi: f32) -> f32 {
        if hi <= lo {
            return lo;
        }
        self.0.gen_range(lo..=hi)
    }

    pub fn chance(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}

impl Deref for GameRng {
    type Target = StdRng;

    fn deref(&self) -> &StdRng {
        &self.0
    }
}

impl DerefMut for GameRng {
    fn deref_mut(&mut self) -> &mut StdRng {
        &mut self.0
    }
}
