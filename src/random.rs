//! Sources of die faces.
//!
//! The engine never reaches for an ambient generator: it draws every face from
//! a [`RandomSource`] it was given, so tests can substitute a deterministic one.

use std::sync::Mutex;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;


/// A uniform integer generator over an inclusive range.
///
/// Implementations must be usable from any thread. Concurrent draws must not
/// correlate, either because the source keeps no shared state or because it
/// serializes access to it.
pub trait RandomSource: Send + Sync {
    /// Draws an integer uniformly from `low..=high`. Callers guarantee `low <= high`.
    fn random_in(&self, low: u32, high: u32) -> u32;
}


/// Draws from the thread-local generator of the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl ThreadRandom {
    /// Creates the source; it holds no state of its own.
    pub fn new() -> Self {
        Self
    }
}

impl RandomSource for ThreadRandom {
    fn random_in(&self, low: u32, high: u32) -> u32 {
        rand::rng().random_range(low..=high)
    }
}


/// A reproducible generator: two sources built from the same seed yield the same faces.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>
}

impl SeededRandom {
    /// Creates a generator seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self { rng: Mutex::new(StdRng::seed_from_u64(seed)) }
    }
}

impl RandomSource for SeededRandom {
    fn random_in(&self, low: u32, high: u32) -> u32 {
        // a poisoned lock still holds a usable generator
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.random_range(low..=high)
    }
}


/// Always returns the same face, clamped into the requested range.
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub(crate) struct FixedRandom(pub u32);

#[cfg(test)]
impl RandomSource for FixedRandom {
    fn random_in(&self, low: u32, high: u32) -> u32 {
        self.0.clamp(low, high)
    }
}
