//! # Random Sources
//!
//! All jitter, catalog picks and flicker rolls draw from a [`RandomSource`].
//! Production code uses [`ThreadRandom`]; tests use [`FixedRandom`],
//! [`SequenceRandom`] or [`SeededRandom`] for reproducible runs.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Uniform randomness in `[0, 1)`.
pub trait RandomSource: Send + Sync {
    /// Next uniform sample in `[0, 1)`.
    fn next_f64(&self) -> f64;

    /// Uniform index in `0..n`. Returns 0 when `n` is 0.
    fn below(&self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        let index = (self.next_f64() * n as f64) as usize;
        index.min(n - 1)
    }

    /// True with probability `p`.
    fn chance(&self, p: f64) -> bool {
        self.next_f64() < p
    }
}

/// Thread-local RNG from `rand`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_f64(&self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

/// Deterministic RNG seeded once.
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&self) -> f64 {
        self.rng.lock().gen::<f64>()
    }
}

/// Always returns the same sample.
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom(f64);

impl FixedRandom {
    /// Values outside `[0, 1)` are clamped into range.
    pub fn new(value: f64) -> Self {
        Self(clamp_unit(value))
    }
}

impl RandomSource for FixedRandom {
    fn next_f64(&self) -> f64 {
        self.0
    }
}

/// Replays a scripted sequence of samples, cycling when exhausted.
pub struct SequenceRandom {
    values: Mutex<VecDeque<f64>>,
}

impl SequenceRandom {
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            values: Mutex::new(values.into_iter().map(clamp_unit).collect()),
        }
    }
}

impl RandomSource for SequenceRandom {
    fn next_f64(&self) -> f64 {
        let mut values = self.values.lock();
        match values.pop_front() {
            Some(value) => {
                values.push_back(value);
                value
            }
            None => 0.0,
        }
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0 - f64::EPSILON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_stays_in_range() {
        let almost_one = FixedRandom::new(1.0);
        assert_eq!(almost_one.below(10), 9);
        assert_eq!(FixedRandom::new(0.0).below(10), 0);
        assert_eq!(FixedRandom::new(0.5).below(0), 0);
    }

    #[test]
    fn test_chance() {
        assert!(FixedRandom::new(0.05).chance(0.1));
        assert!(!FixedRandom::new(0.1).chance(0.1));
    }

    #[test]
    fn test_sequence_cycles() {
        let seq = SequenceRandom::new([0.1, 0.2]);
        assert_eq!(seq.next_f64(), 0.1);
        assert_eq!(seq.next_f64(), 0.2);
        assert_eq!(seq.next_f64(), 0.1);
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let a = SeededRandom::new(7);
        let b = SeededRandom::new(7);
        for _ in 0..16 {
            let x = a.next_f64();
            assert_eq!(x, b.next_f64());
            assert!((0.0..1.0).contains(&x));
        }
    }
}
