//! Injectable randomness.
//!
//! Every resolver draws through [`RandomSource`] so tests can script the exact
//! sequence of outcomes. Each draw carries a short reason string that shows up in
//! test output and in panics when a scripted sequence runs dry.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use schema::Nature;
use strum::EnumCount;

pub trait RandomSource {
    /// Uniform float in `[0, 1)`.
    fn next_unit(&mut self, reason: &str) -> f64;

    /// Uniform integer in `[min, max]`, derived from a unit draw.
    fn next_int(&mut self, min: i32, max: i32, reason: &str) -> i32 {
        if max <= min {
            return min;
        }
        let span = (max - min + 1) as f64;
        let offset = (self.next_unit(reason) * span).floor() as i32;
        min + offset.min(max - min)
    }

    /// True with probability `chance`.
    fn chance(&mut self, chance: f64, reason: &str) -> bool {
        self.next_unit(reason) < chance
    }
}

/// Production source backed by `rand`'s standard generator.
#[derive(Debug, Clone)]
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    pub fn from_os() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible source, used by simulations that need stable statistics.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for StdRandom {
    fn next_unit(&mut self, _reason: &str) -> f64 {
        self.rng.random::<f64>()
    }
}

/// A fixed list of unit outcomes, consumed in order.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    outcomes: Vec<f64>,
    index: usize,
    repeat: bool,
}

impl ScriptedRng {
    pub fn new_for_test(outcomes: Vec<f64>) -> Self {
        Self {
            outcomes,
            index: 0,
            repeat: false,
        }
    }

    /// Returns `value` for every draw.
    pub fn constant(value: f64) -> Self {
        Self {
            outcomes: vec![value],
            index: 0,
            repeat: true,
        }
    }

    pub fn consumed(&self) -> usize {
        self.index
    }
}

impl RandomSource for ScriptedRng {
    fn next_unit(&mut self, reason: &str) -> f64 {
        let outcome = if self.repeat {
            self.outcomes[self.index % self.outcomes.len()]
        } else {
            match self.outcomes.get(self.index) {
                Some(&outcome) => outcome,
                None => panic!(
                    "ScriptedRng exhausted! Tried to get a value for: '{}'. Need more random values.",
                    reason
                ),
            }
        };

        #[cfg(test)]
        println!("[RNG] Consumed {} for: {}", outcome, reason);

        self.index += 1;
        outcome
    }
}

/// Index picked by a weighted draw. Zero-weight entries are never chosen; `None` when
/// every weight is zero.
pub fn weighted_index(weights: &[f64], rng: &mut dyn RandomSource, reason: &str) -> Option<usize> {
    let total: f64 = weights.iter().filter(|w| **w > 0.0).sum();
    if total <= 0.0 {
        return None;
    }
    let mut remaining = rng.next_unit(reason) * total;
    let mut last_positive = None;
    for (index, &weight) in weights.iter().enumerate() {
        if weight <= 0.0 {
            continue;
        }
        if remaining < weight {
            return Some(index);
        }
        remaining -= weight;
        last_positive = Some(index);
    }
    last_positive
}

/// One of the 25 natures, uniformly.
pub fn random_nature(rng: &mut dyn RandomSource) -> Nature {
    let index = rng.next_int(0, Nature::COUNT as i32 - 1, "nature");
    Nature::from_index(index as usize).unwrap_or_default()
}
