//! Random draws for stochastic spawn parameters.
//!
//! A thin wrapper over [`SmallRng`] with the three operations the scenes
//! need: uniform floats, uniform element picks, and weighted picks.
//!
//! `uniform` interpolates between its two bounds in the order given, so a
//! reversed pair like `uniform(0.6, 0.12)` is accepted and simply draws
//! from the interval written backwards. Spawn rules rely on this.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Source of uniform and weighted random values.
///
/// Not seeded for reproducibility; every instance draws from entropy.
pub struct Random {
    rng: SmallRng,
}

impl Random {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Uniform float in `[a, b)`, interpolating in the order given.
    #[inline]
    pub fn uniform(&mut self, a: f32, b: f32) -> f32 {
        a + self.rng.gen::<f32>() * (b - a)
    }

    /// Uniform float in `[0, b)`.
    #[inline]
    pub fn uniform_to(&mut self, b: f32) -> f32 {
        self.uniform(0.0, b)
    }

    /// Uniformly chosen element of a non-empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        debug_assert!(!items.is_empty());
        let index = self.uniform_to(items.len() as f32) as usize;
        &items[index]
    }

    /// Element chosen with probability proportional to its weight.
    ///
    /// Draws an integer from `[0, total + 1)` and walks the slice
    /// subtracting weights until the remainder dips below the current
    /// weight. The draw range is one wider than the weight sum, so the
    /// walk can exhaust the slice; that path falls back to a uniform
    /// `pick`. Both the widened range and the fallback are part of the
    /// documented behavior and must stay.
    pub fn weighted_pick<'a, T>(&mut self, options: &'a [(T, f32)]) -> &'a T {
        let total: f32 = options.iter().map(|(_, weight)| weight).sum();
        let mut prob = self.uniform(0.0, total + 1.0).floor();

        for (value, weight) in options {
            if prob < *weight {
                return value;
            }
            prob -= weight;
        }

        &self.pick(options).0
    }
}

impl Default for Random {
    fn default() -> Self {
        Self::new()
    }
}
