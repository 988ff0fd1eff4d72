//! Pseudo-random sources behind the [`RandomSource`] capability.
//!
//! None of these are cryptographically secure, and they are not meant to be.

use core::fmt;

use rand::{Rng as _, SeedableRng as _, rngs::StdRng};
use serde::Deserialize;

/// Capability to draw uniformly distributed indices.
pub trait RandomSource: Send + fmt::Debug {
    /// Draws an index from `0..bound`. Callers never pass a zero bound.
    fn next_index(&mut self, bound: usize) -> usize;
}

impl RandomSource for StdRng {
    fn next_index(&mut self, bound: usize) -> usize {
        self.random_range(0..bound)
    }
}

impl<S: RandomSource + ?Sized> RandomSource for Box<S> {
    fn next_index(&mut self, bound: usize) -> usize {
        (**self).next_index(bound)
    }
}

const LCG_MULTIPLIER: u64 = 0x0005_DEEC_E66D;
const LCG_ADDEND: u64 = 0xB;
const LCG_MASK: u64 = (1 << 48) - 1;

/// 48-bit linear congruential generator.
///
/// Produces the same sequence as `java.util.Random` for a given seed, including its
/// bounded-int rejection step, so seeded keys equal the ones a JVM produces for that seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lcg48 {
    state: u64,
}

impl Lcg48 {
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self {
            state: (seed ^ LCG_MULTIPLIER) & LCG_MASK,
        }
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "The state is masked to 48 bits, so at most 32 bits remain after the shift"
    )]
    fn next_bits(&mut self, bits: u32) -> i32 {
        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_ADDEND)
            & LCG_MASK;
        (self.state >> (48 - bits)) as i32
    }

    /// Draws from `0..bound`. `bound` must be positive.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "bound * r >> 31 is always below bound"
    )]
    pub fn next_int(&mut self, bound: i32) -> i32 {
        let mut r = self.next_bits(31);
        let m = bound.wrapping_sub(1);
        if bound & m == 0 {
            return ((i64::from(bound) * i64::from(r)) >> 31) as i32;
        }
        let mut u = r;
        loop {
            r = u % bound;
            // Overflow here marks a draw from the biased tail; retry.
            if u.wrapping_sub(r).wrapping_add(m) >= 0 {
                return r;
            }
            u = self.next_bits(31);
        }
    }
}

impl RandomSource for Lcg48 {
    fn next_index(&mut self, bound: usize) -> usize {
        // Alphabets never approach i32::MAX symbols.
        let bound = i32::try_from(bound).unwrap_or(i32::MAX).max(1);
        usize::try_from(self.next_int(bound)).unwrap_or_default()
    }
}

/// Selects the generator backing a random-key source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RngKind {
    /// [`StdRng`] from the `rand` crate.
    #[default]
    Std,
    /// [`Lcg48`], for keys matching the `java.util.Random` sequence of the same seed.
    Lcg48,
}

impl RngKind {
    /// Creates the generator, seeded with `seed` or from the thread-local generator.
    #[must_use]
    pub fn build(self, seed: Option<u64>) -> Box<dyn RandomSource> {
        match (self, seed) {
            (Self::Std, Some(seed)) => Box::new(StdRng::seed_from_u64(seed)),
            (Self::Std, None) => Box::new(StdRng::from_os_rng()),
            (Self::Lcg48, Some(seed)) => Box::new(Lcg48::new(seed)),
            (Self::Lcg48, None) => Box::new(Lcg48::new(rand::rng().random())),
        }
    }
}

/// Replays a fixed list of indices, for tests that need exact control over draws.
#[cfg(test)]
#[derive(Debug)]
pub(crate) struct ScriptedSource {
    indices: Vec<usize>,
    position: usize,
}

#[cfg(test)]
impl ScriptedSource {
    pub(crate) fn new(indices: &[usize]) -> Self {
        Self {
            indices: indices.to_vec(),
            position: 0,
        }
    }
}

#[cfg(test)]
impl RandomSource for ScriptedSource {
    fn next_index(&mut self, bound: usize) -> usize {
        let index = self.indices[self.position % self.indices.len()];
        self.position += 1;
        assert!(index < bound, "scripted index {index} out of bound {bound}");
        index
    }
}
