//! Random string generation over an [`Alphabet`].

use std::sync::{Mutex, PoisonError};

use crate::{alphabet::Alphabet, rng::RandomSource};

/// Length of a key requested without an explicit size.
pub const DEFAULT_KEY_LENGTH: usize = 64;

/// Upper bound on the capacity reserved before drawing; longer keys grow as they go.
const MAX_RESERVED_CAPACITY: usize = DEFAULT_KEY_LENGTH * 16;

/// Owns one random source and samples alphabet positions from it.
///
/// The source sits behind a mutex that is held for every draw of one string, so concurrent
/// callers each receive a contiguous run of the sequence.
#[derive(Debug)]
pub struct Generator {
    alphabet: Alphabet,
    source: Mutex<Box<dyn RandomSource>>,
}

impl Generator {
    #[must_use]
    pub fn new(alphabet: Alphabet, source: Box<dyn RandomSource>) -> Self {
        Self {
            alphabet,
            source: Mutex::new(source),
        }
    }

    #[must_use]
    pub const fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Produces `length` characters, each drawn independently with replacement.
    ///
    /// Advances the source by exactly `length` draws.
    #[must_use]
    pub fn generate(&self, length: usize) -> String {
        // Draws never leave the source in a broken state, so a poisoned lock is still usable.
        let mut source = self.source.lock().unwrap_or_else(PoisonError::into_inner);
        let bound = self.alphabet.len();
        let mut key = String::with_capacity(length.min(MAX_RESERVED_CAPACITY));
        for _ in 0..length {
            key.push(self.alphabet.pick(source.next_index(bound)));
        }
        key
    }
}
