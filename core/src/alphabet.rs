//! Sampling alphabets for generated keys.

use core::{fmt, str::FromStr};

use crate::error::ConfigError;

/// Default alphabet. Digits appear three times, so they are drawn more often than letters.
pub const REFERENCE_ALPHABET: &str =
    "0123456789abcdefghijklmnopqrstuvwxyz0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// ASCII digits and letters, each exactly once.
pub const BALANCED_ALPHABET: &str =
    "0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// An immutable, non-empty, ordered sequence of characters.
///
/// Duplicates are kept: a character listed twice is twice as likely to be drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    chars: Box<[char]>,
}

impl Alphabet {
    /// Builds an alphabet from the characters of `symbols`, in order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAlphabet`] if `symbols` is empty.
    pub fn new(symbols: &str) -> Result<Self, ConfigError> {
        if symbols.is_empty() {
            return Err(ConfigError::EmptyAlphabet);
        }
        Ok(Self {
            chars: symbols.chars().collect(),
        })
    }

    /// The reference alphabet, see [`REFERENCE_ALPHABET`].
    #[must_use]
    pub fn reference() -> Self {
        Self {
            chars: REFERENCE_ALPHABET.chars().collect(),
        }
    }

    /// See [`BALANCED_ALPHABET`].
    #[must_use]
    pub fn balanced() -> Self {
        Self {
            chars: BALANCED_ALPHABET.chars().collect(),
        }
    }

    /// Number of positions to sample from. Never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Returns the character at `index`, wrapping indices past the end.
    #[must_use]
    #[expect(
        clippy::indexing_slicing,
        reason = "The index is reduced modulo the length, which is never zero"
    )]
    pub fn pick(&self, index: usize) -> char {
        self.chars[index % self.chars.len()]
    }

    #[must_use]
    pub fn contains(&self, symbol: char) -> bool {
        self.chars.contains(&symbol)
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::reference()
    }
}

impl FromStr for Alphabet {
    type Err = ConfigError;

    fn from_str(symbols: &str) -> Result<Self, Self::Err> {
        Self::new(symbols)
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.chars.iter().try_for_each(|c| write!(f, "{c}"))
    }
}
