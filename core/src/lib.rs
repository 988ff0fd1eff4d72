//! Random-key property source for configuration layers.
//!
//! A [`RandomKeySource`] claims property names under a reserved prefix (`randomKey.` by
//! default) and answers them with freshly generated random strings:
//!
//! - `randomKey.key` yields 64 characters,
//! - `randomKey.key[N]` yields `N` characters,
//! - any other name yields `Ok(None)`, so the host moves on to its next source.
//!
//! The crate provides:
//! - The [`PropertySource`] contract hosts resolve lookups against
//! - Name classification ([`grammar`]) and string generation ([`generator`])
//! - Seedable generators behind the [`RandomSource`] capability ([`rng`])
#![cfg_attr(
    test,
    expect(clippy::indexing_slicing, reason = "This is not problematic in tests",)
)]

extern crate core;

pub mod alphabet;
pub mod error;
pub mod generator;
pub mod grammar;
pub mod options;
pub mod rng;
pub mod source;

pub use alphabet::{Alphabet, BALANCED_ALPHABET, REFERENCE_ALPHABET};
pub use error::{ConfigError, LookupError};
pub use generator::{DEFAULT_KEY_LENGTH, Generator};
pub use grammar::{Grammar, GrammarMode, KeyRequest};
pub use options::{DEFAULT_PREFIX, DEFAULT_SOURCE_NAME, RandomKeyOptions};
pub use rng::{Lcg48, RandomSource, RngKind};
pub use source::{PropertySource, RandomKeySource};
