//! Construction options for [`crate::RandomKeySource`].

use serde::Deserialize;

use crate::{
    alphabet::{Alphabet, REFERENCE_ALPHABET},
    error::ConfigError,
    grammar::GrammarMode,
    rng::RngKind,
};

/// Options recognized when building a random-key source.
///
/// Deserializes from a table in which every field is optional:
///
/// ```
/// # use randomkey_core::{RandomKeyOptions, RngKind};
/// let options: RandomKeyOptions = toml::from_str(
///     r#"
///     seed = 42
///     generator = "lcg48"
///     "#,
/// )
/// .unwrap();
/// assert_eq!(options.seed, Some(42));
/// assert_eq!(options.generator, RngKind::Lcg48);
/// assert_eq!(options.name, "randomKey");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RandomKeyOptions {
    /// Name the source registers under.
    #[serde(default = "default_source_name")]
    pub name: String,
    /// Leading part of every property name the source claims. Must end with `.`.
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Characters to sample from, duplicates included.
    #[serde(default = "default_alphabet")]
    pub alphabet: String,
    /// Fixed seed. When absent the generator is seeded from the process.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub generator: RngKind,
    #[serde(default)]
    pub grammar: GrammarMode,
}

/// Default name of the random-key source.
pub const DEFAULT_SOURCE_NAME: &str = "randomKey";

/// Default prefix claimed by the random-key source.
pub const DEFAULT_PREFIX: &str = "randomKey.";

fn default_source_name() -> String {
    DEFAULT_SOURCE_NAME.to_string()
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

fn default_alphabet() -> String {
    REFERENCE_ALPHABET.to_string()
}

impl Default for RandomKeyOptions {
    fn default() -> Self {
        Self {
            name: default_source_name(),
            prefix: default_prefix(),
            alphabet: default_alphabet(),
            seed: None,
            generator: RngKind::default(),
            grammar: GrammarMode::default(),
        }
    }
}

impl RandomKeyOptions {
    /// Checks the construction preconditions and builds the alphabet.
    pub(crate) fn validate(&self) -> Result<Alphabet, ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::EmptySourceName);
        }
        if self.prefix.is_empty() {
            return Err(ConfigError::EmptyPrefix);
        }
        if !self.prefix.ends_with('.') {
            return Err(ConfigError::UnterminatedPrefix(self.prefix.clone()));
        }
        Alphabet::new(&self.alphabet)
    }
}
