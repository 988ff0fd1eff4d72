//! The property-source contract and the random-key implementation of it.

use core::fmt;

use tracing::trace;

use crate::{
    alphabet::Alphabet,
    error::{ConfigError, LookupError},
    generator::{DEFAULT_KEY_LENGTH, Generator},
    grammar::{Grammar, KeyRequest},
    options::RandomKeyOptions,
    rng::RandomSource,
};

/// A named provider that either has a value for a property name or does not.
///
/// Hosts keep an ordered chain of sources and take the first value returned.
pub trait PropertySource: Send + Sync + fmt::Debug {
    /// Name used for diagnostics and for ordering against other sources.
    fn name(&self) -> &str;

    /// Returns the value for `property`, or `Ok(None)` if this source does not provide it.
    ///
    /// # Errors
    ///
    /// Returns an error if the source claims the name but cannot produce a value for it.
    fn lookup(&self, property: &str) -> Result<Option<String>, LookupError>;
}

/// Property source that answers `randomKey.key` and `randomKey.key[N]` with fresh random keys.
///
/// Nothing is cached: every lookup draws a new key.
///
/// ```
/// use randomkey_core::{PropertySource as _, RandomKeySource};
///
/// let source = RandomKeySource::new();
/// let key = source.lookup("randomKey.key[16]").unwrap().unwrap();
/// assert_eq!(key.len(), 16);
/// assert_eq!(source.lookup("server.port").unwrap(), None);
/// ```
#[derive(Debug)]
pub struct RandomKeySource {
    name: String,
    grammar: Grammar,
    generator: Generator,
}

impl RandomKeySource {
    /// Builds a source with default options, seeded from the process.
    #[must_use]
    pub fn new() -> Self {
        let options = RandomKeyOptions::default();
        let source = options.generator.build(None);
        Self {
            grammar: Grammar::new(options.prefix, options.grammar),
            generator: Generator::new(Alphabet::reference(), source),
            name: options.name,
        }
    }

    /// Builds a source from `options`, creating the generator they select.
    ///
    /// # Errors
    ///
    /// Returns an error if the name, prefix or alphabet is invalid.
    pub fn with_options(options: &RandomKeyOptions) -> Result<Self, ConfigError> {
        let source = options.generator.build(options.seed);
        Self::with_random_source(options, source)
    }

    /// Builds a source that draws from `source` instead of the generator selected in `options`.
    ///
    /// # Errors
    ///
    /// Returns an error if the name, prefix or alphabet is invalid.
    pub fn with_random_source(
        options: &RandomKeyOptions,
        source: Box<dyn RandomSource>,
    ) -> Result<Self, ConfigError> {
        let alphabet = options.validate()?;
        Ok(Self {
            name: options.name.clone(),
            grammar: Grammar::new(options.prefix.clone(), options.grammar),
            generator: Generator::new(alphabet, source),
        })
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        self.grammar.prefix()
    }

    #[must_use]
    pub const fn alphabet(&self) -> &Alphabet {
        self.generator.alphabet()
    }

    /// Generates a key of `length` characters without going through name parsing.
    #[must_use]
    pub fn generate(&self, length: usize) -> String {
        self.generator.generate(length)
    }
}

impl Default for RandomKeySource {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertySource for RandomKeySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookup(&self, property: &str) -> Result<Option<String>, LookupError> {
        let length = match self.grammar.classify(property)? {
            KeyRequest::Disowned => return Ok(None),
            KeyRequest::Default => DEFAULT_KEY_LENGTH,
            KeyRequest::Sized(length) => length,
        };
        trace!(property, length, "Generating random property");
        Ok(Some(self.generator.generate(length)))
    }
}
