//! Error types for the random-key property source.

use core::num::ParseIntError;

use thiserror::Error as ThisError;

/// Errors surfaced by [`crate::PropertySource::lookup`].
///
/// A name that simply is not claimed by a source is not an error; it is reported as `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum LookupError {
    /// The name has the shape of a sized key request, but its length token is not a
    /// non-negative decimal integer.
    #[error("Invalid key length '{token}' in property name '{name}'")]
    BadName {
        name: String,
        token: String,
        #[source]
        source: ParseIntError,
    },
}

/// Construction-time precondition violations.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ConfigError {
    #[error("Alphabet must contain at least one character")]
    EmptyAlphabet,
    #[error("Property prefix must not be empty")]
    EmptyPrefix,
    #[error("Property prefix '{0}' must end with '.'")]
    UnterminatedPrefix(String),
    #[error("Property source name must not be empty")]
    EmptySourceName,
}
