//! Classification of property names into key requests.
//!
//! Names have the shape `<prefix>key` or `<prefix>key[N]`. Everything else under the prefix,
//! and everything outside it, is disowned so the host can consult its next source.

use core::num::ParseIntError;

use serde::Deserialize;

use crate::error::LookupError;

/// Marker that follows the prefix in every claimed name.
pub const KEY_MARKER: &str = "key";

/// What a property name asks of the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRequest {
    /// Not a name this source answers for.
    Disowned,
    /// `<prefix>key`, a key of the default length.
    Default,
    /// `<prefix>key[N]`, a key of exactly `N` characters.
    Sized(usize),
}

/// How strictly the brackets around the length are checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrammarMode {
    /// The character after `key` and the last character of the name are dropped unchecked,
    /// so `key[8]`, `key(8)` and `key_8_` all ask for 8 characters.
    #[default]
    Lax,
    /// Only `key[N]` is accepted; any other suffix is disowned.
    Strict,
}

/// Parser for names under one prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    prefix: String,
    mode: GrammarMode,
}

impl Grammar {
    /// Callers validate the prefix; see [`crate::RandomKeyOptions`].
    #[must_use]
    pub fn new(prefix: impl Into<String>, mode: GrammarMode) -> Self {
        Self {
            prefix: prefix.into(),
            mode,
        }
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[must_use]
    pub const fn mode(&self) -> GrammarMode {
        self.mode
    }

    /// Classifies `name`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::BadName`] if the name carries a length token that is not a
    /// non-negative decimal integer.
    pub fn classify(&self, name: &str) -> Result<KeyRequest, LookupError> {
        let Some(remainder) = name.strip_prefix(self.prefix.as_str()) else {
            return Ok(KeyRequest::Disowned);
        };
        if remainder == KEY_MARKER {
            return Ok(KeyRequest::Default);
        }
        let Some(suffix) = remainder.strip_prefix(KEY_MARKER) else {
            return Ok(KeyRequest::Disowned);
        };
        let payload = match self.mode {
            GrammarMode::Lax => {
                let mut chars = suffix.chars();
                chars.next();
                if chars.next_back().is_none() {
                    return Ok(KeyRequest::Disowned);
                }
                chars.as_str()
            }
            GrammarMode::Strict => {
                match suffix.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
                    Some(payload) => payload,
                    None => return Ok(KeyRequest::Disowned),
                }
            }
        };
        parse_range(name, payload)
    }
}

/// Interprets the comma-separated payload between the brackets.
///
/// The first token is parsed before the token count is checked, so a malformed first token
/// is an error even when more tokens follow.
fn parse_range(name: &str, payload: &str) -> Result<KeyRequest, LookupError> {
    let mut tokens = payload.split(',');
    let first = tokens.next().unwrap_or_default();
    let length = parse_length(first).map_err(|source| LookupError::BadName {
        name: name.to_string(),
        token: first.to_string(),
        source,
    })?;
    if tokens.next().is_some() {
        // Ranges with more than one bound are reserved.
        return Ok(KeyRequest::Disowned);
    }
    Ok(KeyRequest::Sized(length))
}

/// Parses a length with 32-bit signed integer rules, rejecting negatives.
///
/// Tokens above `i32::MAX` fail even though they would fit a `usize`.
fn parse_length(token: &str) -> Result<usize, ParseIntError> {
    // The unsigned parse rejects the sign of values the signed parse accepted.
    let length = token.parse::<i32>().and_then(|_| token.parse::<u32>())?;
    Ok(usize::try_from(length).unwrap_or(usize::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lax() -> Grammar {
        Grammar::new("randomKey.", GrammarMode::Lax)
    }

    fn strict() -> Grammar {
        Grammar::new("randomKey.", GrammarMode::Strict)
    }

    #[test]
    fn names_outside_the_prefix_are_disowned() {
        for name in ["", "other.prop", "randomKey", "randomkey.key", "xrandomKey.key"] {
            assert_eq!(lax().classify(name), Ok(KeyRequest::Disowned), "{name}");
        }
    }

    #[test]
    fn bare_key_is_default() {
        assert_eq!(lax().classify("randomKey.key"), Ok(KeyRequest::Default));
        assert_eq!(strict().classify("randomKey.key"), Ok(KeyRequest::Default));
    }

    #[test]
    fn bracketed_length_is_sized() {
        for grammar in [lax(), strict()] {
            assert_eq!(grammar.classify("randomKey.key[0]"), Ok(KeyRequest::Sized(0)));
            assert_eq!(grammar.classify("randomKey.key[16]"), Ok(KeyRequest::Sized(16)));
            assert_eq!(
                grammar.classify("randomKey.key[10000]"),
                Ok(KeyRequest::Sized(10_000))
            );
        }
    }

    #[test]
    fn other_names_under_the_prefix_are_disowned() {
        for name in ["randomKey.nope", "randomKey.value1", "randomKey.", "randomKey.keys"] {
            assert_eq!(lax().classify(name), Ok(KeyRequest::Disowned), "{name}");
        }
    }

    #[test]
    fn multiple_tokens_are_disowned() {
        assert_eq!(lax().classify("randomKey.key[8,16]"), Ok(KeyRequest::Disowned));
        assert_eq!(lax().classify("randomKey.key[8,abc]"), Ok(KeyRequest::Disowned));
        assert_eq!(lax().classify("randomKey.key[8,]"), Ok(KeyRequest::Disowned));
        assert_eq!(strict().classify("randomKey.key[8,16]"), Ok(KeyRequest::Disowned));
    }

    #[test]
    fn malformed_length_is_bad_name() {
        let err = lax().classify("randomKey.key[abc]").unwrap_err();
        let LookupError::BadName { name, token, .. } = err;
        assert_eq!(name, "randomKey.key[abc]");
        assert_eq!(token, "abc");

        for name in [
            "randomKey.key[-1]",
            "randomKey.key[]",
            "randomKey.key[ 4]",
            "randomKey.key[abc,1]",
            "randomKey.key[99999999999999999999999]",
        ] {
            assert!(
                matches!(lax().classify(name), Err(LookupError::BadName { .. })),
                "{name} should be a bad name"
            );
        }
    }

    #[test]
    fn lax_mode_ignores_the_enclosing_characters() {
        for name in ["randomKey.key(8)", "randomKey.key_8_", "randomKey.key[8}"] {
            assert_eq!(lax().classify(name), Ok(KeyRequest::Sized(8)), "{name}");
        }
        // Anything following `key` is treated as an enclosed length.
        assert!(matches!(
            lax().classify("randomKey.keyring"),
            Err(LookupError::BadName { .. })
        ));
    }

    #[test]
    fn strict_mode_requires_brackets() {
        for name in ["randomKey.key(8)", "randomKey.key_8_", "randomKey.keyring", "randomKey.key[8"] {
            assert_eq!(strict().classify(name), Ok(KeyRequest::Disowned), "{name}");
        }
        assert!(matches!(
            strict().classify("randomKey.key[abc]"),
            Err(LookupError::BadName { .. })
        ));
    }

    #[test]
    fn lengths_stop_at_the_signed_32_bit_ceiling() {
        assert_eq!(
            lax().classify("randomKey.key[2147483647]"),
            Ok(KeyRequest::Sized(2_147_483_647))
        );
        for name in [
            "randomKey.key[2147483648]",
            "randomKey.key[4294967296]",
            "randomKey.key[18446744073709551615]",
        ] {
            assert!(
                matches!(lax().classify(name), Err(LookupError::BadName { .. })),
                "{name} should be a bad name"
            );
        }
    }

    #[test]
    fn leading_plus_is_accepted() {
        assert_eq!(lax().classify("randomKey.key[+5]"), Ok(KeyRequest::Sized(5)));
    }

    #[test]
    fn custom_prefix_is_honoured() {
        let grammar = Grammar::new("secret.", GrammarMode::Lax);
        assert_eq!(grammar.classify("secret.key[3]"), Ok(KeyRequest::Sized(3)));
        assert_eq!(grammar.classify("randomKey.key"), Ok(KeyRequest::Disowned));
        assert_eq!(grammar.prefix(), "secret.");
        assert_eq!(grammar.mode(), GrammarMode::Lax);
    }
}
