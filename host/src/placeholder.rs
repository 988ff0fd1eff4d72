//! `${name}` and `${name:default}` substitution against an [`Environment`].
//!
//! Placeholder bodies may themselves contain placeholders, which are resolved first.
//! Values pulled from the environment are resolved again until no placeholder remains.

use crate::environment::{Environment, EnvironmentError};

const PLACEHOLDER_PREFIX: &str = "${";
const PLACEHOLDER_SUFFIX: char = '}';
const DEFAULT_SEPARATOR: char = ':';

pub(crate) struct PlaceholderResolver<'env> {
    environment: &'env Environment,
}

impl<'env> PlaceholderResolver<'env> {
    pub(crate) const fn new(environment: &'env Environment) -> Self {
        Self { environment }
    }

    pub(crate) fn resolve(&self, text: &str) -> Result<String, EnvironmentError> {
        self.resolve_text(text, &mut Vec::new())
    }

    pub(crate) fn resolve_property(
        &self,
        property: &str,
    ) -> Result<Option<String>, EnvironmentError> {
        let Some(value) = self.environment.get_property(property)? else {
            return Ok(None);
        };
        let mut visiting = vec![property.to_string()];
        self.resolve_text(&value, &mut visiting).map(Some)
    }

    fn resolve_text(
        &self,
        text: &str,
        visiting: &mut Vec<String>,
    ) -> Result<String, EnvironmentError> {
        let mut resolved = String::with_capacity(text.len());
        let mut rest = text;
        while let Some((before, after)) = rest.split_once(PLACEHOLDER_PREFIX) {
            resolved.push_str(before);
            let end = closing_brace(after)
                .ok_or_else(|| EnvironmentError::UnterminatedPlaceholder(text.to_string()))?;
            let (body, tail) = after.split_at(end);
            resolved.push_str(&self.resolve_placeholder(body, visiting)?);
            rest = tail.strip_prefix(PLACEHOLDER_SUFFIX).unwrap_or(tail);
        }
        resolved.push_str(rest);
        Ok(resolved)
    }

    fn resolve_placeholder(
        &self,
        body: &str,
        visiting: &mut Vec<String>,
    ) -> Result<String, EnvironmentError> {
        let key = self.resolve_text(body, visiting)?;
        if visiting.contains(&key) {
            return Err(EnvironmentError::CircularReference(key));
        }

        let value = match self.environment.get_property(&key)? {
            Some(value) => value,
            None => match key.split_once(DEFAULT_SEPARATOR) {
                Some((name, default)) => self
                    .environment
                    .get_property(name)?
                    .unwrap_or_else(|| default.to_string()),
                None => return Err(EnvironmentError::MissingProperty(key)),
            },
        };

        visiting.push(key);
        let resolved = self.resolve_text(&value, visiting)?;
        visiting.pop();
        Ok(resolved)
    }
}

/// Byte offset of the `}` closing a placeholder whose `${` has already been consumed.
fn closing_brace(body: &str) -> Option<usize> {
    let mut depth = 0_usize;
    let mut previous = 0_u8;
    for (index, byte) in body.bytes().enumerate() {
        match byte {
            b'{' if previous == b'$' => depth += 1,
            b'}' if depth == 0 => return Some(index),
            b'}' => depth -= 1,
            _ => {}
        }
        previous = byte;
    }
    None
}
