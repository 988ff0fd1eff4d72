//! The ordered chain of property sources that configuration lookups resolve against.
//!
//! Sources are consulted front to back and the first one that returns a value wins.

use alloc::sync::Arc;

use randomkey_core::{LookupError, PropertySource};
use thiserror::Error as ThisError;
use tracing::{debug, trace};

use crate::placeholder::PlaceholderResolver;

/// Errors raised while resolving properties against the chain.
#[derive(Debug, ThisError)]
pub enum EnvironmentError {
    #[error("Property source '{source_name}' failed to resolve '{property}'")]
    Source {
        source_name: String,
        property: String,
        #[source]
        cause: LookupError,
    },
    #[error("No property source named '{0}' is registered")]
    UnknownSource(String),
    #[error("Property source '{0}' cannot be positioned relative to itself")]
    SelfRelative(String),
    #[error("Could not resolve placeholder '{0}'")]
    MissingProperty(String),
    #[error("Unterminated placeholder in '{0}'")]
    UnterminatedPlaceholder(String),
    #[error("Circular placeholder reference to '{0}'")]
    CircularReference(String),
}

/// Ordered, name-unique collection of property sources.
#[derive(Debug, Default, Clone)]
pub struct Environment {
    sources: Vec<Arc<dyn PropertySource>>,
}

impl Environment {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `source` with highest precedence, replacing any source of the same name.
    pub fn add_first(&mut self, source: Arc<dyn PropertySource>) {
        self.remove(source.name());
        self.sources.insert(0, source);
    }

    /// Registers `source` with lowest precedence, replacing any source of the same name.
    pub fn add_last(&mut self, source: Arc<dyn PropertySource>) {
        self.remove(source.name());
        self.sources.push(source);
    }

    /// Registers `source` directly after the source named `anchor`.
    ///
    /// # Errors
    ///
    /// Returns an error if `anchor` is not registered or names `source` itself.
    pub fn add_after(
        &mut self,
        anchor: &str,
        source: Arc<dyn PropertySource>,
    ) -> Result<(), EnvironmentError> {
        if anchor == source.name() {
            return Err(EnvironmentError::SelfRelative(anchor.to_string()));
        }
        if !self.contains(anchor) {
            return Err(EnvironmentError::UnknownSource(anchor.to_string()));
        }
        self.remove(source.name());
        let index = self
            .position(anchor)
            .ok_or_else(|| EnvironmentError::UnknownSource(anchor.to_string()))?;
        self.sources.insert(index + 1, source);
        Ok(())
    }

    /// Removes and returns the source named `name`, if registered.
    pub fn remove(&mut self, name: &str) -> Option<Arc<dyn PropertySource>> {
        let index = self.position(name)?;
        Some(self.sources.remove(index))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Names of the registered sources, in lookup order.
    pub fn source_names(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(|source| source.name())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.sources.iter().position(|source| source.name() == name)
    }

    /// Returns the raw value of the first source that provides `property`.
    ///
    /// # Errors
    ///
    /// Returns an error if a source claims the name but fails to produce a value.
    pub fn get_property(&self, property: &str) -> Result<Option<String>, EnvironmentError> {
        for source in &self.sources {
            match source.lookup(property) {
                Ok(Some(value)) => {
                    debug!(property, source = source.name(), "Resolved property");
                    return Ok(Some(value));
                }
                Ok(None) => {}
                Err(cause) => {
                    return Err(EnvironmentError::Source {
                        source_name: source.name().to_string(),
                        property: property.to_string(),
                        cause,
                    });
                }
            }
        }
        trace!(property, "No source provides property");
        Ok(None)
    }

    /// Like [`Self::get_property`], but with placeholders in the value resolved.
    ///
    /// # Errors
    ///
    /// Returns an error if a source fails or a placeholder in the value cannot be resolved.
    pub fn get_resolved_property(
        &self,
        property: &str,
    ) -> Result<Option<String>, EnvironmentError> {
        PlaceholderResolver::new(self).resolve_property(property)
    }

    /// Like [`Self::get_resolved_property`], but a missing property is an error.
    ///
    /// # Errors
    ///
    /// Returns [`EnvironmentError::MissingProperty`] if no source provides `property`.
    pub fn require_property(&self, property: &str) -> Result<String, EnvironmentError> {
        self.get_resolved_property(property)?
            .ok_or_else(|| EnvironmentError::MissingProperty(property.to_string()))
    }

    /// Replaces every `${name}` or `${name:default}` placeholder in `text`.
    ///
    /// # Errors
    ///
    /// Returns an error for unterminated or circular placeholders, or for a placeholder
    /// without default that no source provides.
    pub fn resolve_placeholders(&self, text: &str) -> Result<String, EnvironmentError> {
        PlaceholderResolver::new(self).resolve(text)
    }
}
