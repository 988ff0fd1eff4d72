//! Host-side property sources: static configuration values and the process environment.

use std::{collections::BTreeMap, env};

use randomkey_core::{LookupError, PropertySource};

pub const APPLICATION_CONFIG_SOURCE_NAME: &str = "applicationConfig";
pub const SYSTEM_ENVIRONMENT_SOURCE_NAME: &str = "systemEnvironment";

/// Fixed name/value pairs, typically the `[properties]` table of the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapPropertySource {
    name: String,
    values: BTreeMap<String, String>,
}

impl MapPropertySource {
    #[must_use]
    pub fn new(name: impl Into<String>, values: BTreeMap<String, String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Flattens a TOML table into dotted property names.
    ///
    /// Nested tables join with `.`, array elements are addressed as `name[i]`, and
    /// scalars other than strings use their TOML rendering.
    #[must_use]
    pub fn from_table(name: impl Into<String>, table: &toml::Table) -> Self {
        let mut values = BTreeMap::new();
        for (key, value) in table {
            flatten(key.clone(), value, &mut values);
        }
        Self::new(name, values)
    }

    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn flatten(key: String, value: &toml::Value, out: &mut BTreeMap<String, String>) {
    match *value {
        toml::Value::Table(ref table) => {
            for (child, nested) in table {
                flatten(format!("{key}.{child}"), nested, out);
            }
        }
        toml::Value::Array(ref items) => {
            for (index, item) in items.iter().enumerate() {
                flatten(format!("{key}[{index}]"), item, out);
            }
        }
        toml::Value::String(ref text) => {
            out.insert(key, text.clone());
        }
        ref scalar => {
            out.insert(key, scalar.to_string());
        }
    }
}

impl PropertySource for MapPropertySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookup(&self, property: &str) -> Result<Option<String>, LookupError> {
        Ok(self.values.get(property).cloned())
    }
}

/// Reads properties from process environment variables.
///
/// `server.port` matches `server.port`, `server_port`, `SERVER.PORT` or `SERVER_PORT`,
/// tried in that order. Dashes are treated like dots.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnvironmentSource;

impl PropertySource for SystemEnvironmentSource {
    fn name(&self) -> &str {
        SYSTEM_ENVIRONMENT_SOURCE_NAME
    }

    fn lookup(&self, property: &str) -> Result<Option<String>, LookupError> {
        Ok(candidate_variables(property)
            .into_iter()
            .find_map(|candidate| env::var(candidate).ok()))
    }
}

fn candidate_variables(property: &str) -> Vec<String> {
    let underscored = property.replace(['.', '-'], "_");
    let mut candidates: Vec<String> = Vec::with_capacity(4);
    for candidate in [
        property.to_string(),
        underscored.clone(),
        property.to_uppercase(),
        underscored.to_uppercase(),
    ] {
        // Names the platform cannot hold are never set.
        if candidate.is_empty() || candidate.contains(['=', '\0']) {
            continue;
        }
        if !candidates.contains(&candidate) {
            candidates.push(candidate);
        }
    }
    candidates
}
