//! Configuration data types for the host.
//!
//! Every section is optional, so an empty file (or no file at all) yields a working
//! environment with the random-key source in front of the process environment.

use randomkey_core::RandomKeyOptions;
use serde::Deserialize;

/// Root of the TOML configuration file.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct HostConfig {
    /// Options for the random-key source, see [`RandomKeyOptions`].
    #[serde(default)]
    pub random_key: RandomKeyOptions,
    #[serde(default)]
    pub environment: EnvironmentConfig,
    /// Static properties, flattened into dotted names. Values may contain placeholders.
    #[serde(default)]
    pub properties: toml::Table,
    #[serde(default)]
    pub demo: DemoConfig,
}

/// Composition of the property-source chain.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct EnvironmentConfig {
    /// Whether process environment variables are consulted.
    #[serde(default = "do_include_system_environment")]
    pub system_environment: bool,
    /// Where the random-key source sits in the chain.
    #[serde(default)]
    pub random_key_position: SourcePosition,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            system_environment: do_include_system_environment(),
            random_key_position: SourcePosition::default(),
        }
    }
}

const fn do_include_system_environment() -> bool {
    true
}

/// Placement of the random-key source relative to the other sources.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SourcePosition {
    /// Ahead of every other source.
    #[default]
    First,
    /// Directly after the system environment, or first if that source is disabled.
    AfterSystemEnvironment,
    /// Behind every other source.
    Last,
}

/// Settings for the `demo-service` command.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    #[serde(default = "default_demo_port")]
    pub port: u16,
    #[serde(default = "default_demo_bind")]
    pub bind: String,
    /// Template resolved once at startup and served as `value1`.
    #[serde(default = "default_value1")]
    pub value1: String,
    /// Template resolved once at startup and served as `value2`.
    #[serde(default = "default_value2")]
    pub value2: String,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            port: default_demo_port(),
            bind: default_demo_bind(),
            value1: default_value1(),
            value2: default_value2(),
        }
    }
}

const fn default_demo_port() -> u16 {
    8080
}

fn default_demo_bind() -> String {
    "127.0.0.1".to_string()
}

fn default_value1() -> String {
    "${randomKey.key}".to_string()
}

fn default_value2() -> String {
    "${randomKey.key[16]}".to_string()
}
