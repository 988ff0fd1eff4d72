//! Assembles the property-source chain from a [`HostConfig`].

use alloc::sync::Arc;

use eyre::WrapErr as _;
use randomkey_core::{PropertySource, RandomKeySource};
use tracing::{debug, info};

use crate::{
    config::{HostConfig, SourcePosition},
    environment::Environment,
    sources::{
        APPLICATION_CONFIG_SOURCE_NAME, MapPropertySource, SYSTEM_ENVIRONMENT_SOURCE_NAME,
        SystemEnvironmentSource,
    },
};

/// Builds the environment: process variables, then the `[properties]` table, with the
/// random-key source inserted at the configured position.
///
/// # Errors
///
/// Returns an error if the `[random_key]` options are invalid.
pub fn build_environment(config: &HostConfig) -> eyre::Result<Environment> {
    let mut environment = Environment::new();

    if config.environment.system_environment {
        environment.add_last(Arc::new(SystemEnvironmentSource));
    }
    if !config.properties.is_empty() {
        let properties =
            MapPropertySource::from_table(APPLICATION_CONFIG_SOURCE_NAME, &config.properties);
        debug!(count = properties.len(), "Loaded static properties");
        environment.add_last(Arc::new(properties));
    }

    let random_key: Arc<dyn PropertySource> = Arc::new(
        RandomKeySource::with_options(&config.random_key)
            .wrap_err("Invalid [random_key] configuration")?,
    );
    match config.environment.random_key_position {
        SourcePosition::First => environment.add_first(random_key),
        SourcePosition::Last => environment.add_last(random_key),
        SourcePosition::AfterSystemEnvironment
            if environment.contains(SYSTEM_ENVIRONMENT_SOURCE_NAME) =>
        {
            environment
                .add_after(SYSTEM_ENVIRONMENT_SOURCE_NAME, random_key)
                .wrap_err("Failed to position the random-key source")?;
        }
        SourcePosition::AfterSystemEnvironment => environment.add_first(random_key),
    }

    info!(
        sources = ?environment.source_names().collect::<Vec<_>>(),
        "Property sources registered"
    );
    Ok(environment)
}
