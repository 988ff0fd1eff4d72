//! Configuration loading utilities.

use std::path::Path;

use eyre::WrapErr as _;
use tokio::fs;

use crate::config::HostConfig;

/// Reads and parses the host config from a TOML file.
///
/// # Errors
///
/// Returns an error if the config file cannot be read or parsed.
pub async fn load<P: AsRef<Path>>(path: P) -> eyre::Result<HostConfig> {
    let path_ref = path.as_ref();
    let content = fs::read_to_string(path_ref).await.wrap_err(format!(
        "Failed to read config file at: {}",
        path_ref.display()
    ))?;
    let config: HostConfig = toml::from_str(&content).wrap_err(format!(
        "Failed to parse config as TOML at: {}",
        path_ref.display()
    ))?;
    Ok(config)
}

/// Loads the config at `path`, or returns the built-in defaults when no path is given.
///
/// # Errors
///
/// Returns an error if a path is given and [`load`] fails for it.
pub async fn load_or_default(path: Option<&str>) -> eyre::Result<HostConfig> {
    match path {
        Some(path) => load(path).await,
        None => Ok(HostConfig::default()),
    }
}
