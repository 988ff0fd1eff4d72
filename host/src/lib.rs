//! Library entry for the `randomkey_host` crate.
//!
//! Exposes `inner_main` so the workspace-level binary can call into the host logic.
//!
//! The host composes an [`environment::Environment`] out of the random-key source, the
//! process environment and the `[properties]` table of the config file, then answers
//! lookups, resolves placeholder templates or serves the demo endpoint.

extern crate alloc;
extern crate core;

pub mod cli;
pub mod config;
pub mod demo;
pub mod environment;
mod placeholder;
pub mod sources;
pub mod startup;

use std::{
    env,
    io::{self, Write as _},
    process,
    sync::Once,
};

use eyre::{Result, WrapErr as _};
use tracing::info_span;
use tracing_subscriber::{EnvFilter, fmt::time::ChronoLocal};

use cli::{Cli, Command, LogFormat};

static INIT_TRACING: Once = Once::new();

fn init_tracing(log_format: LogFormat) {
    INIT_TRACING.call_once(move || {
        let default_level = if env::var("RANDOMKEY_INTEGRATION_TEST").is_ok() {
            "error"
        } else {
            "info"
        };

        // stdout carries command output, diagnostics go to stderr
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
            )
            .with_writer(io::stderr)
            .with_timer(ChronoLocal::rfc_3339());

        match log_format {
            LogFormat::Compact => builder.compact().init(),
            LogFormat::Json => builder.json().init(),
            LogFormat::Pretty => builder.pretty().init(),
        }
    });
}

/// The host's main function; can be called from a shim binary.
///
/// Loads the config, builds the property-source chain and dispatches the subcommand.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded, a property or template cannot be
/// resolved, or the demo service fails.
pub async fn inner_main(invocation: Cli) -> Result<()> {
    init_tracing(invocation.log_format);

    let config = config::load_or_default(invocation.config.as_deref()).await?;

    let environment = {
        let startup_span = info_span!(
            "randomkey.startup",
            config = ?invocation.config,
            pid = ?process::id(),
            version = env!("CARGO_PKG_VERSION")
        );
        let _startup_enter = startup_span.enter();
        startup::build_environment(&config)?
    };

    match invocation.command {
        Command::Lookup { names } => {
            let mut stdout = io::stdout().lock();
            for name in &names {
                let value = environment
                    .require_property(name)
                    .wrap_err(format!("Failed to look up '{name}'"))?;
                writeln!(stdout, "{name}={value}")?;
            }
        }
        Command::Resolve { template } => {
            let resolved = environment
                .resolve_placeholders(&template)
                .wrap_err("Failed to resolve template")?;
            writeln!(io::stdout(), "{resolved}")?;
        }
        Command::Sources => {
            let mut stdout = io::stdout().lock();
            for name in environment.source_names() {
                writeln!(stdout, "{name}")?;
            }
        }
        Command::DemoService { port, bind } => {
            demo::run_demo_service(&environment, &config.demo, port, bind.as_deref()).await?;
        }
    }
    Ok(())
}
