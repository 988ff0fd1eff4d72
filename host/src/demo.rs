//! Demo HTTP service exposing two configuration values built from random-key placeholders.
//!
//! The values are resolved once at startup, so every request sees the same pair until
//! the process restarts.

use alloc::sync::Arc;

use axum::{Json, Router, extract::State, routing};
use eyre::WrapErr as _;
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};

use crate::{
    config::DemoConfig,
    environment::{Environment, EnvironmentError},
};

/// The pair served at `GET /test`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoValues {
    pub value1: String,
    pub value2: String,
}

impl DemoValues {
    /// Resolves both templates of `config` against `environment`.
    ///
    /// # Errors
    ///
    /// Returns an error if either template cannot be resolved.
    pub fn resolve(
        environment: &Environment,
        config: &DemoConfig,
    ) -> Result<Self, EnvironmentError> {
        Ok(Self {
            value1: environment.resolve_placeholders(&config.value1)?,
            value2: environment.resolve_placeholders(&config.value2)?,
        })
    }
}

/// Router serving `values` at `GET /test`.
pub fn router(values: DemoValues) -> Router {
    Router::new()
        .route("/test", routing::get(get_values))
        .with_state(Arc::new(values))
}

async fn get_values(State(values): State<Arc<DemoValues>>) -> Json<DemoValues> {
    Json(DemoValues::clone(&values))
}

/// Run the demo service, with `port` and `bind` overriding the configured address.
///
/// # Errors
///
/// Returns an error if the values cannot be resolved, the address cannot be bound or
/// the server fails.
pub async fn run_demo_service(
    environment: &Environment,
    config: &DemoConfig,
    port: Option<u16>,
    bind: Option<&str>,
) -> eyre::Result<()> {
    let values =
        DemoValues::resolve(environment, config).wrap_err("Failed to resolve demo values")?;

    let addr = format!(
        "{}:{}",
        bind.unwrap_or(&config.bind),
        port.unwrap_or(config.port)
    );
    let listener = TcpListener::bind(&addr)
        .await
        .wrap_err(format!("Failed to bind address {addr}"))?;
    info!("Starting demo service on http://{}", addr);

    axum::serve(listener, router(values).into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("Demo server failed")?;
    info!("Demo service stopped");
    Ok(())
}

/// Completes on SIGTERM or Ctrl-C.
pub(crate) async fn shutdown_signal() {
    #[cfg(unix)]
    {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = signal::ctrl_c() => {}
                }
            }
            Err(err) => {
                warn!(%err, "Failed to install SIGTERM handler, only Ctrl-C stops the service");
                drop(signal::ctrl_c().await);
            }
        }
    }
    #[cfg(not(unix))]
    {
        drop(signal::ctrl_c().await);
    }
}
