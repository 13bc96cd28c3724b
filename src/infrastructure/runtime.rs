//! Server lifecycle.

use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{info, warn};

use super::bootstrap::build_state;
use crate::adapter::inbound::http::{router, ApiState};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Serve the HTTP API until Ctrl-C.
pub async fn run(config: Config) -> Result<()> {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received");
        }
        let _ = shutdown_tx.send(true);
    });
    run_with_shutdown(config, shutdown_rx).await
}

/// Serve the HTTP API until `shutdown` flips to `true` or its sender drops.
pub async fn run_with_shutdown(config: Config, shutdown: watch::Receiver<bool>) -> Result<()> {
    let state = build_state(&config);
    serve(&config, state, shutdown).await
}

/// Serve an already wired [`ApiState`].
pub async fn serve(
    config: &Config,
    state: ApiState,
    mut shutdown: watch::Receiver<bool>,
) -> Result<()> {
    let addr = config.server.socket_addr()?;

    if config.repricer.autostart {
        if config.credentials.is_complete() {
            state.repricer.start(None)?;
        } else {
            warn!("Repricer autostart skipped: marketplace credentials are not configured");
        }
    }

    let repricer = state.repricer.clone();
    let app = router(state, config.server.cors_permissive);
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "HTTP API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            while shutdown.changed().await.is_ok() {
                if *shutdown.borrow() {
                    break;
                }
            }
        })
        .await?;

    repricer.stop();
    info!("HTTP API stopped");
    Ok(())
}
