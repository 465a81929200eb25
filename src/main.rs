//! Portico HTTP server.
//!
//! Reads `portico.toml` (or the file named by `PORTICO_CONFIG`), loads the
//! demo data when enabled and serves the JSON API until Ctrl-C.

use anyhow::Context;
use portico::app::Services;
use portico::clock::SharedClock;
use portico::config::PorticoConfig;
use portico::http::{AppState, build_router};
use portico::seed::load_demo_data;
use portico::telemetry::init_tracing;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = PorticoConfig::load().context("loading configuration")?;
    init_tracing(&config.logging.default_level)?;

    let clock = SharedClock::system();
    let services = Services::in_memory(&config, &clock).context("building services")?;
    if config.seed.enabled {
        let outcome = load_demo_data(&services)
            .await
            .context("loading demo data")?;
        debug!(?outcome, "seed finished");
    }

    let bind_addr = config.server.bind_addr;
    let state = AppState::new(services, config, clock).context("configuring sessions")?;
    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("binding {bind_addr}"))?;
    info!(%bind_addr, "portico listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;
    info!("portico stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for Ctrl-C");
    }
}
