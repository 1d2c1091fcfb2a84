use std::sync::Arc;

use anyhow::Context;
use server::config::ServerConfig;
use server::router::build_router;
use server::state::AppState;
use simulation::{PopulationStore, SimulationWorld};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::load().context("loading configuration")?;
    let addr = config.listen_addr()?;

    let world = SimulationWorld::from_config(&config.simulation);
    let state = Arc::new(AppState::new(PopulationStore::new(world)));
    state.start_calendar(config.simulation.tick_interval());

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, "genealogy server listening");

    let shutdown_state = Arc::clone(&state);
    axum::serve(listener, build_router(Arc::clone(&state)))
        .with_graceful_shutdown(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("failed to listen for ctrl-c: {e}");
            }
            info!("shutting down");
            shutdown_state.shutdown();
        })
        .await
        .context("serving http")?;

    state.stop_calendar();
    Ok(())
}
