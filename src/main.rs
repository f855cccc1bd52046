mod actor_framework;
mod app_system;
mod clients;
mod domain;
mod http;
mod order_actor;
mod product_actor;
mod session_actor;

#[cfg(test)]
mod mock_framework;

use crate::app_system::{setup_tracing, Config, OrderSystem, SeedData};
use crate::http::AppState;
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting coir order service");

    // Create the entire order system (starts all actors)
    let system = OrderSystem::new(&config);

    if let Some(path) = &config.seed_file {
        SeedData::from_file(path)?.apply(&system).await?;
    }

    let app = http::router(AppState::from_system(&system));
    let addr = config.bind_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router and its client clones are gone; the actors can drain.
    system.shutdown().await.map_err(anyhow::Error::msg)?;

    info!("Application stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
