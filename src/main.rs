mod domain;
mod clients;

mod app_system;
mod error;
mod http;

#[cfg(test)]
mod mock_framework;

mod actor_framework;
mod user_actor;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use crate::app_system::{setup_tracing, Config, UserSystem};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Setup tracing once for the entire application
    setup_tracing(config.debug_enabled());
    info!(?config, "Starting user store service");

    // Start the store actor with its seed records
    let system = UserSystem::new();
    let app = http::router(system.user_client.clone());

    let bind = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("Failed to bind to {}", bind))?;
    let local_addr = listener
        .local_addr()
        .context("Failed to get listener address")?;
    info!("listening on http://{}", local_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // The router (and its client clones) is gone once serve returns.
    system.shutdown().await.map_err(anyhow::Error::msg)?;

    info!("Server shutdown complete.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed waiting for Ctrl+C signal");
        std::future::pending::<()>().await;
    }
    info!("Received Ctrl+C, shutting down");
}
