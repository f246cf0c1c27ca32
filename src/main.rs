use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use crate::resolver::HttpMusicResolver;
use crate::secrets::SECRET_MANAGER;
use crate::state::AppState;

mod controllers;
mod error;
mod models;
mod resolver;
mod routers;
mod secrets;
mod state;

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Ctrl+C received, shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(SECRET_MANAGER.get("LOG_LEVEL")))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_target(false).init();

    SECRET_MANAGER.log_configured();

    let resolver = HttpMusicResolver::from_secrets(&SECRET_MANAGER)
        .context("Failed to set up the song URL resolver")?;
    info!("🎵 Resolving song URLs via {}", resolver.endpoint());

    let app = routers::app(AppState::new(Arc::new(resolver)));

    let port = SECRET_MANAGER.get("PORT");
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;

    info!(
        "🎧 Stream backend listening on {} ({})",
        listener.local_addr()?,
        SECRET_MANAGER.get("BACKEND_URL")
    );
    info!("📡 Stream endpoint: /api/stream?songMid={{songMid}}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}
