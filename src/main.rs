use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use movie_recs::{
    api::{cors_layer, create_router, AppState},
    config::Config,
    db::Snapshot,
    services::{MetadataProvider, TmdbProvider},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("movie_recs=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    // Snapshot problems are fatal: nothing can be served without it
    let snapshot = Snapshot::load(&config.catalog_path, &config.similarity_path)
        .context("Failed to load movie snapshot")?;

    let provider = TmdbProvider::from_config(&config).context("Failed to build TMDB client")?;
    if provider.has_credentials() {
        tracing::info!(provider = provider.name(), "Metadata provider configured");
    } else {
        tracing::warn!("TMDB_API_KEY not set; serving placeholder metadata");
    }

    let state = AppState::from_config(&config, Arc::new(snapshot), Arc::new(provider));
    let app = create_router(state).layer(cors_layer(&config.cors_origins)?);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(address = %addr, "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
