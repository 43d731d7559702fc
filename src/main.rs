// src/main.rs
//
// bookshelf server binary

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use bookshelf::application::{create_router, AppState};
use bookshelf::config::{AppConfig, Cli};
use bookshelf::db::{
    create_connection_pool, get_connection, initialize_database, verify_database_integrity,
};
use bookshelf::integrations::{BookCatalogGateway, GoogleBooksClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from(Cli::parse());

    // 1. LOGGING
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. INFRASTRUCTURE
    let pool = Arc::new(
        create_connection_pool(&config.database).context("failed to open database")?,
    );

    // Initialize schema (idempotent), then check the file once before serving
    {
        let conn = get_connection(&pool)?;
        initialize_database(&conn).context("failed to initialize database schema")?;
        verify_database_integrity(&conn).context("database integrity check failed")?;
    }

    let gateway: Arc<dyn BookCatalogGateway> = Arc::new(
        GoogleBooksClient::new(&config.gateway).context("failed to build Google Books client")?,
    );
    if config.gateway.api_key.is_none() {
        tracing::warn!("No Google Books API key configured; requests use the anonymous quota");
    }

    // 3. APPLICATION STATE & ROUTES
    let state = AppState::new(pool, gateway, &config);
    let router = create_router(state, &config.server);

    // 4. SERVE
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("invalid listen address")?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!("bookshelf listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("bookshelf stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
