// src/main.rs
mod config;
mod database;
mod dtos;
mod error;
mod extract;
mod handlers;
mod models;
mod repositories;
mod routes;
mod services;
mod state;


use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, StoreBackend};
use crate::repositories::{InMemoryProductStore, PgProductStore, ProductStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    // Pick the persistence store
    let store: Arc<dyn ProductStore> = match &config.store {
        StoreBackend::Postgres { database_url, max_connections } => {
            let pool = database::create_pool(database_url, *max_connections)
                .await
                .context("Failed to create database pool")?;
            Arc::new(PgProductStore::new(pool))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory product store; data is lost on shutdown");
            Arc::new(InMemoryProductStore::with_default_categories())
        }
    };

    let app = routes::app(state::AppState::new(store));

    // Try port..=port+port_search to avoid crash when address is in use
    let listener = {
        let mut bound = None;
        for offset in 0..=config.port_search {
            let port = config.port.saturating_add(offset);
            let addr = SocketAddr::from((config.host, port));
            match TcpListener::bind(addr).await {
                Ok(l) => {
                    bound = Some((l, addr));
                    break;
                }
                Err(e) => tracing::warn!(%addr, error = %e, "Port in use, trying next"),
            }
        }
        let (listener, addr) = bound.with_context(|| {
            format!("Failed to bind to any port starting at {} on {}", config.port, config.host)
        })?;
        tracing::info!("Server running on {}", addr);
        listener
    };

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
