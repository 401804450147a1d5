//! Kontak server binary.
//!
//! Single long-running process: load config, open the contact database,
//! build the router, serve until the host stops us.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::ServiceExt;
use kontak::{app, AppState, Config};
use kontak_core::{SessionStore, SqliteContactStore};

/// Initialize tracing with an environment filter, INFO by default,
/// writing to stderr.
fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing subscriber: {e}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    let config = Config::load().context("failed to load configuration")?;

    let store = SqliteContactStore::open(&config.database_url)
        .await
        .with_context(|| format!("failed to open database at {}", config.database_url))?;

    let state = AppState {
        store: Arc::new(store),
        sessions: SessionStore::new(config.session_ttl()),
        strict_not_found: config.strict_not_found,
    };

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    tracing::info!(bind = %config.bind, "kontak listening");

    axum::serve(listener, app(state).into_make_service())
        .await
        .context("server error")?;
    Ok(())
}
