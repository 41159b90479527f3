use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::api::{self, AppState};
use super::db::{DbHandle, ReferenceDb};
use super::resolver::Resolver;
use crate::config::{FallbackConfig, PlantdeskConfig};

/// Configuration for the reference-data server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub dev_mode: bool,
    pub fallback: FallbackConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from(&PlantdeskConfig::default())
    }
}

impl From<&PlantdeskConfig> for ServerConfig {
    fn from(config: &PlantdeskConfig) -> Self {
        Self {
            host: config.server.host.clone(),
            port: config.server.port,
            db_path: config.server.db_path.clone(),
            dev_mode: config.server.cors_permissive,
            fallback: config.fallback.clone(),
        }
    }
}

/// Build the full application router.
pub fn build_router(state: Arc<AppState>) -> Router {
    api::api_router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Open the database at `path`, creating parent directories as needed.
pub fn open_database(path: &Path) -> Result<ReferenceDb> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).context("Failed to create database directory")?;
    }
    ReferenceDb::new(path).context("Failed to initialize reference database")
}

/// Wrap the outcome of opening the database in a store handle. A failed
/// open is logged and yields a handle whose reads fail, so every kind is
/// served from its fallback collection.
pub fn store_handle(opened: Result<ReferenceDb>, path: &Path) -> DbHandle {
    match opened {
        Ok(db) => DbHandle::new(db),
        Err(e) => {
            tracing::error!(
                db_path = %path.display(),
                error = %format!("{:#}", e),
                "reference database unavailable, serving fallback collections"
            );
            DbHandle::unavailable(format!("{:#}", e))
        }
    }
}

/// Start the server and run until Ctrl+C.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    let store = store_handle(open_database(&config.db_path), &config.db_path);
    let store_available = store.is_available();
    let resolver = Resolver::new(Arc::new(store), &config.fallback);
    let state = Arc::new(AppState { resolver });

    let mut app = build_router(state);
    if config.dev_mode {
        app = app.layer(CorsLayer::permissive());
    }

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    let local_addr = listener.local_addr()?;
    tracing::info!(
        addr = %local_addr,
        db_path = %config.db_path.display(),
        store_available,
        "plantdesk listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
