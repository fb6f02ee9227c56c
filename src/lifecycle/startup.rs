//! Startup orchestration.
//!
//! # Responsibilities
//! - Resolve and validate configuration
//! - Connect and migrate the database
//! - Start the optional metrics exporter
//! - Bind the listener and serve until shutdown
//!
//! # Design Decisions
//! - Fail fast: any startup error aborts startup and is returned to `main`
//! - Subsystems initialize in order, not concurrently
//! - Listener binds last (traffic only when the database is ready)

use std::net::{AddrParseError, SocketAddr};
use std::path::Path;

use metrics_exporter_prometheus::BuildError;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{resolve_config, ChatConfig, ConfigError};
use crate::db::{connect_database, Database, DatabaseError};
use crate::http::HttpServer;
use crate::lifecycle::{Shutdown, ShutdownSignal};
use crate::observability::metrics;

/// Every way bringing the service up can fail.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid metrics address: {0}")]
    MetricsAddress(#[from] AddrParseError),

    #[error("failed to install metrics exporter: {0}")]
    Metrics(#[from] BuildError),

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Resolve configuration for startup: `explicit` path, `./chat-room.toml`, or defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<ChatConfig, StartupError> {
    Ok(resolve_config(explicit)?)
}

/// Bind the configured address, logging before the attempt.
pub async fn bind_listener(address: &str) -> Result<TcpListener, StartupError> {
    tracing::info!(address = %address, "Server starting, binding listener");

    TcpListener::bind(address).await.map_err(|source| {
        tracing::error!(address = %address, error = %source, "Failed to bind listener");
        StartupError::Bind {
            address: address.to_string(),
            source,
        }
    })
}

/// Bind `server.bind_address` and serve `/ping` until `shutdown` fires.
pub async fn start_server(
    config: &ChatConfig,
    db: Database,
    shutdown: ShutdownSignal,
) -> Result<(), StartupError> {
    let listener = bind_listener(&config.server.bind_address).await?;

    HttpServer::new(config.clone(), db)
        .run(listener, shutdown)
        .await
        .map_err(StartupError::Serve)
}

fn install_metrics(config: &ChatConfig) -> Result<(), StartupError> {
    let addr: SocketAddr = config.observability.metrics_address.parse()?;
    metrics::init_metrics(addr)?;
    Ok(())
}

/// Full service bootstrap: database, metrics, then the HTTP server.
///
/// The database pool is closed once the server has stopped.
pub async fn run(config: ChatConfig, shutdown: &Shutdown) -> Result<(), StartupError> {
    let server_shutdown = shutdown.subscribe();

    tracing::info!(
        bind_address = %config.server.bind_address,
        database = %config.database.path,
        "Configuration loaded"
    );

    let db = connect_database(&config.database).await?;

    if config.observability.metrics_enabled {
        if let Err(e) = install_metrics(&config) {
            db.close().await;
            return Err(e);
        }
    }

    let result = start_server(&config, db.clone(), server_shutdown).await;
    db.close().await;
    result
}
