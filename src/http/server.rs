//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, request ID, metrics)
//! - Serve on a bound listener until shutdown

use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ChatConfig;
use crate::db::Database;
use crate::http::handlers::ping;
use crate::lifecycle::shutdown::ShutdownSignal;
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Arc<ChatConfig>,
    pub db: Database,
}

/// HTTP server for the chat room.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and database.
    pub fn new(config: ChatConfig, db: Database) -> Self {
        let router = Self::build_router(&config, AppState {
            config: Arc::new(config.clone()),
            db,
        });
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ChatConfig, state: AppState) -> Router {
        Router::new()
            .route("/ping", get(ping))
            .with_state(state)
            .layer(middleware::from_fn(metrics::track_requests))
            .layer(TimeoutLayer::new(Duration::from_secs(config.server.request_timeout_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// A clone of the fully layered router, for driving requests in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until a
    /// shutdown signal arrives.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "Listening for connections");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
