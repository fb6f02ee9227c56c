//! Metrics collection and exposition.
//!
//! # Metrics
//! - `chat_http_requests_total` (counter): requests by method, path, status
//! - `chat_http_request_duration_seconds` (histogram): latency by method, path
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; without an installed
//!   exporter the calls are no-ops
//! - Exporter is optional and off by default

use std::net::SocketAddr;
use std::time::Instant;

use axum::{body::Body, extract::MatchedPath, http::Request, middleware::Next, response::Response};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter with its own scrape listener.
///
/// Must be called from within a tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record a completed HTTP request.
pub fn record_request(method: &str, path: &str, status: u16, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status", status.to_string()),
    ];
    metrics::counter!("chat_http_requests_total", &labels).increment(1);
    metrics::histogram!(
        "chat_http_request_duration_seconds",
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Middleware that records every request passing through the router.
///
/// Uses the matched route template so unknown paths collapse into one label.
pub async fn track_requests(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());

    let response = next.run(request).await;
    record_request(&method, &path, response.status().as_u16(), start);
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::get, Router};
    use tower::ServiceExt;

    #[tokio::test]
    async fn middleware_passes_response_through() {
        let app = Router::new()
            .route("/ping", get(|| async { "pong" }))
            .layer(axum::middleware::from_fn(track_requests));

        let res = app
            .oneshot(Request::get("/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), 200);
    }

    #[test]
    fn recording_without_exporter_is_noop() {
        record_request("GET", "/ping", 200, Instant::now());
    }
}
