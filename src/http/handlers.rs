use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Pong {
    pub message: &'static str,
}

/// Liveness probe.
pub async fn ping() -> Json<Pong> {
    Json(Pong { message: "pong" })
}
