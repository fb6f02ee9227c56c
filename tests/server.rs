//! HTTP surface tests.

use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use chat_room::http::HttpServer;
use chat_room::lifecycle::Shutdown;
use http_body_util::BodyExt;
use tower::ServiceExt;

mod common;

#[tokio::test]
async fn ping_over_tcp_returns_pong() {
    let dir = tempfile::tempdir().unwrap();
    let config = common::test_config(&dir);
    let db = common::open_db(&config).await;
    let shutdown = Shutdown::new();
    let (addr, _handle) = common::spawn_server(config, db, &shutdown).await;

    let res = common::http_client()
        .get(format!("http://{}/ping", addr))
        .send()
        .await
        .expect("server unreachable");

    assert_eq!(res.status(), 200);
    assert!(res.headers().contains_key("x-request-id"));
    assert_eq!(
        res.headers().get("content-type").unwrap(),
        "application/json"
    );
    assert_eq!(res.text().await.unwrap(), r#"{"message":"pong"}"#);

    shutdown.trigger();
}

#[tokio::test]
async fn repeated_pings_are_identical() {
    let dir = tempfile::tempdir().unwrap();
    let config = common::test_config(&dir);
    let db = common::open_db(&config).await;
    let router = HttpServer::new(config, db).router();

    for _ in 0..5 {
        let res = router
            .clone()
            .oneshot(Request::get("/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = res.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], br#"{"message":"pong"}"#);
    }
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let config = common::test_config(&dir);
    let db = common::open_db(&config).await;
    let router = HttpServer::new(config, db).router();

    let res = router
        .oneshot(Request::get("/api/messages").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn ping_rejects_other_methods() {
    let dir = tempfile::tempdir().unwrap();
    let config = common::test_config(&dir);
    let db = common::open_db(&config).await;
    let router = HttpServer::new(config, db).router();

    let res = router
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/ping")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn incoming_request_id_is_propagated() {
    let dir = tempfile::tempdir().unwrap();
    let config = common::test_config(&dir);
    let db = common::open_db(&config).await;
    let router = HttpServer::new(config, db).router();

    let res = router
        .oneshot(
            Request::get("/ping")
                .header("x-request-id", "trace-me-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.headers().get("x-request-id").unwrap(), "trace-me-123");
}

#[tokio::test]
async fn shutdown_stops_server() {
    let dir = tempfile::tempdir().unwrap();
    let config = common::test_config(&dir);
    let db = common::open_db(&config).await;
    let shutdown = Shutdown::new();
    let (addr, handle) = common::spawn_server(config, db, &shutdown).await;
    common::wait_until_ready(addr).await;

    shutdown.trigger();

    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server did not stop")
        .unwrap();
    assert!(result.is_ok());
    assert!(tokio::net::TcpStream::connect(addr).await.is_err());
}
