//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;

use chat_room::config::{ChatConfig, DatabaseConfig};
use chat_room::db::{connect_database, Database};
use chat_room::http::HttpServer;
use chat_room::lifecycle::Shutdown;
use tempfile::TempDir;
use tokio::task::JoinHandle;

/// Config pointing at a database inside `dir` and an ephemeral local port.
pub fn test_config(dir: &TempDir) -> ChatConfig {
    let mut config = ChatConfig::default();
    config.server.bind_address = "127.0.0.1:0".to_string();
    config.database = DatabaseConfig {
        path: dir.path().join("chat.db").to_string_lossy().into_owned(),
        max_connections: 2,
    };
    config
}

/// Open (and migrate) the database configured by `config`.
pub async fn open_db(config: &ChatConfig) -> Database {
    connect_database(&config.database).await.unwrap()
}

/// Grab a free local port. The port is released before returning.
#[allow(dead_code)]
pub fn free_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

/// Start an HTTP server on an ephemeral port.
#[allow(dead_code)]
pub async fn spawn_server(
    config: ChatConfig,
    db: Database,
    shutdown: &Shutdown,
) -> (SocketAddr, JoinHandle<std::io::Result<()>>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config, db);
    let server_shutdown = shutdown.subscribe();

    let handle = tokio::spawn(async move { server.run(listener, server_shutdown).await });
    (addr, handle)
}

/// A client that never reuses connections or honours proxy env vars.
#[allow(dead_code)]
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

/// Poll `GET /ping` until the server answers or the attempts run out.
#[allow(dead_code)]
pub async fn wait_until_ready(addr: SocketAddr) {
    let client = http_client();
    for _ in 0..50 {
        if client.get(format!("http://{}/ping", addr)).send().await.is_ok() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    panic!("server at {} never became ready", addr);
}
