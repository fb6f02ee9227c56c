//! Chat Room Server Library

pub mod config;
pub mod db;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::schema::ChatConfig;
pub use db::{connect_database, Database};
pub use http::HttpServer;
pub use lifecycle::{Shutdown, StartupError};
