//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → SetRequestId → Trace → PropagateRequestId → Timeout → metrics
//!     → handlers.rs
//!     → Send to client
//! ```

pub mod handlers;
pub mod server;

pub use server::{AppState, HttpServer};
