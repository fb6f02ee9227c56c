//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! chat-room.toml (or --config <PATH>, or built-in defaults)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ChatConfig (validated, immutable)
//!     → shared via Arc with the HTTP layer
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, resolve_config, ConfigError};
pub use schema::ChatConfig;
pub use schema::DatabaseConfig;
pub use schema::ObservabilityConfig;
pub use schema::ServerConfig;
pub use validation::ValidationError;
