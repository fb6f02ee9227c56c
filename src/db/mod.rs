//! Database subsystem.
//!
//! # Data Flow
//! ```text
//! DatabaseConfig.path
//!     → connect_database (open pool, create file if missing)
//!     → MIGRATOR (embedded ./migrations, creates users + messages)
//!     → Database handle (cloneable, stored in AppState)
//! ```
//!
//! # Migrations path
//!
//! `sqlx::migrate!("./migrations")` resolves the path at compile time
//! relative to `CARGO_MANIFEST_DIR`, so the SQL is embedded in the binary and
//! the runtime working directory only matters for `database.path`.
//!
//! # Design Decisions
//! - The handle is returned only after migrations succeed; callers never see
//!   a half-initialized store
//! - Queries use the runtime-checked `sqlx::query` form so no `DATABASE_URL`
//!   is needed at build time

pub mod messages;
pub mod models;
pub mod users;

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use thiserror::Error;

use crate::config::DatabaseConfig;

pub use messages::MessageStore;
pub use models::{Message, User};
pub use users::UserStore;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Errors raised while bringing the database up.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("failed to open database at {path}: {source}")]
    Connect {
        path: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("failed to migrate database: {0}")]
    Migrate(#[from] MigrateError),
}

/// Shared handle to the chat database.
///
/// Cloning is cheap; all clones share one connection pool.
#[derive(Clone, Debug)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Wrap an already-open pool and bring its schema up to date.
    pub async fn from_pool(pool: SqlitePool) -> Result<Self, DatabaseError> {
        MIGRATOR.run(&pool).await?;
        Ok(Self { pool })
    }

    /// The underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Names of user tables currently present, sorted.
    pub async fn table_names(&self) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT name FROM sqlite_master \
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
    }

    /// Close every pooled connection. Further queries fail.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database connections closed");
    }
}

/// Open the configured SQLite file and run schema migrations.
pub async fn connect_database(config: &DatabaseConfig) -> Result<Database, DatabaseError> {
    let options = SqliteConnectOptions::new()
        .filename(&config.path)
        .create_if_missing(true)
        .foreign_keys(true);

    // every SQLite connection gets its own private in-memory database, so an
    // in-memory store must live on exactly one connection that is never recycled
    let pool_options = if config.is_in_memory() {
        tracing::warn!(path = %config.path, "In-memory database; pool limited to one connection");
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(config.max_connections)
    };

    let pool = pool_options
        .connect_with(options)
        .await
        .map_err(|e| {
            tracing::error!(path = %config.path, error = %e, "Database connection failed");
            DatabaseError::Connect {
                path: config.path.clone(),
                source: e,
            }
        })?;

    tracing::info!(path = %config.path, "Database connection established");

    match Database::from_pool(pool.clone()).await {
        Ok(db) => {
            tracing::info!("Database migration complete");
            Ok(db)
        }
        Err(e) => {
            tracing::error!(error = %e, "Database migration failed");
            pool.close().await;
            Err(e)
        }
    }
}
