//! Chat Room Server (bootstrap)
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                  CHAT ROOM                    │
//!                      │                                              │
//!   GET /ping          │  ┌──────────┐    ┌──────────┐                │
//!   ───────────────────┼─▶│ listener │───▶│   http   │──▶ {"message": │
//!                      │  └──────────┘    │  router  │     "pong"}    │
//!                      │                  └────┬─────┘                │
//!                      │                       │ AppState             │
//!                      │                       ▼                      │
//!                      │                  ┌──────────┐    ┌────────┐  │
//!                      │                  │    db    │───▶│ SQLite │  │
//!                      │                  │  (pool)  │    │  file  │  │
//!                      │                  └──────────┘    └────────┘  │
//!                      │                                              │
//!                      │  config · lifecycle · observability          │
//!                      └──────────────────────────────────────────────┘
//! ```
//!
//! Any startup failure (config, database open, migration, bind) is logged and
//! the process exits with status 1.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use chat_room::lifecycle::{signals, startup, Shutdown};
use chat_room::observability::init_logging;

#[derive(Parser)]
#[command(name = "chat-room")]
#[command(about = "Chat room backend server", long_about = None)]
struct Cli {
    /// Path to a TOML config file (default: ./chat-room.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match startup::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            init_logging("info");
            tracing::error!(error = %e, "Startup failed");
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config.observability.log_level);
    tracing::info!("chat-room v{} starting", env!("CARGO_PKG_VERSION"));

    let shutdown = Shutdown::new();
    tokio::spawn(signals::forward_signals(shutdown.clone()));

    match startup::run(config, &shutdown).await {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            ExitCode::FAILURE
        }
    }
}
