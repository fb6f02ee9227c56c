//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::ChatConfig;
use crate::config::validation::{validate_config, ValidationError};

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "chat-room.toml";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<ChatConfig, ConfigError> {
    let config: ChatConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ChatConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content)
}

/// Resolve the effective configuration.
///
/// An explicit path must exist. Without one, [`DEFAULT_CONFIG_FILE`] is read
/// when present and built-in defaults are used otherwise.
pub fn resolve_config(explicit: Option<&Path>) -> Result<ChatConfig, ConfigError> {
    match explicit {
        Some(path) => load_config(path),
        None => {
            let fallback = Path::new(DEFAULT_CONFIG_FILE);
            if fallback.exists() {
                load_config(fallback)
            } else {
                Ok(ChatConfig::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = parse_config(
            r#"
            [database]
            path = "/tmp/rooms.db"
            "#,
        )
        .unwrap();

        assert_eq!(config.database.path, "/tmp/rooms.db");
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.server.bind_address, "0.0.0.0:8080");
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn empty_file_is_default() {
        let config = parse_config("").unwrap();
        assert_eq!(config.server.request_timeout_secs, 30);
    }

    #[test]
    fn syntax_error_is_parse_error() {
        let err = parse_config("[server\nbind_address = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn semantic_error_is_validation_error() {
        let err = parse_config(
            r#"
            [server]
            bind_address = "localhost"
            "#,
        )
        .unwrap_err();

        match err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 1),
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nbind_address = \"127.0.0.1:9000\"").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.server.bind_address, "127.0.0.1:9000");
    }

    #[test]
    fn explicit_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve_config(Some(dir.path().join("absent.toml").as_path())).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
