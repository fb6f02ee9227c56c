//! Row types for the `users` and `messages` tables.
//!
//! Identifiers and timestamps are stored as TEXT (UUID strings and RFC 3339
//! UTC with microsecond precision) so rows sort lexically by time.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A chat account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// A single message posted to the room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub id: Uuid,
    pub user_id: Uuid,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// Format a timestamp the way it is persisted.
pub(crate) fn encode_time(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Truncate to the persisted precision so stored and in-memory values compare equal.
pub(crate) fn now() -> DateTime<Utc> {
    let at = Utc::now();
    DateTime::parse_from_rfc3339(&encode_time(at))
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or(at)
}

pub(crate) fn decode_time(raw: &str) -> Result<DateTime<Utc>, sqlx::Error> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| sqlx::Error::Decode(Box::new(e)))
}

pub(crate) fn decode_id(raw: &str) -> Result<Uuid, sqlx::Error> {
    raw.parse::<Uuid>()
        .map_err(|e| sqlx::Error::Decode(Box::new(e)))
}
