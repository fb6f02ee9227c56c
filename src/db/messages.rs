use std::future::Future;

use uuid::Uuid;

use crate::db::models::{decode_id, decode_time, encode_time, now, Message};
use crate::db::Database;

pub trait MessageStore: Send + Sync + 'static {
    /// Persist a message from `user_id`, stamped with the current time.
    fn append_message(
        &self,
        user_id: Uuid,
        text: &str,
    ) -> impl Future<Output = Result<Message, sqlx::Error>> + Send;

    /// The newest `limit` messages, oldest first.
    fn recent_messages(
        &self,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<Message>, sqlx::Error>> + Send;
}

impl MessageStore for Database {
    async fn append_message(&self, user_id: Uuid, text: &str) -> Result<Message, sqlx::Error> {
        let message = Message {
            id: Uuid::new_v4(),
            user_id,
            text: text.to_owned(),
            timestamp: now(),
        };
        sqlx::query("INSERT INTO messages (id, user_id, text, timestamp) VALUES (?1, ?2, ?3, ?4)")
            .bind(message.id.to_string())
            .bind(message.user_id.to_string())
            .bind(&message.text)
            .bind(encode_time(message.timestamp))
            .execute(self.pool())
            .await?;
        Ok(message)
    }

    async fn recent_messages(&self, limit: u32) -> Result<Vec<Message>, sqlx::Error> {
        let rows: Vec<(String, String, String, String)> = sqlx::query_as(
            "SELECT id, user_id, text, timestamp FROM messages \
             ORDER BY timestamp DESC, rowid DESC LIMIT ?1",
        )
        .bind(i64::from(limit))
        .fetch_all(self.pool())
        .await?;

        // newest-first from the query; callers want chronological order
        rows.into_iter()
            .rev()
            .map(|(id, user_id, text, timestamp)| -> Result<Message, sqlx::Error> {
                Ok(Message {
                    id: decode_id(&id)?,
                    user_id: decode_id(&user_id)?,
                    text,
                    timestamp: decode_time(&timestamp)?,
                })
            })
            .collect()
    }
}
