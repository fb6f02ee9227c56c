use std::future::Future;

use uuid::Uuid;

use crate::db::models::{decode_id, decode_time, encode_time, now, User};
use crate::db::Database;

pub trait UserStore: Send + Sync + 'static {
    /// Insert a new account. Usernames are unique.
    fn create_user(&self, username: &str) -> impl Future<Output = Result<User, sqlx::Error>> + Send;

    fn find_user_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<User>, sqlx::Error>> + Send;
}

impl UserStore for Database {
    async fn create_user(&self, username: &str) -> Result<User, sqlx::Error> {
        let user = User {
            id: Uuid::new_v4(),
            username: username.to_owned(),
            created_at: now(),
        };
        sqlx::query("INSERT INTO users (id, username, created_at) VALUES (?1, ?2, ?3)")
            .bind(user.id.to_string())
            .bind(&user.username)
            .bind(encode_time(user.created_at))
            .execute(self.pool())
            .await?;

        tracing::debug!(user_id = %user.id, username = %user.username, "User created");
        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        let row: Option<(String, String, String)> =
            sqlx::query_as("SELECT id, username, created_at FROM users WHERE username = ?1")
                .bind(username)
                .fetch_optional(self.pool())
                .await?;

        row.map(|(id, username, created_at)| -> Result<User, sqlx::Error> {
            Ok(User {
                id: decode_id(&id)?,
                username,
                created_at: decode_time(&created_at)?,
            })
        })
        .transpose()
    }
}
