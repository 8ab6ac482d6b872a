use sqlx::{PgExecutor, Result as SqlxResult};
use uuid::Uuid;

use crate::models::UserRow;

/// Creates a user unless the username is taken, in which case `None` is
/// returned and nothing is written.
pub async fn create<'e>(
    executor: impl PgExecutor<'e>,
    username: &str,
    password_hash: &str,
) -> SqlxResult<Option<UserRow>> {
    sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (username, password_hash)
        VALUES ($1, $2)
        ON CONFLICT (username) DO NOTHING
        RETURNING id, username, password_hash, created_at
        "#,
    )
    .bind(username)
    .bind(password_hash)
    .fetch_optional(executor)
    .await
}

pub async fn get_by_username<'e>(
    executor: impl PgExecutor<'e>,
    username: &str,
) -> SqlxResult<Option<UserRow>> {
    sqlx::query_as::<_, UserRow>(
        "SELECT id, username, password_hash, created_at FROM users WHERE username = $1",
    )
    .bind(username)
    .fetch_optional(executor)
    .await
}
