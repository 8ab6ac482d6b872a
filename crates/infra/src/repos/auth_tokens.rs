use sqlx::{PgExecutor, Result as SqlxResult};
use uuid::Uuid;

use crate::models::{AuthTokenRow, UserRow};

pub async fn create<'e>(
    executor: impl PgExecutor<'e>,
    token_hash: &str,
    user_id: Uuid,
) -> SqlxResult<AuthTokenRow> {
    sqlx::query_as::<_, AuthTokenRow>(
        r#"
        INSERT INTO auth_tokens (token_hash, user_id)
        VALUES ($1, $2)
        RETURNING token_hash, user_id, created_at
        "#,
    )
    .bind(token_hash)
    .bind(user_id)
    .fetch_one(executor)
    .await
}

/// Resolves a hashed token to the owning user.
pub async fn find_user<'e>(
    executor: impl PgExecutor<'e>,
    token_hash: &str,
) -> SqlxResult<Option<UserRow>> {
    sqlx::query_as::<_, UserRow>(
        r#"
        SELECT u.id, u.username, u.password_hash, u.created_at
        FROM auth_tokens t
        JOIN users u ON u.id = t.user_id
        WHERE t.token_hash = $1
        "#,
    )
    .bind(token_hash)
    .fetch_optional(executor)
    .await
}
