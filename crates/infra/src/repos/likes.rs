use sqlx::{PgExecutor, Result as SqlxResult};
use uuid::Uuid;

use crate::models::LikeRow;

/// Records a like. Returns `None` when the (user, player) pair already has
/// one; the primary key makes a racing duplicate wait for the first writer
/// and then fall into this branch.
pub async fn insert<'e>(
    executor: impl PgExecutor<'e>,
    user_id: Uuid,
    player_id: i64,
) -> SqlxResult<Option<LikeRow>> {
    sqlx::query_as::<_, LikeRow>(
        r#"
        INSERT INTO likes (user_id, player_id)
        VALUES ($1, $2)
        ON CONFLICT (user_id, player_id) DO NOTHING
        RETURNING user_id, player_id, created_at
        "#,
    )
    .bind(user_id)
    .bind(player_id)
    .fetch_optional(executor)
    .await
}

pub async fn exists<'e>(
    executor: impl PgExecutor<'e>,
    user_id: Uuid,
    player_id: i64,
) -> SqlxResult<bool> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM likes WHERE user_id = $1 AND player_id = $2)",
    )
    .bind(user_id)
    .bind(player_id)
    .fetch_one(executor)
    .await
}
