use infra::models::PlayerRow;
use infra::repos::{likes, players};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;

const PLAYER_NOT_FOUND: &str = "Player not found";
const ALREADY_LIKED: &str = "You already liked this player";

/// Records `user_id`'s like on a player and bumps its counter in one
/// transaction. The like row and the increment commit together or not at
/// all, so `players.likes` always equals the number of like rows.
pub async fn like_player(pool: &PgPool, user_id: Uuid, player_id: i64) -> Result<PlayerRow, AppError> {
    let mut tx = pool.begin().await?;

    players::get_by_id(&mut *tx, player_id)
        .await?
        .ok_or_else(|| AppError::NotFound(PLAYER_NOT_FOUND.to_string()))?;

    let inserted = likes::insert(&mut *tx, user_id, player_id)
        .await
        .map_err(map_constraint_error)?;

    if inserted.is_none() {
        tracing::debug!(%user_id, player_id, "duplicate like rejected");
        return Err(AppError::Conflict(ALREADY_LIKED.to_string()));
    }

    let player = players::increment_likes(&mut *tx, player_id)
        .await?
        .ok_or_else(|| AppError::NotFound(PLAYER_NOT_FOUND.to_string()))?;

    tx.commit().await?;

    tracing::info!(%user_id, player_id, likes = player.likes, "player liked");
    Ok(player)
}

fn map_constraint_error(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return AppError::Conflict(ALREADY_LIKED.to_string());
        }
        if db_err.is_foreign_key_violation()
            && db_err.constraint() == Some("likes_player_id_fkey")
        {
            return AppError::NotFound(PLAYER_NOT_FOUND.to_string());
        }
    }
    AppError::Db(err)
}
