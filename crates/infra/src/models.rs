use crate::repos::players::Position;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct PlayerRow {
    pub id: i64,
    pub name: String,
    pub club: String,
    pub position: Position,
    pub likes: i32,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct LikeRow {
    pub user_id: Uuid,
    pub player_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct AuthTokenRow {
    pub token_hash: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}
