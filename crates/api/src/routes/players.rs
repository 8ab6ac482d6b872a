use axum::{
    extract::{Path, Query, State},
    Json,
};
use infra::models::PlayerRow;
use infra::repos::{players, PlayerFilter, Position};
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::routes::{non_empty, Listing};
use crate::services;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct PlayerListQuery {
    pub club: Option<String>,
    pub position: Option<String>,
}

/// GET /players/
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<PlayerListQuery>,
) -> Result<Json<Listing<PlayerRow>>, AppError> {
    let position = match non_empty(query.position) {
        Some(raw) => match raw.parse::<Position>() {
            Ok(position) => Some(position),
            // No player can hold a position outside the enum.
            Err(_) => return Ok(Json(Listing::from(Vec::new()))),
        },
        None => None,
    };

    let filter = PlayerFilter {
        club: non_empty(query.club),
        position,
    };

    let rows = players::list(&state.db, &filter).await?;
    Ok(Json(rows.into()))
}

/// POST /players/{id}/like/
pub async fn like(
    State(state): State<AppState>,
    user: AuthUser,
    Path(raw_id): Path<String>,
) -> Result<Json<PlayerRow>, AppError> {
    let player_id: i64 = raw_id
        .parse()
        .map_err(|_| AppError::NotFound("Player not found".to_string()))?;

    let player = services::like_player(&state.db, user.id, player_id).await?;
    Ok(Json(player))
}
