use axum::{
    extract::{Query, State},
    Json,
};
use infra::models::PlayerRow;
use serde::Deserialize;

use crate::error::AppError;
use crate::routes::{non_empty, Listing};
use crate::services::rankings::{self, Grouped};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct PositionQuery {
    pub position: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ClubQuery {
    pub club: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TopQuery {
    pub top: Option<String>,
}

/// GET /rankings/overall/
pub async fn overall(State(state): State<AppState>) -> Result<Json<Listing<PlayerRow>>, AppError> {
    Ok(Json(rankings::overall(&state.db).await?.into()))
}

/// GET /rankings/position/
pub async fn by_position(
    State(state): State<AppState>,
    Query(query): Query<PositionQuery>,
) -> Result<Json<Grouped>, AppError> {
    let position = non_empty(query.position);
    Ok(Json(rankings::by_position(&state.db, position.as_deref()).await?))
}

/// GET /rankings/club/
pub async fn by_club(
    State(state): State<AppState>,
    Query(query): Query<ClubQuery>,
) -> Result<Json<Grouped>, AppError> {
    let club = non_empty(query.club);
    Ok(Json(rankings::by_club(&state.db, club.as_deref()).await?))
}

/// GET /rankings/top/
pub async fn top(
    State(state): State<AppState>,
    Query(query): Query<TopQuery>,
) -> Result<Json<Listing<PlayerRow>>, AppError> {
    let n = rankings::parse_top(query.top.as_deref());
    Ok(Json(rankings::top_n(&state.db, n).await?.into()))
}

/// GET /rankings/club/top/
pub async fn most_liked_per_club(
    State(state): State<AppState>,
    Query(query): Query<ClubQuery>,
) -> Result<Json<Grouped>, AppError> {
    let club = non_empty(query.club);
    Ok(Json(
        rankings::most_liked_per_club(&state.db, club.as_deref()).await?,
    ))
}
