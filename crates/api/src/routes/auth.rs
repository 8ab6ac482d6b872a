use axum::{body::Bytes, extract::State, Json};

use crate::error::AppError;
use crate::services::accounts::{self, Credentials, IssuedToken, Registration};
use crate::state::AppState;

fn parse_credentials(body: &[u8]) -> Result<Credentials, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Credentials::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {e}")))
}

/// POST /auth/register/
pub async fn register(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Registration>, AppError> {
    let credentials = parse_credentials(&body)?;
    Ok(Json(accounts::register(&state, credentials).await?))
}

/// POST /auth/token/
pub async fn obtain_token(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<IssuedToken>, AppError> {
    let credentials = parse_credentials(&body)?;
    Ok(Json(accounts::obtain_token(&state, credentials).await?))
}
