use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::auth::{token::parse_authorization, AuthUser};
use crate::error::AppError;
use crate::state::AppState;

/// Resolves `Authorization: Token <key>` (or `Bearer <key>`) to an
/// [`AuthUser`] in the request extensions. Requests without a recognised
/// header pass through anonymously; a key that resolves to no user is
/// rejected outright.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let raw_token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_authorization)
        .map(str::to_owned);

    if let Some(raw_token) = raw_token {
        let user = state.token_service().authenticate(&raw_token).await?;
        tracing::debug!(user_id = %user.id, "authenticated request");
        request.extensions_mut().insert::<AuthUser>(user);
    }

    Ok(next.run(request).await)
}
