use std::time::Duration;

use axum::{
    extract::State,
    http::{
        header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE},
        Method, StatusCode,
    },
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::error::AppError;
use crate::middleware::auth::auth_middleware;
use crate::routes::{auth, players, rankings};
use crate::state::AppState;

/// Build the Axum router with the player, ranking and auth endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Simple liveness check; also proves DB connectivity.
        .route("/health", get(health))
        .route("/players/", get(players::list))
        .route("/players/{id}/like/", post(players::like))
        .route("/rankings/overall/", get(rankings::overall))
        .route("/rankings/position/", get(rankings::by_position))
        .route("/rankings/club/", get(rankings::by_club))
        .route("/rankings/top/", get(rankings::top))
        .route("/rankings/club/top/", get(rankings::most_liked_per_club))
        .route("/auth/register/", post(auth::register))
        .route("/auth/token/", post(auth::obtain_token))
        .with_state(state.clone())
        // Resolves the Authorization header into an AuthUser
        .layer(middleware::from_fn_with_state(state, auth_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(cors_layer())
}

fn cors_layer() -> CorsLayer {
    let allowed_origins = std::env::var("ALLOWED_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000".to_string());

    let origins: Vec<HeaderValue> = allowed_origins
        .split(',')
        .filter_map(|o| o.trim().parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
}

/// Liveness + quick DB probe.
async fn health(State(state): State<AppState>) -> Result<&'static str, AppError> {
    let _one: i32 = sqlx::query_scalar("SELECT 1").fetch_one(&state.db).await?;
    Ok("ok")
}
