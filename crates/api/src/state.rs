use sqlx::PgPool;

use crate::auth::{AuthConfig, TokenService};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    auth_config: AuthConfig,
    token_service: TokenService,
}

impl AppState {
    pub fn new(db: PgPool) -> anyhow::Result<Self> {
        Ok(Self::with_auth_config(db, AuthConfig::from_env()?))
    }

    pub fn with_auth_config(db: PgPool, auth_config: AuthConfig) -> Self {
        let token_service = TokenService::new(db.clone());

        Self {
            db,
            auth_config,
            token_service,
        }
    }

    pub fn auth_config(&self) -> &AuthConfig {
        &self.auth_config
    }

    pub fn token_service(&self) -> &TokenService {
        &self.token_service
    }
}
