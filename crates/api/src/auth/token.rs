use axum::{extract::FromRequestParts, http::request::Parts};
use rand::distr::Alphanumeric;
use rand::RngExt;
use serde::Serialize;
use sha2::{Digest, Sha256};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::error::AppError;

pub const TOKEN_LENGTH: usize = 40;

/// Identity resolved from a bearer token by the auth middleware.
#[derive(Debug, Clone, Serialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub username: String,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<AuthUser>().cloned().ok_or_else(|| {
            AppError::Unauthorized("Authentication credentials were not provided.".to_string())
        })
    }
}

pub fn hash_token(raw: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(raw.as_bytes());
    format!("{:x}", hasher.finalize())
}

pub fn generate_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// Pulls the raw key out of `Token <key>` or `Bearer <key>`.
pub fn parse_authorization(header: &str) -> Option<&str> {
    let (scheme, key) = header.trim().split_once(' ')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    if scheme.eq_ignore_ascii_case("token") || scheme.eq_ignore_ascii_case("bearer") {
        Some(key)
    } else {
        None
    }
}

/// Issues and resolves opaque API tokens. Only SHA-256 digests are stored.
#[derive(Clone)]
pub struct TokenService {
    db: PgPool,
}

impl TokenService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn issue<'e>(
        &self,
        executor: impl PgExecutor<'e>,
        user_id: Uuid,
    ) -> Result<String, AppError> {
        let raw_token = generate_token();
        infra::repos::auth_tokens::create(executor, &hash_token(&raw_token), user_id).await?;
        Ok(raw_token)
    }

    pub async fn authenticate(&self, raw_token: &str) -> Result<AuthUser, AppError> {
        let user = infra::repos::auth_tokens::find_user(&self.db, &hash_token(raw_token))
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid token.".to_string()))?;

        Ok(AuthUser {
            id: user.id,
            username: user.username,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_tokens_are_alphanumeric_and_distinct() {
        let a = generate_token();
        let b = generate_token();
        assert_eq!(a.len(), TOKEN_LENGTH);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }

    #[test]
    fn hash_is_stable_hex_digest() {
        let digest = hash_token("abc");
        assert_eq!(
            digest,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(digest, hash_token("abc"));
    }

    #[test]
    fn parses_token_and_bearer_schemes() {
        assert_eq!(parse_authorization("Token abc123"), Some("abc123"));
        assert_eq!(parse_authorization("Bearer abc123"), Some("abc123"));
        assert_eq!(parse_authorization("bearer  abc123 "), Some("abc123"));
        assert_eq!(parse_authorization("Basic abc123"), None);
        assert_eq!(parse_authorization("Token"), None);
        assert_eq!(parse_authorization("Token   "), None);
    }
}
