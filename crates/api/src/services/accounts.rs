use serde::{Deserialize, Serialize};

use crate::auth::password::{hash_password, verify_password};
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    fn into_parts(self) -> Option<(String, String)> {
        match (self.username, self.password) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Some((username, password))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Registration {
    pub username: String,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct IssuedToken {
    pub token: String,
}

/// Creates the account and its first token in one transaction.
pub async fn register(state: &AppState, credentials: Credentials) -> Result<Registration, AppError> {
    let (username, password) = credentials
        .into_parts()
        .ok_or_else(|| AppError::BadRequest("Username and password required".to_string()))?;

    let password_hash = hash_password(&password, state.auth_config().bcrypt_cost)?;

    let mut tx = state.db.begin().await?;

    let user = infra::repos::users::create(&mut *tx, &username, &password_hash)
        .await?
        .ok_or_else(|| AppError::Conflict("Username already exists".to_string()))?;

    let token = state.token_service().issue(&mut *tx, user.id).await?;

    tx.commit().await?;

    tracing::info!(user_id = %user.id, username = %user.username, "user registered");
    Ok(Registration {
        username: user.username,
        token,
    })
}

/// Exchanges valid credentials for a fresh token.
pub async fn obtain_token(state: &AppState, credentials: Credentials) -> Result<IssuedToken, AppError> {
    let invalid = || AppError::BadRequest("Unable to log in with provided credentials.".to_string());

    let (username, password) = credentials.into_parts().ok_or_else(invalid)?;

    let user = infra::repos::users::get_by_username(&state.db, &username)
        .await?
        .ok_or_else(invalid)?;

    if !verify_password(&password, &user.password_hash) {
        tracing::debug!(username = %username, "token request with bad password");
        return Err(invalid());
    }

    let token = state.token_service().issue(&state.db, user.id).await?;
    Ok(IssuedToken { token })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_require_both_fields() {
        let full = Credentials {
            username: Some("testuser".into()),
            password: Some("testpass".into()),
        };
        assert_eq!(
            full.into_parts(),
            Some(("testuser".to_string(), "testpass".to_string()))
        );

        let missing_password = Credentials {
            username: Some("testuser".into()),
            password: None,
        };
        assert!(missing_password.into_parts().is_none());

        let empty_username = Credentials {
            username: Some(String::new()),
            password: Some("testpass".into()),
        };
        assert!(empty_username.into_parts().is_none());

        assert!(Credentials::default().into_parts().is_none());
    }
}
