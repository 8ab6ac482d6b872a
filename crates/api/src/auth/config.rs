use anyhow::{Context, Result};
use std::env;

#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub bcrypt_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl AuthConfig {
    pub fn from_env() -> Result<Self> {
        let bcrypt_cost = match env::var("BCRYPT_COST") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("BCRYPT_COST must be an integer, got {raw:?}"))?,
            Err(_) => bcrypt::DEFAULT_COST,
        };

        Ok(Self { bcrypt_cost })
    }
}
