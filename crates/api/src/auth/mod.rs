pub mod config;
pub mod password;
pub mod token;

pub use config::AuthConfig;
pub use token::{AuthUser, TokenService};
