pub mod app;
pub mod auth;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod seed;
pub mod services;
pub mod state;

pub use state::AppState;
