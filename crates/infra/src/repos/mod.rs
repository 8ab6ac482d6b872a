pub mod auth_tokens;
pub mod likes;
pub mod players;
pub mod users;

pub use players::{NewPlayer, PlayerFilter, Position};
