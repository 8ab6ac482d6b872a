pub mod accounts;
pub mod likes;
pub mod rankings;

pub use likes::like_player;
