pub mod auth;
pub mod players;
pub mod rankings;

use serde::Serialize;

/// Envelope for flat player lists.
#[derive(Debug, Serialize)]
pub struct Listing<T> {
    pub count: usize,
    pub results: Vec<T>,
}

impl<T> From<Vec<T>> for Listing<T> {
    fn from(results: Vec<T>) -> Self {
        Self {
            count: results.len(),
            results,
        }
    }
}

/// Blank query values count as absent.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
