use crate::models::PlayerRow;
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, Result as SqlxResult};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "player_position")]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl Position {
    pub const ALL: [Position; 4] = [
        Position::Goalkeeper,
        Position::Defender,
        Position::Midfielder,
        Position::Forward,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "Goalkeeper",
            Position::Defender => "Defender",
            Position::Midfielder => "Midfielder",
            Position::Forward => "Forward",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive, so `goalkeeper` and `GOALKEEPER` both resolve.
impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown player position: {}", s))
    }
}

#[derive(Debug, Clone, Default)]
pub struct PlayerFilter {
    pub club: Option<String>,
    pub position: Option<Position>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPlayer {
    pub name: String,
    pub club: String,
    pub position: Position,
    #[serde(default)]
    pub likes: i32,
}

fn push_filter(query: &mut sqlx::QueryBuilder<'_, sqlx::Postgres>, filter: &PlayerFilter) {
    if let Some(club) = &filter.club {
        query.push(" AND LOWER(club) = LOWER(");
        query.push_bind(club.clone());
        query.push(")");
    }

    if let Some(position) = filter.position {
        query.push(" AND position = ");
        query.push_bind(position);
    }
}

/// Players matching the filter in insertion order.
pub async fn list<'e>(
    executor: impl PgExecutor<'e>,
    filter: &PlayerFilter,
) -> SqlxResult<Vec<PlayerRow>> {
    let mut query =
        sqlx::QueryBuilder::new("SELECT id, name, club, position, likes FROM players WHERE 1=1");
    push_filter(&mut query, filter);
    query.push(" ORDER BY id ASC");

    query.build_query_as::<PlayerRow>().fetch_all(executor).await
}

/// Players matching the filter, most liked first. Ties keep id order.
pub async fn list_ranked<'e>(
    executor: impl PgExecutor<'e>,
    filter: &PlayerFilter,
    limit: Option<i64>,
) -> SqlxResult<Vec<PlayerRow>> {
    let mut query =
        sqlx::QueryBuilder::new("SELECT id, name, club, position, likes FROM players WHERE 1=1");
    push_filter(&mut query, filter);
    query.push(" ORDER BY likes DESC, id ASC");

    if let Some(limit) = limit {
        query.push(" LIMIT ");
        query.push_bind(limit);
    }

    query.build_query_as::<PlayerRow>().fetch_all(executor).await
}

pub async fn get_by_id<'e>(executor: impl PgExecutor<'e>, id: i64) -> SqlxResult<Option<PlayerRow>> {
    sqlx::query_as::<_, PlayerRow>(
        "SELECT id, name, club, position, likes FROM players WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}

/// Highest like count in a club, `None` when the club has no players.
pub async fn max_likes<'e>(executor: impl PgExecutor<'e>, club: &str) -> SqlxResult<Option<i32>> {
    sqlx::query_scalar::<_, Option<i32>>(
        "SELECT MAX(likes) FROM players WHERE LOWER(club) = LOWER($1)",
    )
    .bind(club)
    .fetch_one(executor)
    .await
}

pub async fn list_with_likes<'e>(
    executor: impl PgExecutor<'e>,
    club: &str,
    likes: i32,
) -> SqlxResult<Vec<PlayerRow>> {
    sqlx::query_as::<_, PlayerRow>(
        r#"
        SELECT id, name, club, position, likes
        FROM players
        WHERE LOWER(club) = LOWER($1) AND likes = $2
        ORDER BY id ASC
        "#,
    )
    .bind(club)
    .bind(likes)
    .fetch_all(executor)
    .await
}

pub async fn distinct_clubs<'e>(executor: impl PgExecutor<'e>) -> SqlxResult<Vec<String>> {
    sqlx::query_scalar::<_, String>("SELECT DISTINCT club FROM players ORDER BY club ASC")
        .fetch_all(executor)
        .await
}

pub async fn create<'e>(executor: impl PgExecutor<'e>, data: &NewPlayer) -> SqlxResult<PlayerRow> {
    sqlx::query_as::<_, PlayerRow>(
        r#"
        INSERT INTO players (name, club, position, likes)
        VALUES ($1, $2, $3, $4)
        RETURNING id, name, club, position, likes
        "#,
    )
    .bind(&data.name)
    .bind(&data.club)
    .bind(data.position)
    .bind(data.likes)
    .fetch_one(executor)
    .await
}

/// Inserts unless a player with the same (name, club, position) exists.
/// Returns `None` for an existing player, which is left untouched.
pub async fn insert_if_absent<'e>(
    executor: impl PgExecutor<'e>,
    data: &NewPlayer,
) -> SqlxResult<Option<PlayerRow>> {
    sqlx::query_as::<_, PlayerRow>(
        r#"
        INSERT INTO players (name, club, position, likes)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (name, club, position) DO NOTHING
        RETURNING id, name, club, position, likes
        "#,
    )
    .bind(&data.name)
    .bind(&data.club)
    .bind(data.position)
    .bind(data.likes)
    .fetch_optional(executor)
    .await
}

/// Bumps the cached like counter. Must run in the same transaction as the
/// matching `likes::insert`.
pub async fn increment_likes<'e>(
    executor: impl PgExecutor<'e>,
    id: i64,
) -> SqlxResult<Option<PlayerRow>> {
    sqlx::query_as::<_, PlayerRow>(
        r#"
        UPDATE players
        SET likes = likes + 1
        WHERE id = $1
        RETURNING id, name, club, position, likes
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub async fn count_likes<'e>(executor: impl PgExecutor<'e>, id: i64) -> SqlxResult<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM likes WHERE player_id = $1")
        .bind(id)
        .fetch_one(executor)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_parses_case_insensitively() {
        assert_eq!("Goalkeeper".parse::<Position>(), Ok(Position::Goalkeeper));
        assert_eq!("defender".parse::<Position>(), Ok(Position::Defender));
        assert_eq!(" MIDFIELDER ".parse::<Position>(), Ok(Position::Midfielder));
        assert!("Striker".parse::<Position>().is_err());
        assert!("".parse::<Position>().is_err());
    }

    #[test]
    fn position_display_matches_stored_label() {
        for position in Position::ALL {
            assert_eq!(position.to_string(), position.as_str());
            assert_eq!(position.as_str().parse::<Position>(), Ok(position));
        }
    }

    #[test]
    fn new_player_defaults_likes_to_zero() {
        let player: NewPlayer =
            serde_json::from_str(r#"{"name":"Messi","club":"PSG","position":"Forward"}"#)
                .unwrap();
        assert_eq!(player.likes, 0);
        assert_eq!(player.position, Position::Forward);
    }
}
