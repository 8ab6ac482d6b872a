//! Read-only ranking views. Every ordering is `likes DESC, id ASC`.

use infra::models::PlayerRow;
use infra::repos::{players, PlayerFilter, Position};
use serde::ser::{Serialize, SerializeMap, Serializer};
use sqlx::PgPool;

use crate::error::AppError;

/// Named groups of players, serialized as a JSON object whose keys keep
/// the group order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grouped(pub Vec<(String, Vec<PlayerRow>)>);

impl Grouped {
    pub fn get(&self, key: &str) -> Option<&[PlayerRow]> {
        self.0
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, players)| players.as_slice())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }
}

impl Serialize for Grouped {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, players) in &self.0 {
            map.serialize_entry(name, players)?;
        }
        map.end()
    }
}

/// Lenient `top` parsing: only a plain non-negative integer counts,
/// anything else means "no limit".
pub fn parse_top(raw: Option<&str>) -> Option<i64> {
    let raw = raw?;
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

pub async fn overall(pool: &PgPool) -> Result<Vec<PlayerRow>, AppError> {
    top_n(pool, None).await
}

pub async fn top_n(pool: &PgPool, n: Option<i64>) -> Result<Vec<PlayerRow>, AppError> {
    Ok(players::list_ranked(pool, &PlayerFilter::default(), n).await?)
}

/// One group for the requested position, or every position in declaration
/// order (empty ones included). An unrecognised position yields an empty
/// group under the name as given.
pub async fn by_position(pool: &PgPool, position: Option<&str>) -> Result<Grouped, AppError> {
    let positions = match position {
        Some(raw) => match raw.parse::<Position>() {
            Ok(position) => vec![position],
            Err(_) => return Ok(Grouped(vec![(raw.to_string(), Vec::new())])),
        },
        None => Position::ALL.to_vec(),
    };

    let mut groups = Vec::with_capacity(positions.len());
    for position in positions {
        let filter = PlayerFilter {
            club: None,
            position: Some(position),
        };
        let ranked = players::list_ranked(pool, &filter, None).await?;
        groups.push((position.to_string(), ranked));
    }

    Ok(Grouped(groups))
}

/// Like [`by_position`], but over the clubs present in the data.
pub async fn by_club(pool: &PgPool, club: Option<&str>) -> Result<Grouped, AppError> {
    let clubs = clubs_to_rank(pool, club).await?;

    let mut groups = Vec::with_capacity(clubs.len());
    for club in clubs {
        let filter = PlayerFilter {
            club: Some(club.clone()),
            position: None,
        };
        let ranked = players::list_ranked(pool, &filter, None).await?;
        groups.push((club, ranked));
    }

    Ok(Grouped(groups))
}

/// Players tied for the most likes in each club. Unknown or empty clubs
/// map to an empty list.
pub async fn most_liked_per_club(pool: &PgPool, club: Option<&str>) -> Result<Grouped, AppError> {
    let clubs = clubs_to_rank(pool, club).await?;

    let mut groups = Vec::with_capacity(clubs.len());
    for club in clubs {
        let leaders = match players::max_likes(pool, &club).await? {
            Some(max) => players::list_with_likes(pool, &club, max).await?,
            None => Vec::new(),
        };
        groups.push((club, leaders));
    }

    Ok(Grouped(groups))
}

async fn clubs_to_rank(pool: &PgPool, club: Option<&str>) -> Result<Vec<String>, AppError> {
    match club {
        Some(club) => Ok(vec![club.to_string()]),
        None => Ok(players::distinct_clubs(pool).await?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: i64, name: &str, likes: i32) -> PlayerRow {
        PlayerRow {
            id,
            name: name.to_string(),
            club: "Barcelona".to_string(),
            position: Position::Midfielder,
            likes,
        }
    }

    #[test]
    fn parse_top_accepts_only_plain_integers() {
        assert_eq!(parse_top(Some("3")), Some(3));
        assert_eq!(parse_top(Some("0")), Some(0));
        assert_eq!(parse_top(Some("-1")), None);
        assert_eq!(parse_top(Some("abc")), None);
        assert_eq!(parse_top(Some("2.5")), None);
        assert_eq!(parse_top(Some("")), None);
        assert_eq!(parse_top(Some("99999999999999999999999")), None);
        assert_eq!(parse_top(None), None);
    }

    #[test]
    fn grouped_serializes_as_ordered_object() {
        let grouped = Grouped(vec![
            ("Goalkeeper".to_string(), vec![]),
            ("Midfielder".to_string(), vec![player(1, "Xavi", 12)]),
        ]);

        let json = serde_json::to_string(&grouped).unwrap();
        assert_eq!(
            json,
            r#"{"Goalkeeper":[],"Midfielder":[{"id":1,"name":"Xavi","club":"Barcelona","position":"Midfielder","likes":12}]}"#
        );
    }

    #[test]
    fn grouped_lookup_by_key() {
        let grouped = Grouped(vec![("Barcelona".to_string(), vec![player(2, "Iniesta", 15)])]);
        assert_eq!(grouped.get("Barcelona").map(|p| p.len()), Some(1));
        assert!(grouped.get("Juventus").is_none());
        assert_eq!(grouped.keys().collect::<Vec<_>>(), vec!["Barcelona"]);
    }
}
