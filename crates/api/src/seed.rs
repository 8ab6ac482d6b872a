//! Bulk loading of players from a JSON array of
//! `{name, club, position, likes?}` objects.

use anyhow::Context;
use infra::repos::{players, NewPlayer, Position};
use serde::Deserialize;
use sqlx::PgPool;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct SeedRecord {
    pub name: String,
    pub club: String,
    pub position: String,
    #[serde(default)]
    pub likes: Option<i64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub added: usize,
    pub existing: usize,
    pub invalid: usize,
}

impl TryFrom<SeedRecord> for NewPlayer {
    type Error = String;

    fn try_from(record: SeedRecord) -> Result<Self, Self::Error> {
        let position: Position = record.position.parse()?;
        let likes = match record.likes {
            None => 0,
            Some(n) => i32::try_from(n)
                .ok()
                .filter(|n| *n >= 0)
                .ok_or_else(|| format!("likes must be a non-negative integer, got {n}"))?,
        };

        Ok(NewPlayer {
            name: record.name,
            club: record.club,
            position,
            likes,
        })
    }
}

pub fn parse_records(json: &str) -> anyhow::Result<Vec<SeedRecord>> {
    serde_json::from_str(json).context("players file must be a JSON array of player objects")
}

pub async fn load_file(pool: &PgPool, path: impl AsRef<Path>) -> anyhow::Result<SeedReport> {
    let path = path.as_ref();
    let json = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;

    load_records(pool, parse_records(&json)?).await
}

/// Inserts each record unless an identical (name, club, position) player
/// exists. Existing players keep their like counts.
pub async fn load_records(pool: &PgPool, records: Vec<SeedRecord>) -> anyhow::Result<SeedReport> {
    let mut report = SeedReport::default();

    for record in records {
        let label = record.name.clone();
        let player = match NewPlayer::try_from(record) {
            Ok(player) => player,
            Err(reason) => {
                tracing::warn!(player = %label, %reason, "Skipping invalid player");
                report.invalid += 1;
                continue;
            }
        };

        match players::insert_if_absent(pool, &player).await? {
            Some(row) => {
                tracing::info!(id = row.id, player = %row.name, "Added player");
                report.added += 1;
            }
            None => {
                tracing::warn!(player = %player.name, "Player already exists");
                report.existing += 1;
            }
        }
    }

    Ok(report)
}
