use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::seed;

/// Usage: load_players [path/to/players.json]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "players.json".to_string());

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&std::env::var("DATABASE_URL")?)
        .await?;

    let report = seed::load_file(&pool, &path).await?;
    tracing::info!(
        added = report.added,
        existing = report.existing,
        invalid = report.invalid,
        "Finished loading {}",
        path
    );

    Ok(())
}
