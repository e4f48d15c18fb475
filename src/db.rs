// src/db.rs

use std::{path::Path, str::FromStr, time::Duration};

use sqlx::{
    SqlitePool,
    migrate::Migrator,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

use validator::Validate;

use crate::models::news::{NewNews, News};

/// Schema migrations, embedded at compile time.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

const CONNECT_RETRIES: u32 = 5;

/// Opens the pool, retrying while the database is not reachable yet,
/// then applies pending migrations.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let mut retry_count = 0;
    let pool = loop {
        match SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect_with(options.clone())
            .await
        {
            Ok(pool) => break pool,
            Err(e) => {
                retry_count += 1;
                if retry_count > CONNECT_RETRIES {
                    return Err(e);
                }
                tracing::warn!("Database not ready, retrying in 2s... (Attempt {})", retry_count);
                tokio::time::sleep(Duration::from_secs(2)).await;
            }
        }
    };

    tracing::info!("Running migrations...");
    MIGRATOR.run(&pool).await?;
    tracing::info!("Migrations applied successfully.");

    Ok(pool)
}

/// A migrated private in-memory database on a single long-lived connection.
pub async fn connect_in_memory() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None::<Duration>)
        .max_lifetime(None::<Duration>)
        .connect_with(options)
        .await?;

    MIGRATOR.run(&pool).await?;
    Ok(pool)
}

#[derive(Debug)]
pub enum FixtureError {
    Io(std::io::Error),
    Json(serde_json::Error),
    /// Item `index` (0-based) breaks a field rule.
    Invalid { index: usize, reason: String },
    Db(sqlx::Error),
}

impl std::fmt::Display for FixtureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FixtureError::Io(e) => write!(f, "cannot read fixture: {e}"),
            FixtureError::Json(e) => write!(f, "malformed fixture: {e}"),
            FixtureError::Invalid { index, reason } => {
                write!(f, "invalid fixture item #{index}: {reason}")
            }
            FixtureError::Db(e) => write!(f, "cannot store fixture: {e}"),
        }
    }
}

impl std::error::Error for FixtureError {}

impl From<std::io::Error> for FixtureError {
    fn from(err: std::io::Error) -> Self {
        FixtureError::Io(err)
    }
}

impl From<serde_json::Error> for FixtureError {
    fn from(err: serde_json::Error) -> Self {
        FixtureError::Json(err)
    }
}

impl From<sqlx::Error> for FixtureError {
    fn from(err: sqlx::Error) -> Self {
        FixtureError::Db(err)
    }
}

/// Seeds news from a JSON array of `{title, text, date?}` objects.
///
/// Does nothing when the table already has rows. Every item is validated
/// before anything is written. Returns how many items were inserted.
pub async fn load_news_fixture(pool: &SqlitePool, path: &Path) -> Result<usize, FixtureError> {
    if News::count(pool).await? > 0 {
        tracing::info!("News table is not empty, skipping fixture {}", path.display());
        return Ok(0);
    }

    let raw = tokio::fs::read_to_string(path).await?;
    let items: Vec<NewNews> = serde_json::from_str(&raw)?;

    for (index, item) in items.iter().enumerate() {
        item.validate().map_err(|e| FixtureError::Invalid {
            index,
            reason: e.to_string(),
        })?;
    }

    insert_news(pool, &items).await
}

async fn insert_news(pool: &SqlitePool, items: &[NewNews]) -> Result<usize, FixtureError> {
    let mut tx = pool.begin().await?;
    for item in items {
        News::create(&mut *tx, item).await?;
    }
    tx.commit().await?;

    tracing::info!("Loaded {} news items", items.len());
    Ok(items.len())
}
