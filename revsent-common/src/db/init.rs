//! Database initialization
//!
//! Opens (or creates) the SQLite file and makes sure the `results` table exists.
//! Safe to call on every run: table creation is idempotent.

use crate::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// SQLite busy timeout applied to every connection
const BUSY_TIMEOUT_MS: u64 = 5000;

/// Open the database file, creating it and the schema if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    // Path goes in as-is; no URL parsing of '?' or '%'
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_millis(BUSY_TIMEOUT_MS));

    let pool = SqlitePoolOptions::new()
        .max_connections(4)
        .connect_with(options)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    create_results_table(&pool).await?;
    info!("Database ready.");

    Ok(pool)
}

/// Private in-memory database with the schema applied
///
/// Single connection: every SQLite `:memory:` connection is its own database.
pub async fn init_in_memory() -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;

    create_results_table(&pool).await?;
    Ok(pool)
}

/// Create the results table
///
/// One row per scored review; the whole table is replaced on every run.
pub async fn create_results_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS results (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            reviewerID TEXT,
            asin TEXT,
            rating REAL,
            review TEXT,
            score INTEGER,
            sentiment TEXT,
            timestamp TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
